//! Conversation handling: commands, free-text searches and the "load
//! more" pagination flow.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ReplyParameters,
};
use teloxide::utils::command::BotCommands;

pub mod context;
pub mod cursor;
pub mod sink;

use crate::bot::context::AppContext;
use crate::bot::cursor::{Cursor, CursorScope};
use crate::bot::sink::TelegramSink;
use crate::catalog::OfferQuery;
use crate::domain::category::Category;
use crate::search::deliver_search;

type SharedContext = Arc<AppContext>;
type HandlerResult = ResponseResult<()>;

const GREETING: &str = "Hello! This is maxima discount search bot. \n\n\
    Use '☰ Menu' button to search by categories. \n\
    Or just type product name or type (you can use ENG letters e.g. Kaku bariba)\n";

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Get started with bot")]
    Start,
    #[command(description = "🥩 Meat")]
    Meat,
    #[command(description = "🍅 Vegetables")]
    Veggies,
    #[command(description = "🍞 Bread")]
    Bread,
    #[command(description = "🐟 Fish")]
    Fish,
    #[command(description = "🥛🥚 Milk and egg products")]
    Dairy,
}

/// Registers the command menu shown next to the chat input field.
pub async fn set_commands(bot: &Bot) -> HandlerResult {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// Builds the dispatch tree: commands, then free text, then pagination
/// callbacks.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    let message_handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| msg.text().map(str::to_string))
                .endpoint(handle_text),
        );

    let callback_handler = Update::filter_callback_query().endpoint(handle_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

async fn handle_command(bot: Bot, ctx: SharedContext, msg: Message, cmd: Command) -> HandlerResult {
    let category = match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, GREETING).await?;
            return Ok(());
        }
        Command::Meat => Category::Meat,
        Command::Veggies => Category::Veggies,
        Command::Bread => Category::Bread,
        Command::Fish => Category::Fish,
        Command::Dairy => Category::Dairy,
    };
    run_category_search(&bot, &ctx, &msg, category).await
}

async fn handle_text(bot: Bot, ctx: SharedContext, msg: Message, text: String) -> HandlerResult {
    // Category shortcuts typed as plain text behave like the menu commands.
    if let Some(category) = Category::from_keyword(&text) {
        return run_category_search(&bot, &ctx, &msg, category).await;
    }
    run_text_search(&bot, &ctx, &msg, &text).await
}

async fn run_text_search(
    bot: &Bot,
    ctx: &AppContext,
    msg: &Message,
    text: &str,
) -> HandlerResult {
    let query = OfferQuery::text_search(text, ctx.page_limit);
    run_first_page(bot, ctx, msg, &query, CursorScope::Text(text.to_string())).await
}

async fn run_category_search(
    bot: &Bot,
    ctx: &AppContext,
    msg: &Message,
    category: Category,
) -> HandlerResult {
    let query = OfferQuery::category_search(category, ctx.page_limit, ctx.default_offset);
    run_first_page(bot, ctx, msg, &query, CursorScope::Category(category)).await
}

/// Cursor to attach after the first page of a search: a full page gets a
/// cursor advanced past the listing's load-more base, a short page ends
/// the pagination.
fn first_page_cursor(
    ctx: &AppContext,
    scope: CursorScope,
    origin_message: i32,
    count: usize,
) -> Option<Cursor> {
    (count as u32 == ctx.page_limit).then(|| Cursor {
        offset: ctx.default_offset + ctx.page_limit,
        scope,
        origin_message,
    })
}

/// Cursor to attach after a "load more" page: advances by one page while
/// the pages keep coming back full.
fn continuation_cursor(cursor: &Cursor, page_limit: u32, count: usize) -> Option<Cursor> {
    (count as u32 == page_limit).then(|| cursor.next_page(page_limit))
}

/// Runs the first page of a search and, when the page comes back full,
/// attaches a "load more" button carrying the cursor for the next page.
async fn run_first_page(
    bot: &Bot,
    ctx: &AppContext,
    msg: &Message,
    query: &OfferQuery,
    scope: CursorScope,
) -> HandlerResult {
    let sink = TelegramSink::new(bot.clone(), msg.chat.id);
    let count = match deliver_search(&ctx.catalog, &sink, query).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("Search {:?} failed: {e}", query.text);
            return Ok(());
        }
    };
    if let Some(next) = first_page_cursor(ctx, scope, msg.id.0, count) {
        send_load_more(bot, msg.chat.id, msg.id, &next).await?;
    }
    Ok(())
}

async fn handle_callback(bot: Bot, ctx: SharedContext, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(cursor) = Cursor::decode(data) else {
        log::warn!("Ignoring malformed pagination payload: {data}");
        return Ok(());
    };
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    let query = match &cursor.scope {
        CursorScope::Text(text) => {
            OfferQuery::text_search(text.clone(), ctx.page_limit).with_offset(cursor.offset)
        }
        CursorScope::Category(category) => {
            OfferQuery::category_search(*category, ctx.page_limit, cursor.offset)
        }
    };

    let sink = TelegramSink::new(bot.clone(), chat_id);
    let count = match deliver_search(&ctx.catalog, &sink, &query).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("Pagination of {:?} failed: {e}", query.text);
            return Ok(());
        }
    };

    if let Some(next) = continuation_cursor(&cursor, ctx.page_limit, count) {
        // A new message replying to the original search, not an edit of
        // the previous button message.
        send_load_more(&bot, chat_id, MessageId(cursor.origin_message), &next).await?;
    }
    Ok(())
}

async fn send_load_more(
    bot: &Bot,
    chat: ChatId,
    reply_to: MessageId,
    cursor: &Cursor,
) -> HandlerResult {
    let keyboard =
        InlineKeyboardMarkup::new([[InlineKeyboardButton::callback("⏳", cursor.encode())]]);
    bot.send_message(chat, "Load more")
        .reply_parameters(ReplyParameters::new(reply_to))
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::BotConfig;

    fn ctx() -> AppContext {
        AppContext::new(&BotConfig {
            api_key: "token".to_string(),
            base_url: "https://www.maxima.lv/".to_string(),
            page_limit: 5,
            default_offset: 10,
            bind_addr: "127.0.0.1:0".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn full_first_page_attaches_cursor_past_load_more_base() {
        let cursor = first_page_cursor(&ctx(), CursorScope::Text("piens".to_string()), 42, 5)
            .expect("full page should paginate");
        assert_eq!(cursor.offset, 15);
        assert_eq!(cursor.scope, CursorScope::Text("piens".to_string()));
        assert_eq!(cursor.origin_message, 42);
    }

    #[test]
    fn short_first_page_ends_pagination() {
        let ctx = ctx();
        assert!(first_page_cursor(&ctx, CursorScope::Text("piens".to_string()), 42, 3).is_none());
        assert!(first_page_cursor(&ctx, CursorScope::Category(Category::Meat), 42, 0).is_none());
    }

    #[test]
    fn category_first_page_cursor_keeps_its_category() {
        let cursor = first_page_cursor(&ctx(), CursorScope::Category(Category::Dairy), 7, 5)
            .expect("full page should paginate");
        assert_eq!(cursor.scope, CursorScope::Category(Category::Dairy));
        assert_eq!(cursor.offset, 15);
    }

    #[test]
    fn continuation_advances_only_while_pages_are_full() {
        let cursor = Cursor {
            offset: 15,
            scope: CursorScope::Text("siers".to_string()),
            origin_message: 42,
        };
        let next = continuation_cursor(&cursor, 5, 5).expect("full page should paginate");
        assert_eq!(next.offset, 20);
        assert_eq!(next.origin_message, 42);
        assert!(continuation_cursor(&cursor, 5, 4).is_none());
    }
}

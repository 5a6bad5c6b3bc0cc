use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode};
use url::Url;

use crate::search::{ReplySink, SearchError};

/// [`ReplySink`] bound to one Telegram chat.
pub struct TelegramSink {
    bot: Bot,
    chat: ChatId,
}

impl TelegramSink {
    pub fn new(bot: Bot, chat: ChatId) -> Self {
        Self { bot, chat }
    }
}

fn delivery(e: teloxide::RequestError) -> SearchError {
    SearchError::Delivery(e.to_string())
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send_text(&self, text: &str) -> Result<(), SearchError> {
        self.bot
            .send_message(self.chat, text)
            .await
            .map_err(delivery)?;
        Ok(())
    }

    async fn send_html(&self, html: &str) -> Result<(), SearchError> {
        self.bot
            .send_message(self.chat, html)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(delivery)?;
        Ok(())
    }

    async fn send_photo(&self, url: &Url) -> Result<(), SearchError> {
        self.bot
            .send_photo(self.chat, InputFile::url(url.clone()))
            .await
            .map_err(delivery)?;
        Ok(())
    }
}

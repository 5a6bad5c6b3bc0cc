use std::sync::Arc;

use teloxide::dptree;
use teloxide::prelude::*;

use maxima_discounts::bot;
use maxima_discounts::bot::context::AppContext;
use maxima_discounts::models::config::BotConfig;
use maxima_discounts::server;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match BotConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let ctx = match AppContext::new(&config) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            log::error!("Failed to build application context: {e}");
            std::process::exit(1);
        }
    };

    let bind_addr = config.bind_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = server::serve(&bind_addr).await {
            log::error!("Web app failed to start: {e}");
        }
    });

    let bot = Bot::new(config.api_key.clone());
    if let Err(e) = bot.delete_webhook().drop_pending_updates(true).await {
        log::error!("Failed to drop pending updates: {e}");
    }
    if let Err(e) = bot::set_commands(&bot).await {
        log::error!("Failed to register bot commands: {e}");
    }

    log::info!("Starting polling");
    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

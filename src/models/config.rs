//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct BotConfig {
    /// Telegram bot token.
    pub api_key: String,
    /// Origin of the offer listing site.
    pub base_url: String,
    /// Offers per reply page.
    pub page_limit: u32,
    /// Listing offset the site's own "load more" starts from.
    pub default_offset: u32,
    /// Address of the liveness HTTP endpoint.
    pub bind_addr: String,
}

impl BotConfig {
    /// Loads configuration from an optional `config.yaml`, with
    /// environment variables (`API_KEY`, `BASE_URL`, ...) taking
    /// precedence over file values and defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("base_url", "https://www.maxima.lv/")?
            .set_default("page_limit", 5)?
            .set_default("default_offset", 10)?
            .set_default("bind_addr", "0.0.0.0:8080")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }
}

use url::Url;

use crate::catalog::maxima::MaximaCatalog;
use crate::catalog::{CatalogError, CatalogResult};
use crate::models::config::BotConfig;

/// Everything the update handlers need, built once at startup and shared
/// through the dispatcher instead of module-level globals.
pub struct AppContext {
    pub catalog: MaximaCatalog,
    /// Offers per reply page.
    pub page_limit: u32,
    /// Listing offset the site's own "load more" starts from; also the
    /// base every follow-up cursor advances from.
    pub default_offset: u32,
}

impl AppContext {
    pub fn new(config: &BotConfig) -> CatalogResult<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| CatalogError::Build(e.to_string()))?;
        Ok(Self {
            catalog: MaximaCatalog::new(base_url)?,
            page_limit: config.page_limit,
            default_offset: config.default_offset,
        })
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::category::Category;
use crate::domain::offer::Offer;

pub mod maxima;
pub mod parse;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to build catalog client: {0}")]
    Build(String),
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// One page request against the offer listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    /// Free-text search term, empty for category-only searches.
    pub text: String,
    pub category: Option<Category>,
    /// Page size.
    pub limit: u32,
    /// Listing offset. `None` means the parameter is not sent at all,
    /// which the site treats as the first page.
    pub offset: Option<u32>,
}

impl OfferQuery {
    pub fn text_search(text: impl Into<String>, limit: u32) -> Self {
        Self {
            text: text.into(),
            category: None,
            limit,
            offset: None,
        }
    }

    pub fn category_search(category: Category, limit: u32, offset: u32) -> Self {
        Self {
            text: String::new(),
            category: Some(category),
            limit,
            offset: Some(offset),
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// An abstraction over offer catalogs that answer paginated searches.
#[async_trait]
pub trait OfferCatalog: Send + Sync {
    /// Runs one search request and returns the offers on that page,
    /// in listing order.
    async fn search(&self, query: &OfferQuery) -> CatalogResult<Vec<Offer>>;

    /// Site origin used to resolve relative image paths.
    fn origin(&self) -> &url::Url;
}

/// Shared reqwest client configuration for catalog fetchers.
pub(crate) fn build_reqwest_client() -> CatalogResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(CatalogError::Http)
}

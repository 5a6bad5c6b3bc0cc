use async_trait::async_trait;
use scraper::Html;
use serde::Deserialize;
use url::Url;

use crate::catalog::parse::extract_offers;
use crate::catalog::{CatalogError, CatalogResult, OfferCatalog, OfferQuery, build_reqwest_client};
use crate::domain::offer::Offer;

/// JSON envelope the "load more" endpoint sometimes wraps its markup in.
#[derive(Debug, Deserialize)]
struct LoadMoreEnvelope {
    #[serde(default)]
    html: String,
}

/// Fetcher for the `maxima.lv` promotional-offer listing.
pub struct MaximaCatalog {
    base_url: Url,
    client: reqwest::Client,
}

impl MaximaCatalog {
    pub fn new(base_url: Url) -> CatalogResult<Self> {
        Ok(Self {
            base_url,
            client: build_reqwest_client()?,
        })
    }

    /// Builds the "load more" request URL for `query`. The `offset` and
    /// `categories[]` parameters are only sent when present; the endpoint
    /// treats their absence as the first page of the full listing.
    fn search_url(&self, query: &OfferQuery) -> CatalogResult<Url> {
        let mut url = self
            .base_url
            .join("ajax/salesloadmore")
            .map_err(|e| CatalogError::Build(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("sort_by", "newest");
            pairs.append_pair("limit", &query.limit.to_string());
            pairs.append_pair("search", "");
            pairs.append_pair("search1", &query.text);
            if let Some(offset) = query.offset {
                pairs.append_pair("offset", &offset.to_string());
            }
            if let Some(category) = query.category {
                pairs.append_pair("categories[]", category.id());
            }
        }
        Ok(url)
    }

    /// Unwraps the response body: the endpoint answers with either raw HTML
    /// or a JSON envelope whose `html` field holds the markup. JSON is
    /// tried first, the body is used as-is when decoding fails.
    fn unwrap_markup(body: String) -> String {
        match serde_json::from_str::<LoadMoreEnvelope>(&body) {
            Ok(envelope) => envelope.html,
            Err(_) => body,
        }
    }
}

#[async_trait]
impl OfferCatalog for MaximaCatalog {
    async fn search(&self, query: &OfferQuery) -> CatalogResult<Vec<Offer>> {
        let url = self.search_url(query)?;
        log::info!("Fetching offers from {url}");
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let document = Html::parse_document(&Self::unwrap_markup(body));
        Ok(extract_offers(&document))
    }

    fn origin(&self) -> &Url {
        &self.base_url
    }
}

//! Turns one catalog search into a stream of chat replies.

use async_trait::async_trait;
use teloxide::utils::html::escape;
use thiserror::Error;
use url::Url;

use crate::catalog::{CatalogError, OfferCatalog, OfferQuery};
use crate::domain::offer::Offer;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to deliver reply: {0}")]
    Delivery(String),
}

/// Outbound side of a conversation: whatever can deliver the three kinds
/// of reply a search produces. The Telegram binding implements this; tests
/// substitute a recorder.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), SearchError>;
    /// Sends formatted text (bold/strikethrough/italic HTML markup).
    async fn send_html(&self, html: &str) -> Result<(), SearchError>;
    async fn send_photo(&self, url: &Url) -> Result<(), SearchError>;
}

/// Formats one offer into the HTML caption sent after its photo. Absent
/// fields contribute no line at all. Scraped text arrives with entities
/// decoded, so every field is re-escaped for Telegram's HTML parse mode.
pub fn format_offer(offer: &Offer) -> String {
    let mut message = String::new();
    if let Some(old_price) = &offer.old_price {
        message.push_str(&format!("<strike>{}</strike>\n", escape(old_price)));
    }
    if let Some(new_price) = &offer.new_price {
        message.push_str(&format!("<b>{}</b>\n\n", escape(new_price)));
    }
    if let Some(discount) = offer.discount_text() {
        message.push_str(&format!("<b>{}</b>\n\n", escape(discount)));
    }
    message.push_str(&escape(&offer.title));
    if let Some(date) = &offer.date {
        message.push_str(&format!("\n\n<em>{}</em>", escape(date)));
    }
    message
}

/// Runs `query` against `catalog` and replies with every offer found: one
/// photo message followed by one caption message per offer, in listing
/// order. An empty page gets a single "Nothing found" reply.
///
/// Returns the number of offers on the page; a count equal to the page
/// limit is the caller's signal that more pages may exist.
pub async fn deliver_search<C, S>(
    catalog: &C,
    sink: &S,
    query: &OfferQuery,
) -> Result<usize, SearchError>
where
    C: OfferCatalog + ?Sized,
    S: ReplySink + ?Sized,
{
    let offers = catalog.search(query).await?;
    if offers.is_empty() {
        sink.send_text("Nothing found").await?;
        return Ok(0);
    }

    for offer in &offers {
        match offer.image_link(catalog.origin()) {
            Some(link) => sink.send_photo(&link).await?,
            // The image was scraped but does not resolve against the site
            // origin. Skip the tile rather than dropping the whole page.
            None => {
                log::warn!("Unresolvable image URL {:?} for {}", offer.image_url, offer.title);
                continue;
            }
        }
        sink.send_html(&format_offer(offer)).await?;
    }
    Ok(offers.len())
}

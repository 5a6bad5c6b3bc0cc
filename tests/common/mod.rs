//! Helpers for integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use maxima_discounts::search::{ReplySink, SearchError};

/// One offer tile in the shape the listing endpoint renders.
pub fn offer_tile(title: &str) -> String {
    format!(
        r#"<div class="col-third offer-item">
            <div class="img"><img src="/img/offers/{title}.png?v=2"></div>
            <div class="percents_wrapper">
                <span class="sign">-</span><span class="value">20</span><span class="per">%</span>
            </div>
            <div class="t1">
                <span class="value">2</span><span class="cents">99</span><span class="eur">€</span>
            </div>
            <div class="t3">
                <span class="value">3</span><span class="cents">99</span><span class="eur">€</span>
            </div>
            <div class="title">{title}</div>
            <div data-dates-interval="01.09. - 07.09."></div>
        </div>"#
    )
}

/// A listing page containing one tile per title.
pub fn listing(titles: &[&str]) -> String {
    titles.iter().map(|t| offer_tile(t)).collect()
}

#[derive(Debug, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Html(String),
    Photo(String),
}

/// Reply sink that records every outbound message.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingSink {
    pub fn into_sent(self) -> Vec<Sent> {
        self.sent.into_inner().unwrap()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_text(&self, text: &str) -> Result<(), SearchError> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_html(&self, html: &str) -> Result<(), SearchError> {
        self.sent.lock().unwrap().push(Sent::Html(html.to_string()));
        Ok(())
    }

    async fn send_photo(&self, url: &Url) -> Result<(), SearchError> {
        self.sent.lock().unwrap().push(Sent::Photo(url.to_string()));
        Ok(())
    }
}

//! Field extraction over the offer-listing markup.
//!
//! Every offer tile spells its prices and discount badges out as rows of
//! `span`s tagged with semantic class names (`value`, `cents`, `eur`,
//! `sign`, `per`). The extractors below concatenate those spans back into
//! the display strings the site renders, without assuming any span is
//! actually present.

use scraper::{ElementRef, Html, Selector};

use crate::domain::offer::Offer;

fn span_has_class(span: &ElementRef, class: &str) -> bool {
    span.value().classes().any(|c| c == class)
}

fn node_text(node: &ElementRef) -> String {
    node.text().collect::<String>()
}

/// Concatenates the price spans of `node` into a formatted price string:
/// `value` starts the accumulator, `cents` appends a comma and the text,
/// `eur` appends the currency sign. Returns an empty string when no
/// recognized span is found.
pub fn price_text(node: ElementRef) -> String {
    let selector = Selector::parse("span").unwrap();
    let mut price = String::new();
    for span in node.select(&selector) {
        if span_has_class(&span, "value") {
            price = node_text(&span);
        } else if span_has_class(&span, "cents") {
            price.push(',');
            price.push_str(&node_text(&span));
        } else if span_has_class(&span, "eur") {
            price.push_str(&node_text(&span));
        }
    }
    price
}

/// Concatenates the discount-badge spans of `node`: `sign` starts the
/// accumulator, `value` and `per` append their text. Returns an empty
/// string when no recognized span is found.
pub fn percent_text(node: ElementRef) -> String {
    let selector = Selector::parse("span").unwrap();
    let mut percent = String::new();
    for span in node.select(&selector) {
        if span_has_class(&span, "sign") {
            percent = node_text(&span);
        } else if span_has_class(&span, "value") || span_has_class(&span, "per") {
            percent.push_str(&node_text(&span));
        }
    }
    percent
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

/// Parses one offer tile into an [`Offer`].
///
/// The discount representation is chosen in fixed priority: the icon-badge
/// wrapper wins over the loyalty-card price, which wins over the generic
/// percent wrapper. Title and image are mandatory; a tile missing either
/// yields `None` and the rest of the listing is unaffected.
pub fn parse_tile(tile: ElementRef) -> Option<Offer> {
    let image = Selector::parse("div.img img").unwrap();
    let image_url = tile
        .select(&image)
        .next()
        .and_then(|img| img.value().attr("src"))?
        .to_string();

    let title = Selector::parse("div.title").unwrap();
    let title = tile
        .select(&title)
        .next()
        .map(|div| node_text(&div).trim().to_string())?;

    let badge = Selector::parse("div.bottom-icon").unwrap();
    let paldies = Selector::parse("div.t1.paldies-card").unwrap();
    let percent_wrapper = Selector::parse("div.percents_wrapper").unwrap();

    let mut percent = None;
    let mut paldies_price = None;
    if let Some(node) = tile.select(&badge).next() {
        percent = non_empty(percent_text(node));
    } else if let Some(node) = tile.select(&paldies).next() {
        paldies_price = non_empty(price_text(node));
    } else if let Some(node) = tile.select(&percent_wrapper).next() {
        percent = non_empty(percent_text(node));
    }

    let new_price = Selector::parse("div.t1").unwrap();
    let new_price = tile
        .select(&new_price)
        .next()
        .and_then(|div| non_empty(price_text(div)));

    let old_price = Selector::parse("div.t3").unwrap();
    let old_price = tile
        .select(&old_price)
        .next()
        .and_then(|div| non_empty(price_text(div)));

    // Several date nodes can appear on one tile; the listing renders the
    // last one, so the last one wins here too.
    let dates = Selector::parse("div[data-dates-interval]").unwrap();
    let date = tile
        .select(&dates)
        .filter_map(|div| div.value().attr("data-dates-interval"))
        .last()
        .map(str::to_string);

    Some(Offer {
        title,
        old_price,
        new_price,
        percent,
        paldies_price,
        image_url,
        date,
    })
}

/// Extracts every offer tile of `document` in listing order. Tiles that
/// cannot be parsed are logged and skipped.
pub fn extract_offers(document: &Html) -> Vec<Offer> {
    let tile = Selector::parse("div.col-third.offer-item").unwrap();
    document
        .select(&tile)
        .filter_map(|node| match parse_tile(node) {
            Some(offer) => Some(offer),
            None => {
                log::warn!("Skipping offer tile without title or image");
                None
            }
        })
        .collect()
}

use url::Url;

/// A single promotional item scraped from the offer listing.
///
/// All formatted fields keep the site's own presentation ("2,99 €", "-20%",
/// "01.09.2026 - 07.09.2026") so replies can show them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub title: String,
    /// Struck-through price before the discount.
    pub old_price: Option<String>,
    /// Price after the discount.
    pub new_price: Option<String>,
    /// Percent-off badge, e.g. "-20%".
    pub percent: Option<String>,
    /// Loyalty-card ("Paldies" card) price. Never set together with
    /// `percent` in the observed markup.
    pub paldies_price: Option<String>,
    /// Image path as it appears in the markup, relative to the site origin.
    pub image_url: String,
    /// Validity interval of the offer.
    pub date: Option<String>,
}

impl Offer {
    /// Builds the absolute image URL by joining `image_url` onto the site
    /// origin and cutting everything after the first `.png`. The listing
    /// appends cache-busting query strings Telegram refuses to fetch.
    pub fn image_link(&self, origin: &Url) -> Option<Url> {
        let joined = origin.join(&self.image_url).ok()?;
        let text = joined.as_str();
        match text.find(".png") {
            Some(pos) => Url::parse(&text[..pos + ".png".len()]).ok(),
            None => Some(joined),
        }
    }

    /// The discount line shown to the user: the percent badge when present,
    /// otherwise the loyalty-card price.
    pub fn discount_text(&self) -> Option<&str> {
        self.percent.as_deref().or(self.paldies_price.as_deref())
    }
}

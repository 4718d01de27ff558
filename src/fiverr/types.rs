//! Gig record types.

use serde::Serialize;

/// One scraped gig card, in page order. Fields that were missing on the card
/// hold their sentinel value instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GigRecord {
    /// 1-based position within the scraped page.
    #[serde(rename = "RANK")]
    pub rank: u32,
    #[serde(rename = "NAME")]
    pub name: String,
    /// Seller tier text.
    #[serde(rename = "LEVEL")]
    pub level: String,
    #[serde(rename = "RATING")]
    pub rating: String,
    /// Review count as shown on the card, parentheses stripped.
    #[serde(rename = "REVIEWS_COUNT")]
    pub reviews_count: String,
    #[serde(rename = "PRICE_STARTING_FROM")]
    pub price: String,
    /// Absolute gig URL, when the card carried a link.
    #[serde(rename = "GIG_LINKS")]
    pub gig_link: Option<String>,
}

/// Result of scraping one search page.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Extracted records, page order, ranks 1..N.
    pub records: Vec<GigRecord>,
    /// Gig URLs for records that carried one, in record order.
    pub gig_links: Vec<String>,
}

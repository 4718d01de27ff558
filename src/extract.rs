//! Gig-card extraction from rendered search-page HTML.
//!
//! Parsing is pure: it operates on the page source string captured from the
//! browser, so everything here is testable without a browser session.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::fiverr::{GigRecord, SearchResult};

pub const FIVERR_BASE_URL: &str = "https://www.fiverr.com";

/// Sentinel for text fields whose source element is missing.
pub const NOT_AVAILABLE: &str = "N/A";
/// Sentinel for a missing review count.
pub const NO_REVIEWS: &str = "0";

/// Card-container selectors, tried in order; the first one that matches
/// anything wins entirely. Later entries cover older markup revisions, so
/// matches are never merged across strategies.
const CARD_SELECTORS: &[&str] = &["div.gig-card-layout", "li.gig-card", "div.gig-wrapper"];

const NAME_SELECTOR: &str = "span.vp9lqtk";
const LEVEL_SELECTOR: &str = "p._1qwbi7a2";
const RATING_SELECTOR: &str = "strong.rating-score";
const REVIEWS_SELECTOR: &str = "span.ratings-count.roYp76D";
const PRICE_MARKER_SELECTOR: &str = "span.text-bold.co-grey-1200";
const LINK_SELECTOR: &str = "a[href]";

#[derive(Debug, Error)]
enum CardError {
    #[error("price marker present but inner span missing")]
    MalformedPrice,
}

/// Parse a fully-loaded search page into gig records.
///
/// Records keep page order with ranks 1..N; a card that fails to extract is
/// logged and skipped without consuming a rank, so ranks stay contiguous.
pub fn extract_gigs(html: &str) -> SearchResult {
    let document = Html::parse_document(html);
    let cards = select_cards(&document);

    let mut records = Vec::new();
    let mut gig_links = Vec::new();
    let mut rank: u32 = 1;

    for card in cards {
        match extract_card(&card, rank) {
            Ok(record) => {
                if let Some(link) = &record.gig_link {
                    gig_links.push(link.clone());
                }
                records.push(record);
                rank += 1;
            }
            Err(e) => {
                warn!("Error extracting gig data: {}", e);
            }
        }
    }

    SearchResult { records, gig_links }
}

/// Locate the card containers, first non-empty strategy wins.
fn select_cards(document: &Html) -> Vec<ElementRef<'_>> {
    for css in CARD_SELECTORS {
        let cards: Vec<ElementRef<'_>> = document.select(&selector(css)).collect();
        if !cards.is_empty() {
            debug!("{} gig cards matched by '{}'", cards.len(), css);
            return cards;
        }
    }
    Vec::new()
}

fn extract_card(card: &ElementRef<'_>, rank: u32) -> Result<GigRecord, CardError> {
    let name = text_of(card, NAME_SELECTOR).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let level = text_of(card, LEVEL_SELECTOR).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let rating = text_of(card, RATING_SELECTOR).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let reviews_count = extract_reviews(card).unwrap_or_else(|| NO_REVIEWS.to_string());
    let price = extract_price(card)?.unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let gig_link = extract_link(card);

    Ok(GigRecord {
        rank,
        name,
        level,
        rating,
        reviews_count,
        price,
        gig_link,
    })
}

/// Trimmed text of the first element matching `css` inside the card.
fn text_of(card: &ElementRef<'_>, css: &str) -> Option<String> {
    card.select(&selector(css))
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Review count with the surrounding parenthesis pair stripped:
/// `"(1,234)"` → `"1,234"`.
fn extract_reviews(card: &ElementRef<'_>) -> Option<String> {
    text_of(card, REVIEWS_SELECTOR).map(|raw| {
        let stripped = raw.strip_prefix('(').unwrap_or(&raw);
        let stripped = stripped.strip_suffix(')').unwrap_or(stripped);
        stripped.to_string()
    })
}

/// Starting price, nested inside a marker span. A missing marker yields the
/// sentinel; a marker without the inner span is malformed markup and fails
/// the whole card.
fn extract_price(card: &ElementRef<'_>) -> Result<Option<String>, CardError> {
    let marker = match card.select(&selector(PRICE_MARKER_SELECTOR)).next() {
        Some(marker) => marker,
        None => return Ok(None),
    };

    let inner = marker
        .select(&selector("span"))
        .next()
        .ok_or(CardError::MalformedPrice)?;

    Ok(Some(inner.text().collect::<String>().trim().to_string()))
}

/// First anchor href on the card, made absolute against the site base URL.
fn extract_link(card: &ElementRef<'_>) -> Option<String> {
    let href = card
        .select(&selector(LINK_SELECTOR))
        .next()
        .and_then(|a| a.value().attr("href"))?;

    if href.starts_with("http") {
        Some(href.to_string())
    } else {
        Some(format!("{}{}", FIVERR_BASE_URL, href))
    }
}

fn selector(css: &str) -> Selector {
    // All selectors here are fixed strings; parse cannot fail.
    Selector::parse(css).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(cards: &[&str]) -> String {
        format!("<html><body><div id=\"results\">{}</div></body></html>", cards.join("\n"))
    }

    const FULL_CARD: &str = r#"
        <div class="gig-card-layout">
          <a href="/alice/design-a-modern-logo">
            <span class="vp9lqtk">Alice D</span>
            <p class="_1qwbi7a2">Level 2</p>
            <strong class="rating-score">4.9</strong>
            <span class="ratings-count roYp76D">(1,234)</span>
            <span class="text-bold co-grey-1200">From <span>$25</span></span>
          </a>
        </div>"#;

    #[test]
    fn test_full_card_extraction() {
        let result = extract_gigs(&page(&[FULL_CARD]));
        assert_eq!(result.records.len(), 1);

        let record = &result.records[0];
        assert_eq!(record.rank, 1);
        assert_eq!(record.name, "Alice D");
        assert_eq!(record.level, "Level 2");
        assert_eq!(record.rating, "4.9");
        assert_eq!(record.reviews_count, "1,234");
        assert_eq!(record.price, "$25");
        assert_eq!(
            record.gig_link.as_deref(),
            Some("https://www.fiverr.com/alice/design-a-modern-logo")
        );
        assert_eq!(result.gig_links, vec!["https://www.fiverr.com/alice/design-a-modern-logo"]);
    }

    #[test]
    fn test_ranks_are_contiguous_in_page_order() {
        let cards = vec![FULL_CARD; 5];
        let result = extract_gigs(&page(&cards));
        assert_eq!(result.records.len(), 5);
        let ranks: Vec<u32> = result.records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_fallback_selector_li_gig_card() {
        let card = r#"<li class="gig-card"><span class="vp9lqtk">Bob</span></li>"#;
        let result = extract_gigs(&page(&[card, card]));
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].name, "Bob");
    }

    #[test]
    fn test_fallback_selector_gig_wrapper() {
        let card = r#"<div class="gig-wrapper"><span class="vp9lqtk">Cara</span></div>"#;
        let result = extract_gigs(&page(&[card]));
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name, "Cara");
    }

    #[test]
    fn test_first_matching_strategy_wins_entirely() {
        // Two primary cards plus three legacy cards on one page: only the
        // primary strategy's matches are extracted, never the sum.
        let primary = r#"<div class="gig-card-layout"><span class="vp9lqtk">New</span></div>"#;
        let legacy = r#"<li class="gig-card"><span class="vp9lqtk">Old</span></li>"#;
        let result = extract_gigs(&page(&[primary, legacy, primary, legacy, legacy]));
        assert_eq!(result.records.len(), 2);
        assert!(result.records.iter().all(|r| r.name == "New"));
    }

    #[test]
    fn test_missing_fields_yield_sentinels() {
        let card = r#"<div class="gig-card-layout"><span class="vp9lqtk">Dave</span></div>"#;
        let result = extract_gigs(&page(&[card]));
        assert_eq!(result.records.len(), 1);

        let record = &result.records[0];
        assert_eq!(record.name, "Dave");
        assert_eq!(record.level, "N/A");
        assert_eq!(record.rating, "N/A");
        assert_eq!(record.reviews_count, "0");
        assert_eq!(record.price, "N/A");
        assert_eq!(record.gig_link, None);
        assert!(result.gig_links.is_empty());
    }

    #[test]
    fn test_missing_rating_does_not_skip_record() {
        let card = r#"
            <div class="gig-card-layout">
              <span class="vp9lqtk">Eve</span>
              <span class="ratings-count roYp76D">(42)</span>
            </div>"#;
        let result = extract_gigs(&page(&[card]));
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].rating, "N/A");
        assert_eq!(result.records[0].reviews_count, "42");
    }

    #[test]
    fn test_reviews_parentheses_stripped_only() {
        let card = r#"
            <div class="gig-card-layout">
              <span class="ratings-count roYp76D">(1,234)</span>
            </div>"#;
        let result = extract_gigs(&page(&[card]));
        assert_eq!(result.records[0].reviews_count, "1,234");
    }

    #[test]
    fn test_reviews_without_parentheses_unchanged() {
        let card = r#"
            <div class="gig-card-layout">
              <span class="ratings-count roYp76D">987</span>
            </div>"#;
        let result = extract_gigs(&page(&[card]));
        assert_eq!(result.records[0].reviews_count, "987");
    }

    #[test]
    fn test_malformed_price_skips_card_but_not_page() {
        // Marker span with no inner span: the card is dropped, later cards
        // keep extracting and ranks stay contiguous.
        let malformed = r#"
            <div class="gig-card-layout">
              <span class="vp9lqtk">Broken</span>
              <span class="text-bold co-grey-1200">$10</span>
            </div>"#;
        let result = extract_gigs(&page(&[FULL_CARD, malformed, FULL_CARD]));
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].rank, 1);
        assert_eq!(result.records[1].rank, 2);
        assert!(result.records.iter().all(|r| r.name == "Alice D"));
    }

    #[test]
    fn test_absolute_link_kept_as_is() {
        let card = r#"
            <div class="gig-card-layout">
              <a href="https://www.fiverr.com/bob/gig">x</a>
            </div>"#;
        let result = extract_gigs(&page(&[card]));
        assert_eq!(
            result.records[0].gig_link.as_deref(),
            Some("https://www.fiverr.com/bob/gig")
        );
    }

    #[test]
    fn test_gig_links_skip_recordless_and_linkless_cards() {
        let linkless = r#"<div class="gig-card-layout"><span class="vp9lqtk">F</span></div>"#;
        let result = extract_gigs(&page(&[FULL_CARD, linkless]));
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.gig_links.len(), 1);
    }

    #[test]
    fn test_no_cards_yields_empty_result() {
        let result = extract_gigs("<html><body><p>no results</p></body></html>");
        assert!(result.records.is_empty());
        assert!(result.gig_links.is_empty());
    }
}

//! Fiverr search scraper module.
//!
//! One run drives a browser through a single search-results page and turns
//! the rendered gig cards into records.

mod scraper;
mod types;

pub use scraper::{search_url, FiverrScraper};
pub use types::{GigRecord, SearchResult};

//! Fiverr search-results scraper
//!
//! - Drives a Chromium session through one search-results page
//! - Extracts gig cards into ranked records
//! - Exports the records to an xlsx spreadsheet
//!
//! # Service usage
//!
//! ```rust,ignore
//! use fiverr_scraper::{ScraperService, ScrapeRequest};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!
//!     let request = ScrapeRequest::new("logo design").with_headless(true);
//!
//!     let result = service.call(request).await.unwrap();
//!     println!("Gigs found: {}", result.records.len());
//! }
//! ```
//!
//! # Direct scraper usage
//!
//! ```rust,ignore
//! use fiverr_scraper::{FiverrScraper, Scraper, ScraperConfig, save_results};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut scraper = FiverrScraper::new(ScraperConfig::default());
//!     let result = scraper.execute("logo design").await.unwrap();
//!     save_results(&result.records, "logo design", Path::new("scraped_data"));
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fiverr;
pub mod scroll;
pub mod service;
pub mod traits;

// Re-export the main types
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use export::save_results;
pub use extract::extract_gigs;
pub use fiverr::{search_url, FiverrScraper, GigRecord, SearchResult};
pub use scroll::{ScrollState, ScrollTracker};
pub use service::{ScrapeRequest, ScrapeResult, ScraperService};
pub use traits::Scraper;

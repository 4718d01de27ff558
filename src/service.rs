use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::{ScraperConfig, DEFAULT_OUTPUT_DIR};
use crate::error::ScraperError;
use crate::fiverr::{FiverrScraper, GigRecord};
use crate::traits::Scraper;

/// Scrape request
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub keyword: String,
    pub headless: bool,
    pub debug: bool,
    pub output_dir: PathBuf,
}

impl ScrapeRequest {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            headless: true,
            debug: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

impl From<ScrapeRequest> for ScraperConfig {
    fn from(req: ScrapeRequest) -> Self {
        ScraperConfig::default()
            .with_headless(req.headless)
            .with_debug(req.debug)
            .with_output_dir(req.output_dir)
    }
}

/// Scrape result
#[derive(Debug)]
pub struct ScrapeResult {
    pub keyword: String,
    pub records: Vec<GigRecord>,
    pub gig_links: Vec<String>,
}

/// Scraper service implementing tower::Service
#[derive(Debug, Clone, Default)]
pub struct ScraperService {
    // Room for future extensions (rate limiting, caching)
}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("Scrape request received: keyword={}", req.keyword);

        Box::pin(async move {
            let keyword = req.keyword.clone();
            let config: ScraperConfig = req.into();
            let mut scraper = FiverrScraper::new(config);

            let result = scraper.execute(&keyword).await?;

            info!(
                "Scrape completed: keyword={}, gigs={}",
                keyword,
                result.records.len()
            );

            Ok(ScrapeResult {
                keyword,
                records: result.records,
                gig_links: result.gig_links,
            })
        })
    }
}

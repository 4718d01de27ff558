use async_trait::async_trait;

use crate::error::ScraperError;
use crate::fiverr::SearchResult;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Browser startup
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// Scrape one search page for the keyword
    async fn scrape(&mut self, keyword: &str) -> Result<SearchResult, ScraperError>;

    /// Release browser resources
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// Full run (initialize → scrape → close). The browser is torn down on
    /// every exit path, including a failed scrape.
    async fn execute(&mut self, keyword: &str) -> Result<SearchResult, ScraperError> {
        self.initialize().await?;
        let scraped = self.scrape(keyword).await;
        let closed = self.close().await;
        let result = scraped?;
        closed?;
        Ok(result)
    }
}

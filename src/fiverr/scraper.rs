//! Fiverr search scraper implementation.
//!
//! Drives a Chromium session through one search: navigate, wait for the
//! results marker, scroll until the page stops growing, then hand the page
//! source to the extractor.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::extract::{extract_gigs, FIVERR_BASE_URL};
use crate::scroll::{ScrollState, ScrollTracker};
use crate::traits::Scraper;

use super::types::SearchResult;

/// Presence probe for the results page: either a gig name span or a card
/// container counts as "results are in".
const RESULTS_MARKER_PROBE: &str =
    r#"document.querySelector("span.vp9lqtk, .gig-card-layout") !== null"#;
/// Poll interval for the results-marker wait.
const READY_CHECK_INTERVAL_MS: u64 = 500;

/// Hides the automation flag before any site script runs.
const HIDE_WEBDRIVER_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// Build the search URL for a keyword. Only spaces need escaping here.
pub fn search_url(keyword: &str) -> String {
    format!(
        "{}/search/gigs?query={}",
        FIVERR_BASE_URL,
        keyword.replace(' ', "%20")
    )
}

/// Desktop Chrome user agent with the major version drawn from 90..=110.
fn build_user_agent() -> String {
    let version = rand::thread_rng().gen_range(90..=110);
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36",
        version
    )
}

pub struct FiverrScraper {
    config: ScraperConfig,
    browser: Option<Browser>,
    page: Option<Arc<Page>>,
}

impl FiverrScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            browser: None,
            page: None,
        }
    }

    fn get_page(&self) -> Result<&Arc<Page>, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("browser not initialized".into()))
    }

    /// Poll for the results marker until it appears or the configured
    /// timeout elapses. A timeout is a normal outcome (zero results or a
    /// slow page), reported as `Ok(false)`.
    async fn wait_for_results(&self, page: &Page) -> Result<bool, ScraperError> {
        let start = Instant::now();

        while start.elapsed() < self.config.page_ready_timeout {
            match page.evaluate(RESULTS_MARKER_PROBE).await {
                Ok(result) => {
                    if result.into_value::<bool>().unwrap_or(false) {
                        debug!("Results marker present after {:?}", start.elapsed());
                        return Ok(true);
                    }
                }
                Err(e) => {
                    debug!("Results marker check error: {}", e);
                }
            }

            sleep(Duration::from_millis(READY_CHECK_INTERVAL_MS)).await;
        }

        Ok(false)
    }

    /// Scroll to the bottom until the page height stops growing for the
    /// configured number of consecutive measurements. No overall time cap:
    /// slow-loading content resets the stagnation count.
    async fn scroll_to_end(&self, page: &Page) -> Result<(), ScraperError> {
        info!("Scrolling to load all gigs...");

        let initial = Self::measure_height(page).await?;
        let mut tracker = ScrollTracker::new(initial, self.config.stagnation_threshold);

        loop {
            page.evaluate("window.scrollTo(0, document.body.scrollHeight);")
                .await
                .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

            sleep(self.scroll_pause()).await;

            let height = Self::measure_height(page).await?;
            match tracker.observe(height) {
                ScrollState::Grew => {}
                ScrollState::Stagnant => sleep(self.config.stagnation_pause).await,
                ScrollState::Settled => break,
            }
        }

        debug!("Page height settled at {}", tracker.last_height());
        Ok(())
    }

    /// Uniform random pause within the configured range, mimicking human
    /// scroll pacing while lazy content loads.
    fn scroll_pause(&self) -> Duration {
        let min = self.config.scroll_pause_min.as_secs_f64();
        let max = self.config.scroll_pause_max.as_secs_f64();
        Duration::from_secs_f64(rand::thread_rng().gen_range(min..=max))
    }

    async fn measure_height(page: &Page) -> Result<i64, ScraperError> {
        let result = page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        Ok(result.into_value::<i64>().unwrap_or(0))
    }

    async fn capture_debug_screenshot(&self, page: &Page) {
        match page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
        {
            Ok(screenshot) => {
                use base64::Engine;
                let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
                debug!("Results screenshot: data:image/png;base64,{}", encoded);
            }
            Err(e) => debug!("Failed to capture screenshot: {}", e),
        }
    }
}

#[async_trait]
impl Scraper for FiverrScraper {
    async fn initialize(&mut self) -> Result<(), ScraperError> {
        info!("Initializing browser...");

        // Unique profile dir per run
        let unique_id = format!(
            "{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );
        let user_data_dir = std::env::temp_dir().join(format!("fiverr-scraper-{}", unique_id));

        let mut builder = BrowserConfig::builder()
            .window_size(self.config.window_width, self.config.window_height)
            .user_data_dir(&user_data_dir)
            .no_sandbox()
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--disable-extensions")
            .arg("--disable-dev-shm-usage")
            .arg("--log-level=3")
            .arg(format!("--user-agent={}", build_user_agent()));

        // Optional executable override, e.g. in containers
        if let Ok(chrome_path) =
            std::env::var("CHROME_PATH").or_else(|_| std::env::var("CHROMIUM_PATH"))
        {
            builder = builder.chrome_executable(chrome_path);
        }

        if self.config.headless {
            builder = builder.arg("--headless=new");
        } else {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(format!("browser config error: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // Drain browser events in the background
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // Must be installed before the first navigation so site scripts
        // never observe navigator.webdriver.
        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
            HIDE_WEBDRIVER_SCRIPT,
        ))
        .await
        .map_err(|e| ScraperError::BrowserInit(format!("stealth script error: {}", e)))?;

        self.browser = Some(browser);
        self.page = Some(Arc::new(page));

        info!("Browser initialized");
        Ok(())
    }

    async fn scrape(&mut self, keyword: &str) -> Result<SearchResult, ScraperError> {
        let page = self.get_page()?.clone();
        let url = search_url(keyword);

        info!("Starting scrape for: {}", keyword);
        page.goto(url.as_str())
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        if !self.wait_for_results(&page).await? {
            warn!("Timeout waiting for the page. No results or page too slow.");
            return Ok(SearchResult::default());
        }

        self.scroll_to_end(&page).await?;

        if self.config.debug {
            self.capture_debug_screenshot(&page).await;
        }

        let html = page
            .content()
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        let result = extract_gigs(&html);
        info!("Found {} gigs on first page", result.records.len());

        Ok(result)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        info!("Closing browser...");

        self.page = None;
        self.browser = None;

        Ok(())
    }
}

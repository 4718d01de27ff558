use std::io::{self, Write as _};
use std::path::Path;
use std::time::Instant;

use tower::Service;
use tracing::error;

use fiverr_scraper::config::DEFAULT_OUTPUT_DIR;
use fiverr_scraper::{save_results, ScrapeRequest, ScraperService};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    print!("Enter search keyword: ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if let Err(e) = io::stdin().read_line(&mut input) {
        error!("Failed to read keyword: {}", e);
        return;
    }

    let keyword = input.trim().to_string();
    if keyword.is_empty() {
        println!("No keyword provided! Exiting.");
        return;
    }

    println!("\nStarting Fiverr scrape for '{}'...", keyword);
    let start = Instant::now();

    let mut service = ScraperService::new();
    match service.call(ScrapeRequest::new(keyword.as_str())).await {
        Ok(result) => {
            let _ = save_results(&result.records, &keyword, Path::new(DEFAULT_OUTPUT_DIR));
        }
        Err(e) => error!("Scrape failed: {}", e),
    }

    println!(
        "\nScraping completed in {:.2} seconds",
        start.elapsed().as_secs_f64()
    );
}

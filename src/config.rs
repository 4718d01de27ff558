use std::path::PathBuf;
use std::time::Duration;

/// Default directory for exported spreadsheets.
pub const DEFAULT_OUTPUT_DIR: &str = "scraped_data";

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub headless: bool,
    pub debug: bool,
    pub output_dir: PathBuf,
    /// How long to wait for the results marker after navigation.
    pub page_ready_timeout: Duration,
    /// Pause range after each scroll, drawn uniformly per scroll.
    pub scroll_pause_min: Duration,
    pub scroll_pause_max: Duration,
    /// Extra pause after a scroll that produced no height growth.
    pub stagnation_pause: Duration,
    /// Consecutive unchanged height measurements before scrolling stops.
    /// Tuned empirically against Fiverr's lazy loading.
    pub stagnation_threshold: u32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            debug: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            page_ready_timeout: Duration::from_secs(15),
            scroll_pause_min: Duration::from_millis(1500),
            scroll_pause_max: Duration::from_millis(3500),
            stagnation_pause: Duration::from_secs(1),
            stagnation_threshold: 3,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
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

    pub fn with_page_ready_timeout(mut self, timeout: Duration) -> Self {
        self.page_ready_timeout = timeout;
        self
    }

    pub fn with_scroll_pause_range(mut self, min: Duration, max: Duration) -> Self {
        self.scroll_pause_min = min;
        self.scroll_pause_max = max;
        self
    }

    pub fn with_stagnation_threshold(mut self, threshold: u32) -> Self {
        self.stagnation_threshold = threshold;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert!(!config.debug);
        assert_eq!(config.output_dir, PathBuf::from("scraped_data"));
        assert_eq!(config.page_ready_timeout, Duration::from_secs(15));
        assert_eq!(config.scroll_pause_min, Duration::from_millis(1500));
        assert_eq!(config.scroll_pause_max, Duration::from_millis(3500));
        assert_eq!(config.stagnation_threshold, 3);
        assert_eq!((config.window_width, config.window_height), (1920, 1080));
    }

    #[test]
    fn test_config_builder() {
        let config = ScraperConfig::new()
            .with_headless(false)
            .with_debug(true)
            .with_output_dir("/tmp/exports")
            .with_page_ready_timeout(Duration::from_secs(30))
            .with_stagnation_threshold(5)
            .with_window_size(1280, 800);

        assert!(!config.headless);
        assert!(config.debug);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.page_ready_timeout, Duration::from_secs(30));
        assert_eq!(config.stagnation_threshold, 5);
        assert_eq!((config.window_width, config.window_height), (1280, 800));
    }
}

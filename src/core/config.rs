use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DOMAIN: &str = "https://www.amazon.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
pub const DEFAULT_SEARCH_BOX_SELECTOR: &str = "input#twotabsearchtextbox";

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub domain: Url,
    pub search_box_selector: String,
    /// Settle delay after opening the first listing page of a job.
    pub start_page_delay: Duration,
    /// Settle delay after opening each paginated listing page.
    pub listing_page_delay: Duration,
    /// Bounded wait for the product heading.
    pub product_wait: Duration,
    /// Harvest `1..=max_page` instead of `1..max_page`.
    pub include_last_page: bool,
    pub output_root: PathBuf,
    pub log_root: PathBuf,
    pub webdriver_url: String,
    pub user_agent: String,
    pub headless: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            domain: Url::parse(DEFAULT_DOMAIN).expect("default domain is a valid URL"),
            search_box_selector: DEFAULT_SEARCH_BOX_SELECTOR.to_string(),
            start_page_delay: Duration::from_secs(3),
            listing_page_delay: Duration::from_secs(5),
            product_wait: Duration::from_secs(30),
            include_last_page: false,
            output_root: PathBuf::from("result"),
            log_root: PathBuf::from("logs"),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headless: true,
        }
    }
}

impl CrawlerConfig {
    pub fn with_domain(mut self, domain: Url) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_search_box_selector(mut self, selector: impl Into<String>) -> Self {
        self.search_box_selector = selector.into();
        self
    }

    pub fn with_delays(mut self, start_page: Duration, listing_page: Duration) -> Self {
        self.start_page_delay = start_page;
        self.listing_page_delay = listing_page;
        self
    }

    pub fn with_product_wait(mut self, wait: Duration) -> Self {
        self.product_wait = wait;
        self
    }

    pub fn with_include_last_page(mut self, include: bool) -> Self {
        self.include_last_page = include;
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_log_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.log_root = root.into();
        self
    }

    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

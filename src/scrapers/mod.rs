pub mod mock_scraper;
pub mod webdriver_scraper;

mod scraper;
pub use mock_scraper::MockScraper;
pub use self::scraper::Scraper;
pub use webdriver_scraper::WebDriverScraper;

use log::debug;
use url::Url;

use super::config::CrawlerConfig;
use super::record::ProductRecord;
use crate::parser::product::{self, TITLE_SELECTOR};
use crate::parser::Document;
use crate::{Scraper, ScraperError, ScraperResult};

/// Loads one product page and resolves every field from a single snapshot.
pub struct ProductExtractor<'a> {
    scraper: &'a dyn Scraper,
    config: &'a CrawlerConfig,
}

impl<'a> ProductExtractor<'a> {
    pub fn new(scraper: &'a dyn Scraper, config: &'a CrawlerConfig) -> Self {
        Self { scraper, config }
    }

    /// The heading doubles as the readiness signal for the page.
    pub async fn extract(&self, url: &Url) -> ScraperResult<ProductRecord> {
        let source = self
            .scraper
            .fetch_when_ready(url, TITLE_SELECTOR, self.config.product_wait)
            .await
            .map_err(|e| match e {
                ScraperError::Timeout { .. } => ScraperError::ExtractionError(e.to_string()),
                other => other,
            })?;
        self.scraper.stats().record_product_page();

        let record = product::extract_record(&Document::parse(&source), url)?;
        debug!("Extracted {:?} from {}", record.title, url);
        Ok(record)
    }
}

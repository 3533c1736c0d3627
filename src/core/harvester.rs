use log::info;
use url::Url;

use super::config::CrawlerConfig;
use super::record::ProductLink;
use crate::parser::{listing, Document};
use crate::{ScraperResult, Scraper};

/// Walks the result pages of one listing and collects product links.
pub struct Harvester<'a> {
    scraper: &'a dyn Scraper,
    config: &'a CrawlerConfig,
}

impl<'a> Harvester<'a> {
    pub fn new(scraper: &'a dyn Scraper, config: &'a CrawlerConfig) -> Self {
        Self { scraper, config }
    }

    /// Page numbers that will be visited for a listing reporting `max_page`.
    ///
    /// The last page is left out unless `include_last_page` is set.
    pub fn page_range(&self, max_page: usize) -> std::ops::RangeInclusive<usize> {
        let last = if self.config.include_last_page {
            max_page
        } else {
            max_page.saturating_sub(1)
        };
        1..=last
    }

    pub async fn harvest(&self, start_url: &Url) -> ScraperResult<Vec<ProductLink>> {
        let source = self
            .scraper
            .fetch_settled(start_url, self.config.start_page_delay)
            .await?;
        let max_page = listing::max_page(&Document::parse(&source))?;
        info!("Listing {} reports {} pages", start_url, max_page);

        let mut links = Vec::new();
        for page_index in self.page_range(max_page) {
            let url = listing::page_url(start_url, page_index)?;
            let source = self
                .scraper
                .fetch_settled(&url, self.config.listing_page_delay)
                .await?;
            let page_links = listing::product_links(&Document::parse(&source), &self.config.domain);

            info!(
                "Page {} of {}: {} product links",
                page_index,
                max_page,
                page_links.len()
            );
            self.scraper.stats().record_listing_page(page_links.len());
            links.extend(page_links);
        }

        Ok(links)
    }
}

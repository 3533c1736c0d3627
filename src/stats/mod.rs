use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub jobs_started: usize,
    pub jobs_aborted: usize,
    pub listing_pages: usize,
    pub product_pages: usize,
    pub links_found: usize,
    pub records_written: usize,
    pub extraction_failures: usize,
    pub average_fetch_time: f64, // in milliseconds
    #[serde(skip)]
    fetches: usize,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats {
                start_time: Utc::now(),
                end_time: None,
                jobs_started: 0,
                jobs_aborted: 0,
                listing_pages: 0,
                product_pages: 0,
                links_found: 0,
                records_written: 0,
                extraction_failures: 0,
                average_fetch_time: 0.0,
                fetches: 0,
            })),
        }
    }

    pub fn record_fetch(&self, duration: Duration) {
        let mut stats = self.stats.write();
        stats.fetches += 1;

        let current_total = stats.average_fetch_time * (stats.fetches - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_fetch_time = (current_total + new_duration) / stats.fetches as f64;
    }

    pub fn record_job_started(&self) {
        self.stats.write().jobs_started += 1;
    }

    pub fn record_job_aborted(&self) {
        self.stats.write().jobs_aborted += 1;
    }

    pub fn record_listing_page(&self, links: usize) {
        let mut stats = self.stats.write();
        stats.listing_pages += 1;
        stats.links_found += links;
    }

    pub fn record_product_page(&self) {
        self.stats.write().product_pages += 1;
    }

    pub fn record_written(&self) {
        self.stats.write().records_written += 1;
    }

    pub fn record_failure(&self) {
        self.stats.write().extraction_failures += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nHarvest Statistics:");
        println!("===================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Jobs: {} ({} aborted)", stats.jobs_started, stats.jobs_aborted);
        println!("Listing Pages: {}", stats.listing_pages);
        println!("Product Links: {}", stats.links_found);
        println!("Product Pages: {}", stats.product_pages);
        println!("Records Written: {}", stats.records_written);
        println!("Extraction Failures: {}", stats.extraction_failures);
        println!("Average Fetch Time: {:.2}ms", stats.average_fetch_time);
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

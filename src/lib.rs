pub mod core;
pub mod logger;
pub mod parser;
pub mod scrapers;
pub mod stats;
pub mod storage;

pub use crate::core::{CrawlContext, Crawler, CrawlerConfig, Job, JobKind, ProductRecord};
pub use crate::core::{ScraperError, ScraperResult};
pub use logger::RunLog;
pub use parser::Document;
pub use scrapers::Scraper;
pub use stats::StatsTracker;
pub use storage::CsvStorage;

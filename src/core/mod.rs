pub mod config;
pub mod crawler;
mod errors;
pub mod extractor;
pub mod harvester;
pub mod job;
pub mod record;

pub use config::CrawlerConfig;
pub use crawler::{CrawlContext, Crawler, JobReport, ProductOutcome};
pub use errors::{ScraperError, ScraperResult};
pub use extractor::ProductExtractor;
pub use harvester::Harvester;
pub use job::{parse_query_jobs, parse_url_jobs, Job, JobKind, Mode};
pub use record::{ProductLink, ProductRecord, CSV_HEADER};

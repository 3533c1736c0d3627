use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use super::config::CrawlerConfig;
use super::extractor::ProductExtractor;
use super::harvester::Harvester;
use super::job::{Job, JobKind};
use crate::logger::RunLog;
use crate::parser::listing::RESULT_CARD_SELECTOR;
use crate::stats::StatsTracker;
use crate::storage::StorageBackend;
use crate::{Scraper, ScraperError, ScraperResult};

/// Everything a run needs, built once and handed to the crawler.
pub struct CrawlContext {
    pub scraper: Box<dyn Scraper>,
    pub storage: Box<dyn StorageBackend>,
    pub log: RunLog,
    pub config: CrawlerConfig,
}

/// Result of one product step. Failures stay inside the job.
#[derive(Debug)]
pub enum ProductOutcome {
    Stored { title: String },
    Failed { url: Url, error: ScraperError },
}

#[derive(Debug)]
pub struct JobReport {
    pub output_name: String,
    pub start_url: Url,
    pub links_found: usize,
    pub records_written: usize,
    pub failures: Vec<(Url, String)>,
    pub elapsed: Duration,
}

pub struct Crawler {
    context: CrawlContext,
    stats: Arc<StatsTracker>,
}

impl Crawler {
    pub fn new(context: CrawlContext) -> Self {
        info!("Initializing crawler");
        let stats = Arc::new(StatsTracker::new());
        let mut context = context;
        context.scraper.set_stats(Arc::clone(&stats));

        Self { context, stats }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn log(&self) -> &RunLog {
        &self.context.log
    }

    /// Runs every job in order on the shared browser session. A fatal error
    /// ends only the job it happened in.
    pub async fn run_all(&self, jobs: &[Job]) -> Vec<ScraperResult<JobReport>> {
        let mut results = Vec::with_capacity(jobs.len());
        for job in jobs {
            let log = &self.context.log;
            let started = Instant::now();
            log.info(format!("The analysis of {} has begun...", job));

            let result = self.run(job).await;
            if let Err(e) = &result {
                log.error(e.to_string());
            }

            log.info(format!("Analysis of {} is finished", job));
            log.info(format!(
                "It took {} seconds to analyze",
                started.elapsed().as_secs_f64()
            ));
            results.push(result);
        }
        results
    }

    /// Resolving -> Harvesting -> Extracting. Only resolving, output setup and
    /// harvesting errors escape, wrapped as `ScraperError::FatalJob`.
    pub async fn run(&self, job: &Job) -> ScraperResult<JobReport> {
        let started = Instant::now();
        let name = job.output_name.as_str();
        self.stats.record_job_started();

        let prepared = self.prepare(job).await;
        let (start_url, links) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.stats.record_job_aborted();
                return Err(ScraperError::fatal(name, e));
            }
        };
        info!("Harvested {} product links for {}", links.len(), job);

        let mut report = JobReport {
            output_name: name.to_string(),
            start_url,
            links_found: links.len(),
            records_written: 0,
            failures: Vec::new(),
            elapsed: Duration::ZERO,
        };

        for link in &links {
            match self.process_product(name, link).await {
                ProductOutcome::Stored { title } => {
                    report.records_written += 1;
                    self.stats.record_written();
                    self.context
                        .log
                        .info(format!("Product '{}' was written to csv file", title));
                }
                ProductOutcome::Failed { url, error } => {
                    self.stats.record_failure();
                    self.context.log.error(format!("{}: {}", url, error));
                    report.failures.push((url, error.to_string()));
                }
            }
        }

        report.elapsed = started.elapsed();
        debug!("{:?}", report);
        Ok(report)
    }

    async fn prepare(&self, job: &Job) -> ScraperResult<(Url, Vec<Url>)> {
        self.context.storage.initialize(&job.output_name).await?;
        let start_url = self.resolve(job).await?;
        let harvester = Harvester::new(self.context.scraper.as_ref(), &self.context.config);
        let links = harvester.harvest(&start_url).await?;
        Ok((start_url, links))
    }

    /// Turns a job into the URL of its first listing page.
    pub async fn resolve(&self, job: &Job) -> ScraperResult<Url> {
        match &job.kind {
            JobKind::Url { start_url } => Ok(start_url.clone()),
            JobKind::Query { text } => {
                let scraper = self.context.scraper.as_ref();
                let config = &self.context.config;

                scraper.navigate(&config.domain).await?;
                scraper.send_keys(&config.search_box_selector, text).await?;
                scraper.submit_key(&config.search_box_selector).await?;
                scraper
                    .wait_for_element(RESULT_CARD_SELECTOR, config.product_wait)
                    .await?;

                let url = scraper.current_url().await?;
                info!("Search for {:?} resolved to {}", text, url);
                Ok(url)
            }
        }
    }

    /// Extracts and stores one product. Never fails: errors come back as
    /// `ProductOutcome::Failed`.
    pub async fn process_product(&self, output_name: &str, url: &Url) -> ProductOutcome {
        let extractor = ProductExtractor::new(self.context.scraper.as_ref(), &self.context.config);

        let result = async {
            let record = extractor.extract(url).await?;
            self.context.storage.store(output_name, &record).await?;
            Ok::<_, ScraperError>(record.title)
        }
        .await;

        match result {
            Ok(title) => ProductOutcome::Stored { title },
            Err(error) => {
                warn!("Skipping {}: {}", url, error);
                ProductOutcome::Failed {
                    url: url.clone(),
                    error,
                }
            }
        }
    }

    /// Closes the browser session and freezes the statistics.
    pub async fn shutdown(self) -> ScraperResult<()> {
        self.stats.finish();
        self.context.scraper.close().await
    }
}

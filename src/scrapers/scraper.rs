use crate::{ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// A single browser session. Every call acts on the page the session is
/// currently showing.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn navigate(&self, url: &Url) -> ScraperResult<()>;
    async fn current_url(&self) -> ScraperResult<Url>;
    async fn page_source(&self) -> ScraperResult<String>;
    /// Fails with `ScraperError::Timeout` if `selector` is still absent after `timeout`.
    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> ScraperResult<()>;
    async fn send_keys(&self, selector: &str, text: &str) -> ScraperResult<()>;
    /// Presses Enter inside the element matching `selector`.
    async fn submit_key(&self, selector: &str) -> ScraperResult<()>;
    async fn close(&self) -> ScraperResult<()>;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    /// Navigates, sleeps for `delay` to let scripts render, then returns the page source.
    async fn fetch_settled(&self, url: &Url, delay: Duration) -> ScraperResult<String> {
        let start_time = Utc::now();
        info!("Fetching URL: {}", url);

        self.navigate(url).await?;
        sleep(delay).await;
        let source = self.page_source().await?;
        debug!("Received page: url={}, body_length={}", url, source.len());

        self.stats()
            .record_fetch(Utc::now().signed_duration_since(start_time));
        Ok(source)
    }

    /// Navigates and returns the page source once `selector` is present.
    async fn fetch_when_ready(
        &self,
        url: &Url,
        selector: &str,
        timeout: Duration,
    ) -> ScraperResult<String> {
        let start_time = Utc::now();
        info!("Fetching URL: {}", url);

        self.navigate(url).await?;
        self.wait_for_element(selector, timeout).await?;
        let source = self.page_source().await?;
        debug!("Received page: url={}, body_length={}", url, source.len());

        self.stats()
            .record_fetch(Utc::now().signed_duration_since(start_time));
        Ok(source)
    }
}

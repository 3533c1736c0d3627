use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use log::{debug, info};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::Scraper;
use crate::core::CrawlerConfig;
use crate::{ScraperError, ScraperResult, StatsTracker};

/// WebDriver code point for the Enter key.
const ENTER_KEY: &str = "\u{E007}";

/// Drives Chrome through a running WebDriver server (chromedriver, selenium).
#[derive(Clone)]
pub struct WebDriverScraper {
    client: Client,
    stats: Arc<StatsTracker>,
}

impl WebDriverScraper {
    pub async fn connect(config: &CrawlerConfig) -> ScraperResult<Self> {
        info!("Connecting to WebDriver at {}", config.webdriver_url);
        let mut builder = ClientBuilder::native();
        builder.capabilities(Self::capabilities(config));
        let client = builder.connect(&config.webdriver_url).await?;
        info!("WebDriver session ready");

        Ok(Self {
            client,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    pub fn capabilities(config: &CrawlerConfig) -> Capabilities {
        let mut args = vec![
            format!("user-agent={}", config.user_agent),
            "--disable-notifications".to_string(),
        ];
        if config.headless {
            args.extend(
                [
                    "--no-sandbox",
                    "--headless",
                    "--disable-gpu",
                    "--disable-dev-shm-usage",
                    "--profile-directory=Profile_1",
                ]
                .map(String::from),
            );
        }

        let mut capabilities = Capabilities::new();
        capabilities.insert("browserName".to_string(), Value::from("chrome"));
        capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        capabilities
    }
}

#[async_trait]
impl Scraper for WebDriverScraper {
    async fn navigate(&self, url: &Url) -> ScraperResult<()> {
        self.client.goto(url.as_str()).await?;
        Ok(())
    }

    async fn current_url(&self) -> ScraperResult<Url> {
        Ok(self.client.current_url().await?)
    }

    async fn page_source(&self) -> ScraperResult<String> {
        Ok(self.client.source().await?)
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> ScraperResult<()> {
        debug!("Waiting up to {:?} for `{}`", timeout, selector);
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(ScraperError::Timeout {
                url: self.current_url().await.map(|u| u.to_string()).unwrap_or_default(),
                selector: selector.to_string(),
                timeout,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn send_keys(&self, selector: &str, text: &str) -> ScraperResult<()> {
        let element = self.client.find(Locator::Css(selector)).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn submit_key(&self, selector: &str) -> ScraperResult<()> {
        self.send_keys(selector, ENTER_KEY).await
    }

    async fn close(&self) -> ScraperResult<()> {
        info!("Closing WebDriver session");
        self.client.clone().close().await?;
        Ok(())
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}

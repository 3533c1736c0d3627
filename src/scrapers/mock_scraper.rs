use crate::{ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use parking_lot::RwLock;
use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::Scraper;

/// In-memory browser: serves canned HTML per URL and records every navigation.
#[derive(Clone, Default)]
pub struct MockScraper {
    pages: Arc<HashMap<String, String>>,
    failing: Arc<HashSet<String>>,
    search_url: Option<Url>,
    current: Arc<RwLock<Option<Url>>>,
    typed: Arc<RwLock<String>>,
    navigations: Arc<RwLock<Vec<Url>>>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.pages).insert(normalize(url), body.into());
        self
    }

    /// Navigating to `url` fails as if the browser lost the connection.
    pub fn with_failure(mut self, url: &str) -> Self {
        Arc::make_mut(&mut self.failing).insert(normalize(url));
        self
    }

    /// Pressing Enter in a search box lands on `url` with `k=<typed text>`.
    pub fn with_search_results(mut self, url: &str) -> Self {
        self.search_url = Some(Url::parse(url).expect("valid mock search url"));
        self
    }

    pub fn navigations(&self) -> Vec<Url> {
        self.navigations.read().clone()
    }

    pub fn navigated_paths(&self) -> Vec<String> {
        self.navigations
            .read()
            .iter()
            .map(|u| match u.query() {
                Some(q) => format!("{}?{}", u.path(), q),
                None => u.path().to_string(),
            })
            .collect()
    }

    fn current_body(&self) -> Option<String> {
        let current = self.current.read();
        current
            .as_ref()
            .and_then(|url| self.pages.get(url.as_str()).cloned())
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

fn contains_element(body: &str, selector: &str) -> ScraperResult<bool> {
    let selector = Selector::parse(selector)
        .map_err(|e| ScraperError::NavigationError(format!("bad selector {selector:?}: {e}")))?;
    Ok(Html::parse_document(body).select(&selector).next().is_some())
}

#[async_trait]
impl Scraper for MockScraper {
    async fn navigate(&self, url: &Url) -> ScraperResult<()> {
        self.navigations.write().push(url.clone());
        if self.failing.contains(url.as_str()) {
            return Err(ScraperError::NavigationError(format!(
                "connection reset while loading {}",
                url
            )));
        }
        *self.current.write() = Some(url.clone());
        Ok(())
    }

    async fn current_url(&self) -> ScraperResult<Url> {
        self.current
            .read()
            .clone()
            .ok_or_else(|| ScraperError::NavigationError("no page loaded".to_string()))
    }

    async fn page_source(&self) -> ScraperResult<String> {
        Ok(self
            .current_body()
            .unwrap_or_else(|| "<html><head></head><body></body></html>".to_string()))
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> ScraperResult<()> {
        let body = self.current_body().unwrap_or_default();
        if contains_element(&body, selector)? {
            return Ok(());
        }
        Err(ScraperError::Timeout {
            url: self
                .current
                .read()
                .as_ref()
                .map(|u| u.to_string())
                .unwrap_or_default(),
            selector: selector.to_string(),
            timeout,
        })
    }

    async fn send_keys(&self, selector: &str, text: &str) -> ScraperResult<()> {
        let body = self.current_body().unwrap_or_default();
        if !contains_element(&body, selector)? {
            return Err(ScraperError::NavigationError(format!(
                "no element matches `{}`",
                selector
            )));
        }
        self.typed.write().push_str(text);
        Ok(())
    }

    async fn submit_key(&self, selector: &str) -> ScraperResult<()> {
        let Some(search_url) = &self.search_url else {
            return Err(ScraperError::NavigationError(format!(
                "nothing to submit from `{}`",
                selector
            )));
        };
        let mut target = search_url.clone();
        let typed = std::mem::take(&mut *self.typed.write());
        target.query_pairs_mut().append_pair("k", &typed);
        self.navigate(&target).await
    }

    async fn close(&self) -> ScraperResult<()> {
        *self.current.write() = None;
        Ok(())
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}

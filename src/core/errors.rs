use crate::storage::base::StorageError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("WebDriver error: {0}")]
    WebDriverError(#[from] fantoccini::error::CmdError),

    #[error("WebDriver session error: {0}")]
    SessionError(#[from] fantoccini::error::NewSessionError),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Timed out after {}s waiting for `{selector}` on {url}", .timeout.as_secs())]
    Timeout {
        url: String,
        selector: String,
        timeout: Duration,
    },

    #[error("Pagination error: {0}")]
    PaginationError(String),

    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Job `{job}` aborted: {source}")]
    FatalJob {
        job: String,
        #[source]
        source: Box<ScraperError>,
    },
}

impl ScraperError {
    pub fn fatal(job: impl Into<String>, source: ScraperError) -> Self {
        match source {
            ScraperError::FatalJob { .. } => source,
            other => ScraperError::FatalJob {
                job: job.into(),
                source: Box::new(other),
            },
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ScraperError::FatalJob { .. })
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::{ScraperError, ScraperResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// Typed into the site's search box.
    Query { text: String },
    /// A listing URL used as is.
    Url { start_url: Url },
}

/// One unit of work producing one output file named after `output_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub kind: JobKind,
    pub output_name: String,
}

impl Job {
    pub fn query(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            output_name: text.clone(),
            kind: JobKind::Query { text },
        }
    }

    pub fn url(output_name: impl Into<String>, start_url: Url) -> Self {
        Self {
            kind: JobKind::Url { start_url },
            output_name: output_name.into(),
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            JobKind::Query { text } => write!(f, "the search query \"{}\"", text),
            JobKind::Url { start_url } => write!(f, "the url \"{}\"", start_url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Query,
    Url,
}

impl FromStr for Mode {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "query" => Ok(Mode::Query),
            "url" => Ok(Mode::Url),
            other => Err(ScraperError::InputError(format!("unknown mode {:?}", other))),
        }
    }
}

/// `phone, charger, headphones` -> one query job per entry.
pub fn parse_query_jobs(input: &str) -> Vec<Job> {
    input
        .split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(Job::query)
        .collect()
}

/// `phones: https://.../s?k=phone, cables: https://...` -> one url job per entry.
pub fn parse_url_jobs(input: &str) -> ScraperResult<Vec<Job>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> ScraperResult<Job> {
            let (name, url) = entry.split_once(':').ok_or_else(|| {
                ScraperError::InputError(format!("expected `name: url`, got {:?}", entry))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ScraperError::InputError(format!(
                    "missing file name in {:?}",
                    entry
                )));
            }
            Ok(Job::url(name, Url::parse(url.trim())?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_is_case_insensitive() {
        assert_eq!("Query".parse::<Mode>().unwrap(), Mode::Query);
        assert_eq!(" URL ".parse::<Mode>().unwrap(), Mode::Url);
        assert!("both".parse::<Mode>().is_err());
    }

    #[test]
    fn test_parse_query_jobs() {
        let jobs = parse_query_jobs("phone, usb charger ,, headphones ");
        let names: Vec<&str> = jobs.iter().map(|j| j.output_name.as_str()).collect();
        assert_eq!(names, vec!["phone", "usb charger", "headphones"]);
        assert_eq!(
            jobs[1].kind,
            JobKind::Query {
                text: "usb charger".to_string()
            }
        );
    }

    #[test]
    fn test_parse_url_jobs_keeps_scheme() {
        let jobs =
            parse_url_jobs("phones: https://example.com/s?k=phone, cables:https://example.com/s?k=usb")
                .unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].output_name, "phones");
        assert_eq!(
            jobs[0].kind,
            JobKind::Url {
                start_url: Url::parse("https://example.com/s?k=phone").unwrap()
            }
        );
        assert_eq!(jobs[1].output_name, "cables");
    }

    #[test]
    fn test_parse_url_jobs_rejects_malformed_entries() {
        assert!(matches!(
            parse_url_jobs("just-a-name"),
            Err(ScraperError::InputError(_))
        ));
        assert!(matches!(
            parse_url_jobs(": https://example.com"),
            Err(ScraperError::InputError(_))
        ));
        assert!(matches!(
            parse_url_jobs("name: not a url"),
            Err(ScraperError::UrlError(_))
        ));
    }

    #[test]
    fn test_job_display() {
        assert_eq!(Job::query("phone").to_string(), "the search query \"phone\"");
        let job = Job::url("x", Url::parse("https://example.com/s?k=a").unwrap());
        assert_eq!(job.to_string(), "the url \"https://example.com/s?k=a\"");
    }
}

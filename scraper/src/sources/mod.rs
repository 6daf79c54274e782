//! Per-source fetchers and the trait that isolates them from one another.

pub mod careerjet;
pub mod jooble;
pub mod markup;
pub mod usajobs;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::JobRecord;
use reqwest::{Client, Response, StatusCode};

use crate::config::Config;
use crate::query::SearchQuery;

pub use careerjet::CareerjetFetcher;
pub use jooble::JoobleFetcher;
pub use markup::{MarkupFetcher, MarkupSite};
pub use usajobs::UsaJobsFetcher;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    Status(StatusCode),
    #[error("Invalid selector {0}")]
    Selector(String),
    #[error("Malformed JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single job source.
///
/// Implementors only provide [`Fetcher::try_fetch`]. Callers go through
/// [`Fetcher::fetch`], which never fails: any error is logged and the
/// source contributes no jobs.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &str;

    async fn try_fetch(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, FetchError>;

    async fn fetch(&self, query: &SearchQuery) -> Vec<JobRecord> {
        match self.try_fetch(query).await {
            Ok(jobs) => {
                log::debug!("{} returned {} jobs", self.name(), jobs.len());
                jobs
            }
            Err(e) => {
                log::warn!("{} failed, skipping: {}", self.name(), e);
                Vec::new()
            }
        }
    }
}

/// Shared HTTP client. The timeout applies to each request on its own.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;
    Ok(client)
}

/// Every recognized source, wired to `config`.
pub fn registry(config: &Config, client: &Client) -> Vec<Arc<dyn Fetcher>> {
    let credentials = &config.credentials;
    let mut fetchers: Vec<Arc<dyn Fetcher>> = markup::SITES
        .iter()
        .map(|&site| Arc::new(MarkupFetcher::new(site, client.clone())) as Arc<dyn Fetcher>)
        .collect();

    fetchers.push(Arc::new(CareerjetFetcher::new(
        client.clone(),
        &credentials.careerjet_affiliate_id,
    )));
    fetchers.push(Arc::new(JoobleFetcher::new(
        client.clone(),
        &credentials.jooble_api_key,
    )));
    fetchers.push(Arc::new(UsaJobsFetcher::new(
        client.clone(),
        &credentials.usajobs_api_key,
        &credentials.usajobs_user_email,
    )));

    fetchers
}

pub(crate) fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status(status))
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// APIs print salaries as text or as a bare number; either becomes text.
pub(crate) fn salary_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(text) => non_empty(Some(text)),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

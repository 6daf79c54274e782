use async_trait::async_trait;
use common::{normalize, JobRecord};
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, non_empty, salary_text, FetchError, Fetcher};
use crate::query::SearchQuery;

pub const ENDPOINT: &str = "https://public.api.careerjet.net/search";
const PAGE_SIZE: u32 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    jobs: Vec<CareerjetJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CareerjetJob {
    title: Option<String>,
    company: Option<String>,
    locations: Option<String>,
    salary: Option<serde_json::Value>,
    url: Option<String>,
}

/// Careerjet public search API, keyed by an affiliate id.
pub struct CareerjetFetcher {
    client: Client,
    affiliate_id: String,
    endpoint: String,
}

impl CareerjetFetcher {
    pub fn new(client: Client, affiliate_id: &str) -> Self {
        Self {
            client,
            affiliate_id: affiliate_id.to_string(),
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Fetcher for CareerjetFetcher {
    fn name(&self) -> &str {
        "careerjet"
    }

    async fn try_fetch(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, FetchError> {
        let params = [
            ("keywords", query.keyword.clone()),
            ("location", query.location.clone()),
            ("contracttype", query.job_type.clone()),
            ("pagesize", PAGE_SIZE.to_string()),
            ("affid", self.affiliate_id.clone()),
        ];

        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        let body = check_status(response)?.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .jobs
            .into_iter()
            .map(|job| {
                normalize(
                    job.title.as_deref().unwrap_or_default(),
                    job.company.as_deref().unwrap_or_default(),
                    job.locations.as_deref().unwrap_or_default(),
                    salary_text(job.salary).as_deref(),
                    query.job_type(),
                    non_empty(job.url).as_deref(),
                    self.name(),
                )
            })
            .collect())
    }
}

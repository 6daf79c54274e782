use async_trait::async_trait;
use common::{normalize, JobRecord};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{check_status, non_empty, salary_text, FetchError, Fetcher};
use crate::query::SearchQuery;

pub const ENDPOINT: &str = "https://jooble.org/api";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    jobs: Vec<JoobleJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JoobleJob {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    salary: Option<serde_json::Value>,
    link: Option<String>,
}

/// Jooble REST API. The key is part of the URL path.
pub struct JoobleFetcher {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl JoobleFetcher {
    pub fn new(client: Client, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Fetcher for JoobleFetcher {
    fn name(&self) -> &str {
        "jooble"
    }

    async fn try_fetch(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, FetchError> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), self.api_key);
        let payload = json!({
            "keywords": query.keyword,
            "page": 1,
            "searchMode": "open",
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        let body = check_status(response)?.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .jobs
            .into_iter()
            .map(|job| {
                normalize(
                    job.title.as_deref().unwrap_or_default(),
                    job.company.as_deref().unwrap_or_default(),
                    job.location.as_deref().unwrap_or_default(),
                    salary_text(job.salary).as_deref(),
                    query.job_type(),
                    non_empty(job.link).as_deref(),
                    self.name(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::build_client;
    use mockito::Matcher;
    use std::time::Duration;

    #[tokio::test]
    async fn test_posts_keywords_with_key_in_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/secret-key")
            .match_body(Matcher::PartialJson(json!({
                "keywords": "golang",
                "page": 1,
                "searchMode": "open",
            })))
            .with_status(200)
            .with_body(
                r#"{"totalCount":1,"jobs":[
                    {"title":"Go Engineer","company":"Gopher Inc","location":"Remote","salary":"$90k","link":"https://jooble.org/desc/1","type":"Full-time"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let fetcher =
            JoobleFetcher::new(client, "secret-key").with_endpoint(format!("{}/api", server.url()));
        let query = SearchQuery {
            keyword: "golang".to_string(),
            job_type: "remote".to_string(),
            ..Default::default()
        };

        let jobs = fetcher.fetch(&query).await;
        mock.assert_async().await;

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Go Engineer");
        assert_eq!(jobs[0].url.as_deref(), Some("https://jooble.org/desc/1"));
        assert_eq!(jobs[0].job_type.as_deref(), Some("remote"));
        assert_eq!(jobs[0].source, "jooble");
    }

    #[tokio::test]
    async fn test_numeric_salary_keeps_batch() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/k")
            .with_status(200)
            .with_body(
                r#"{"jobs":[
                    {"title":"Go Engineer","company":"Gopher Inc","salary":"$90k"},
                    {"title":"Data Engineer","company":"Gopher Inc","salary":120000.5}
                ]}"#,
            )
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let fetcher = JoobleFetcher::new(client, "k").with_endpoint(format!("{}/api", server.url()));

        let jobs = fetcher.fetch(&SearchQuery::default()).await;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].salary.as_deref(), Some("$90k"));
        assert_eq!(jobs[1].salary.as_deref(), Some("120000.5"));
    }

    #[tokio::test]
    async fn test_rejected_key_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/YOUR_JOOBLE_API_KEY")
            .with_status(401)
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let fetcher = JoobleFetcher::new(client, "YOUR_JOOBLE_API_KEY")
            .with_endpoint(format!("{}/api", server.url()));

        assert!(matches!(
            fetcher.try_fetch(&SearchQuery::default()).await,
            Err(FetchError::Status(status)) if status.as_u16() == 401
        ));
        assert!(fetcher.fetch(&SearchQuery::default()).await.is_empty());
    }
}

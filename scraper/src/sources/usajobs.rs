use async_trait::async_trait;
use common::{normalize, JobRecord};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, non_empty, FetchError, Fetcher};
use crate::query::SearchQuery;

pub const ENDPOINT: &str = "https://data.usajobs.gov/api/search";
const RESULTS_PER_PAGE: u32 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SearchResponse {
    search_result: SearchResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SearchResult {
    search_result_items: Vec<SearchResultItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SearchResultItem {
    matched_object_descriptor: Position,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Position {
    position_title: Option<String>,
    organization_name: Option<String>,
    position_location: Vec<PositionLocation>,
    position_remuneration: Vec<Remuneration>,
    #[serde(rename = "PositionURI")]
    position_uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct PositionLocation {
    location_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Remuneration {
    minimum_range: Option<String>,
}

impl Position {
    fn locations(&self) -> String {
        self.position_location
            .iter()
            .map(|l| l.location_name.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Only the lower end of the first pay band is reported.
    fn starting_salary(&self) -> Option<String> {
        self.position_remuneration
            .first()
            .and_then(|r| non_empty(r.minimum_range.clone()))
    }
}

/// USAJOBS search API. Requires an API key and the registered email,
/// which the API expects in the `User-Agent` header.
pub struct UsaJobsFetcher {
    client: Client,
    api_key: String,
    user_email: String,
    endpoint: String,
}

impl UsaJobsFetcher {
    pub fn new(client: Client, api_key: &str, user_email: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            user_email: user_email.to_string(),
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Fetcher for UsaJobsFetcher {
    fn name(&self) -> &str {
        "usajobs"
    }

    async fn try_fetch(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, FetchError> {
        let params = [
            ("Keyword", query.keyword.clone()),
            ("ResultsPerPage", RESULTS_PER_PAGE.to_string()),
        ];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .header(USER_AGENT, &self.user_email)
            .header("Authorization-Key", &self.api_key)
            .send()
            .await?;
        let body = check_status(response)?.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .search_result
            .search_result_items
            .into_iter()
            .map(|item| {
                let position = item.matched_object_descriptor;
                normalize(
                    position.position_title.as_deref().unwrap_or_default(),
                    position.organization_name.as_deref().unwrap_or_default(),
                    &position.locations(),
                    position.starting_salary().as_deref(),
                    query.job_type(),
                    non_empty(position.position_uri.clone()).as_deref(),
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

    const BODY: &str = r#"{
        "LanguageCode": "EN",
        "SearchResult": {
            "SearchResultCount": 2,
            "SearchResultItems": [
                {
                    "MatchedObjectId": "1",
                    "MatchedObjectDescriptor": {
                        "PositionTitle": "IT Specialist",
                        "OrganizationName": "Department of Energy",
                        "PositionURI": "https://www.usajobs.gov/job/1",
                        "PositionLocation": [
                            {"LocationName": "Washington, District of Columbia"},
                            {"LocationName": "Denver, Colorado"}
                        ],
                        "PositionRemuneration": [
                            {"MinimumRange": "99000.0", "MaximumRange": "128000.0"}
                        ]
                    }
                },
                {
                    "MatchedObjectId": "2",
                    "MatchedObjectDescriptor": {"PositionTitle": "Park Ranger"}
                }
            ]
        }
    }"#;

    #[tokio::test]
    async fn test_maps_matched_descriptors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("Keyword".into(), "analyst".into()),
                Matcher::UrlEncoded("ResultsPerPage".into(), "10".into()),
            ]))
            .match_header("authorization-key", "key-1")
            .match_header("user-agent", "me@example.org")
            .with_status(200)
            .with_body(BODY)
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let fetcher = UsaJobsFetcher::new(client, "key-1", "me@example.org")
            .with_endpoint(format!("{}/api/search", server.url()));
        let query = SearchQuery {
            keyword: "analyst".to_string(),
            ..Default::default()
        };

        let jobs = fetcher.fetch(&query).await;
        mock.assert_async().await;

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "IT Specialist");
        assert_eq!(jobs[0].company, "Department of Energy");
        assert_eq!(
            jobs[0].location,
            "Washington, District of Columbia, Denver, Colorado"
        );
        assert_eq!(jobs[0].salary.as_deref(), Some("99000.0"));
        assert_eq!(jobs[0].url.as_deref(), Some("https://www.usajobs.gov/job/1"));

        assert_eq!(jobs[1].title, "Park Ranger");
        assert_eq!(jobs[1].location, "");
        assert_eq!(jobs[1].salary, None);
        assert_eq!(jobs[1].source, "usajobs");
    }

    #[tokio::test]
    async fn test_server_error_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let fetcher = UsaJobsFetcher::new(client, "DEMO_KEY", "demo@example.com")
            .with_endpoint(format!("{}/api/search", server.url()));

        assert!(fetcher.fetch(&SearchQuery::default()).await.is_empty());
    }
}

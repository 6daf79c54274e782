//! Job Aggregator Server
//!
//! Exposes `GET /scrape-jobs`, which fans a search out to the requested job
//! sources and returns the merged, salary-filtered results.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use common::{JobsResponse, SalaryRange};
use job_scraper::{Aggregator, Config, SearchQuery, SearchRequest};

/// Query parameters for the scrape endpoint.
///
/// Everything is read as optional text so a malformed value degrades to
/// "not supplied" instead of rejecting the request.
#[derive(Debug, Default)]
struct ScrapeParams {
    keyword: Option<String>,
    job_type: Option<String>,
    min_salary: Option<String>,
    max_salary: Option<String>,
    source: Option<String>,
    location: Option<String>,
}

impl ScrapeParams {
    /// Folds raw query pairs into parameters. A repeated key keeps its last
    /// value and unknown keys are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "keyword" => &mut params.keyword,
                "type" => &mut params.job_type,
                "min_salary" => &mut params.min_salary,
                "max_salary" => &mut params.max_salary,
                "source" => &mut params.source,
                "location" => &mut params.location,
                _ => {
                    log::debug!("Ignoring unknown query parameter '{}'", key);
                    continue;
                }
            };
            *slot = Some(value);
        }
        params
    }

    fn into_request(self) -> SearchRequest {
        let salary = SalaryRange::new(
            parse_bound(self.min_salary.as_deref()),
            parse_bound(self.max_salary.as_deref()),
        );
        let sources = self
            .source
            .unwrap_or_else(|| SearchRequest::DEFAULT_SOURCE.to_string());

        SearchRequest::new(
            SearchQuery {
                keyword: self.keyword.unwrap_or_default(),
                job_type: self.job_type.unwrap_or_default(),
                location: self.location.unwrap_or_default(),
                salary,
            },
            &sources,
        )
    }
}

fn parse_bound(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    match value.parse() {
        Ok(bound) => Some(bound),
        Err(_) => {
            if !value.is_empty() {
                log::warn!("Ignoring non-numeric salary bound '{}'", value);
            }
            None
        }
    }
}

/// Shared application state
struct AppState {
    aggregator: Aggregator,
}

/// Handler for GET /scrape-jobs
///
/// Always answers 200; sources that fail simply contribute no jobs.
async fn scrape_jobs_handler(
    State(state): State<Arc<AppState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<JobsResponse> {
    let params = match pairs {
        Ok(Query(pairs)) => ScrapeParams::from_pairs(pairs),
        Err(rejection) => {
            log::warn!("Unreadable query string, using defaults: {}", rejection);
            ScrapeParams::default()
        }
    };

    let request = params.into_request();
    let jobs = state.aggregator.search(&request).await;

    Json(JobsResponse { jobs })
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 Job Aggregator API\n\nEndpoints:\n  GET /scrape-jobs?keyword=&type=&min_salary=&max_salary=&source=&location= - Search job sources\n\nExample:\n  curl 'http://127.0.0.1:3000/scrape-jobs?keyword=rust&source=indeed,jooble'"
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/scrape-jobs", get(scrape_jobs_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    println!("🚀 Starting Job Aggregator Server...\n");

    let config = Config::from_env()?;
    let aggregator = Aggregator::from_config(&config)?;
    log::info!("Known sources: {}", aggregator.source_names().join(", "));

    let state = Arc::new(AppState { aggregator });
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    println!("🌐 Server running at http://{}", config.bind_address);
    println!(
        "   Try: curl 'http://{}/scrape-jobs?keyword=developer&source=indeed,unicorn'\n",
        config.bind_address
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    Ok(())
}

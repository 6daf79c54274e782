//! Fan-out over the requested sources and merge of their results.

use std::collections::HashSet;
use std::sync::Arc;

use common::JobRecord;
use futures::future::{self, BoxFuture, FutureExt};

use crate::config::Config;
use crate::placeholder::placeholder_jobs;
use crate::query::SearchRequest;
use crate::sources::{self, FetchError, Fetcher};

enum Step<'a> {
    Source(&'a dyn Fetcher),
    Placeholder(&'a str),
}

/// Runs a search against every requested source and concatenates the results
/// in the order the sources were requested.
pub struct Aggregator {
    fetchers: Vec<Arc<dyn Fetcher>>,
}

impl Aggregator {
    pub fn new(fetchers: Vec<Arc<dyn Fetcher>>) -> Self {
        Self { fetchers }
    }

    /// Every recognized source, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = sources::build_client(config.request_timeout)?;
        Ok(Self::new(sources::registry(config, &client)))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.fetchers.iter().map(|f| f.name()).collect()
    }

    pub async fn search(&self, request: &SearchRequest) -> Vec<JobRecord> {
        let steps = self.plan(&request.sources);
        let query = &request.query;

        log::info!(
            "Searching {} source(s) for '{}' (type '{}')",
            steps.len(),
            query.keyword,
            query.job_type
        );

        let tasks: Vec<BoxFuture<'_, Vec<JobRecord>>> = steps
            .into_iter()
            .map(|step| match step {
                Step::Source(fetcher) => fetcher.fetch(query),
                Step::Placeholder(name) => future::ready(placeholder_jobs(name, query)).boxed(),
            })
            .collect();

        let jobs: Vec<JobRecord> = future::join_all(tasks).await.into_iter().flatten().collect();
        let total = jobs.len();
        let jobs = query.salary.retain(jobs);

        log::info!("Collected {} jobs, {} after salary filter", total, jobs.len());
        jobs
    }

    /// A recognized source runs once, at its first mention. Unknown names get
    /// placeholder jobs every time they appear.
    fn plan<'a>(&'a self, requested: &'a [String]) -> Vec<Step<'a>> {
        let mut seen = HashSet::new();
        let mut steps = Vec::new();

        for name in requested {
            match self.fetchers.iter().find(|f| f.name() == name.as_str()) {
                Some(fetcher) => {
                    if seen.insert(name.as_str()) {
                        steps.push(Step::Source(fetcher.as_ref()));
                    }
                }
                None => {
                    log::debug!("No fetcher for '{}', using placeholder jobs", name);
                    steps.push(Step::Placeholder(name.as_str()));
                }
            }
        }

        steps
    }
}

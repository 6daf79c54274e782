use common::SalaryRange;

/// Search parameters handed to every fetcher. Each fetcher reads the ones
/// its upstream understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub job_type: String,
    pub location: String,
    pub salary: SalaryRange,
}

impl SearchQuery {
    /// The requested job type, or `None` when none was asked for.
    pub fn job_type(&self) -> Option<&str> {
        if self.job_type.is_empty() {
            None
        } else {
            Some(self.job_type.as_str())
        }
    }
}

/// A query plus the sources to run it against, in requested order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub sources: Vec<String>,
}

impl SearchRequest {
    pub const DEFAULT_SOURCE: &'static str = "indeed";

    pub fn new(query: SearchQuery, sources: &str) -> Self {
        Self {
            query,
            sources: Self::parse_sources(sources),
        }
    }

    /// Splits a comma-delimited source list, dropping blank names.
    pub fn parse_sources(sources: &str) -> Vec<String> {
        sources
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

//! Shared job record and salary filtering used by the scraper and server.

pub mod salary;

use serde::{Deserialize, Serialize};

pub use salary::{Exclusion, SalaryParseError, SalaryRange, SalaryVerdict};

/// One job posting, normalized from whichever source produced it.
///
/// Text fields default to the empty string. Fields a source may not know about
/// are `None` and serialize as `null`, so every record has the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free text as the source printed it, e.g. `"$100,000 - $150,000"`.
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub url: Option<String>,
    pub source: String,
}

/// Body of a search response: `{"jobs": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobRecord>,
}

/// Builds a [`JobRecord`] from positional source values.
///
/// Values are passed through untouched; trimming is up to the caller.
pub fn normalize(
    title: &str,
    company: &str,
    location: &str,
    salary: Option<&str>,
    job_type: Option<&str>,
    url: Option<&str>,
    source: &str,
) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        salary: salary.map(str::to_string),
        job_type: job_type.map(str::to_string),
        url: url.map(str::to_string),
        source: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_passes_values_through() {
        let job = normalize(
            "Rust Engineer",
            "Ferris Co",
            "Remote",
            Some("$120,000"),
            Some("remote"),
            Some("https://example.com/1"),
            "indeed",
        );

        assert_eq!(job.title, "Rust Engineer");
        assert_eq!(job.company, "Ferris Co");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.salary.as_deref(), Some("$120,000"));
        assert_eq!(job.job_type.as_deref(), Some("remote"));
        assert_eq!(job.url.as_deref(), Some("https://example.com/1"));
        assert_eq!(job.source, "indeed");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        let job = normalize("  padded ", "", "", None, None, None, "x");
        assert_eq!(job.title, "  padded ");
    }

    #[test]
    fn test_normalize_tolerates_empty_and_absent_values() {
        let job = normalize("", "", "", None, None, None, "");
        assert_eq!(job, JobRecord::default());

        let job = normalize("", "", "", Some(""), Some(""), Some(""), "monster");
        assert_eq!(job.salary.as_deref(), Some(""));
        assert_eq!(job.job_type.as_deref(), Some(""));
        assert_eq!(job.url.as_deref(), Some(""));
    }

    #[test]
    fn test_record_serializes_all_seven_keys() {
        let job = normalize("T", "C", "L", None, Some("hybrid"), None, "flexjobs");
        let value = serde_json::to_value(&job).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 7);
        assert_eq!(object["type"], "hybrid");
        assert!(object["salary"].is_null());
        assert!(object["url"].is_null());
        assert!(!object.contains_key("job_type"));
    }
}

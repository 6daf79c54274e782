//! Stand-in listings for source names with no fetcher behind them.

use common::{normalize, JobRecord};

use crate::query::SearchQuery;

/// Two representative jobs for `source`, built only from the query.
pub fn placeholder_jobs(source: &str, query: &SearchQuery) -> Vec<JobRecord> {
    let brand = title_case(source);
    let keyword = title_case(&query.keyword);
    let topic = |fallback: &str| {
        if keyword.is_empty() {
            fallback.to_string()
        } else {
            keyword.clone()
        }
    };
    let salary = |low: i64, high: i64| {
        format!(
            "${} - ${}",
            query.salary.min.unwrap_or(low),
            query.salary.max.unwrap_or(high)
        )
    };
    let first_location = if query.job_type == "remote" {
        "Remote"
    } else {
        "San Francisco, CA"
    };
    let first_salary = salary(100_000, 150_000);
    let second_salary = salary(120_000, 180_000);
    let first_url = format!("https://{}.com/jobs/12345", source);
    let second_url = format!("https://{}.com/jobs/67890", source);

    vec![
        normalize(
            &format!("{} Engineer at {}", topic("Software"), brand),
            &format!("{} Inc.", brand),
            first_location,
            Some(first_salary.as_str()),
            Some(query.job_type().unwrap_or("remote")),
            Some(first_url.as_str()),
            source,
        ),
        normalize(
            &format!("Senior {} Developer at {}", topic("Backend"), brand),
            &format!("{} Solutions", brand),
            "New York, NY",
            Some(second_salary.as_str()),
            Some(query.job_type().unwrap_or("onsite")),
            Some(second_url.as_str()),
            source,
        ),
    ]
}

/// Capitalizes the first letter of every alphabetic run and lowercases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

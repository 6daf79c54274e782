//! Salary range filtering over free-text salary strings.
//!
//! Salaries arrive as whatever the source printed ("$100,000 - $150,000",
//! "From 45,000 a year", "Competitive"). The filter pulls every number out of
//! the text and compares the smallest against the requested minimum and the
//! largest against the requested maximum. Anything it cannot read is excluded.

use std::sync::LazyLock;

use regex::Regex;

use crate::JobRecord;

static RE_FIGURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9][0-9,]*").expect("invalid regex: salary figure"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Salary figure '{0}' does not fit in an integer")]
pub struct SalaryParseError(String);

/// Why a record failed the salary range test.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Exclusion {
    #[error("no salary given")]
    Missing,
    #[error("salary has no figures")]
    NoFigures,
    #[error("{0}")]
    Unparseable(SalaryParseError),
    #[error("lowest figure {lowest} is below minimum {min}")]
    BelowMinimum { lowest: i64, min: i64 },
    #[error("highest figure {highest} is above maximum {max}")]
    AboveMaximum { highest: i64, max: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalaryVerdict {
    Within,
    Excluded(Exclusion),
}

impl SalaryVerdict {
    pub fn is_within(&self) -> bool {
        matches!(self, SalaryVerdict::Within)
    }
}

/// Requested salary bounds. A bound of zero counts as not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl SalaryRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min: min.filter(|&v| v != 0),
            max: max.filter(|&v| v != 0),
        }
    }

    /// The filter only runs when at least one bound is supplied.
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn check(&self, salary: Option<&str>) -> SalaryVerdict {
        if !self.is_active() {
            return SalaryVerdict::Within;
        }

        let text = match salary {
            Some(text) if !text.is_empty() => text,
            _ => return SalaryVerdict::Excluded(Exclusion::Missing),
        };

        let figures = match extract_figures(text) {
            Ok(figures) => figures,
            Err(e) => return SalaryVerdict::Excluded(Exclusion::Unparseable(e)),
        };

        let (Some(&lowest), Some(&highest)) = (figures.iter().min(), figures.iter().max()) else {
            return SalaryVerdict::Excluded(Exclusion::NoFigures);
        };

        // Lowest figure against the minimum, highest against the maximum.
        if let Some(min) = self.min
            && lowest < min
        {
            return SalaryVerdict::Excluded(Exclusion::BelowMinimum { lowest, min });
        }
        if let Some(max) = self.max
            && highest > max
        {
            return SalaryVerdict::Excluded(Exclusion::AboveMaximum { highest, max });
        }

        SalaryVerdict::Within
    }

    /// Keeps the jobs whose salary passes [`SalaryRange::check`], in order.
    pub fn retain(&self, mut jobs: Vec<JobRecord>) -> Vec<JobRecord> {
        if !self.is_active() {
            return jobs;
        }

        let before = jobs.len();
        jobs.retain(|job| match self.check(job.salary.as_deref()) {
            SalaryVerdict::Within => true,
            SalaryVerdict::Excluded(reason) => {
                log::trace!("Dropping '{}' from {}: {}", job.title, job.source, reason);
                false
            }
        });
        log::debug!(
            "Salary filter kept {} of {} jobs ({:?})",
            jobs.len(),
            before,
            self
        );
        jobs
    }
}

/// Pulls every number out of `text`, allowing `,` as a grouping separator.
/// Only ASCII digits count; other scripts' digits are skipped like any text.
pub fn extract_figures(text: &str) -> Result<Vec<i64>, SalaryParseError> {
    RE_FIGURE
        .find_iter(text)
        .map(|m| {
            let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            digits
                .parse::<i64>()
                .map_err(|_| SalaryParseError(m.as_str().to_string()))
        })
        .collect()
}

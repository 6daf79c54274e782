//! Job fetching and aggregation across scraped sites and JSON APIs.

pub mod aggregator;
pub mod config;
pub mod placeholder;
pub mod query;
pub mod sources;

pub use aggregator::Aggregator;
pub use config::Config;
pub use query::{SearchQuery, SearchRequest};
pub use sources::{FetchError, Fetcher};

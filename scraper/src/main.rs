//! Job Scraper CLI
//!
//! Runs one aggregated search across the requested sources and saves the
//! merged `{"jobs": [...]}` document to disk (or stdout).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use common::{JobsResponse, SalaryRange};
use job_scraper::{Aggregator, Config, SearchQuery, SearchRequest};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "scraper")]
#[command(about = "Aggregate job postings from several boards and APIs", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "", help = "Job keyword or search term")]
    keyword: String,

    #[arg(
        short = 't',
        long = "type",
        default_value = "",
        help = "Job type: remote, onsite, hybrid"
    )]
    job_type: String,

    #[arg(long, help = "Drop jobs whose lowest salary figure is below this")]
    min_salary: Option<i64>,

    #[arg(long, help = "Drop jobs whose highest salary figure is above this")]
    max_salary: Option<i64>,

    #[arg(
        short,
        long,
        default_value = SearchRequest::DEFAULT_SOURCE,
        help = "Comma-separated sources, e.g. indeed,jooble,usajobs"
    )]
    source: String,

    #[arg(long, default_value = "", help = "Job location")]
    location: String,

    #[arg(
        short,
        long,
        default_value = "data/jobs.json",
        help = "Where to write the results, '-' for stdout"
    )]
    output: PathBuf,

    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::from_env()?;
    let aggregator = Aggregator::from_config(&config)?;

    let request = SearchRequest::new(
        SearchQuery {
            keyword: cli.keyword,
            job_type: cli.job_type,
            location: cli.location,
            salary: SalaryRange::new(cli.min_salary, cli.max_salary),
        },
        &cli.source,
    );

    let jobs = aggregator.search(&request).await;
    let json_output = serde_json::to_string_pretty(&JobsResponse { jobs })?;

    if cli.output.as_os_str() == "-" {
        println!("{}", json_output);
        return Ok(());
    }

    if let Some(dir) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {:?}", dir))?;
    }
    tokio::fs::write(&cli.output, &json_output)
        .await
        .with_context(|| format!("Failed to write {:?}", cli.output))?;

    log::info!("Saved results to {:?}", cli.output);
    Ok(())
}

//! HTML job boards scraped with CSS selectors.
//!
//! Each board is described by a [`MarkupSite`]; one [`MarkupFetcher`] runs
//! any of them. Selectors are tied to the boards' current markup and will
//! stop matching whenever a board redesigns.

use async_trait::async_trait;
use common::{normalize, JobRecord};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use super::{check_status, FetchError, Fetcher};
use crate::query::SearchQuery;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub type QueryParams = Vec<(&'static str, String)>;

/// Where and how to scrape one job board.
pub struct MarkupSite {
    pub name: &'static str,
    pub search_url: &'static str,
    /// Prepended to root-relative links.
    pub link_base: &'static str,
    pub user_agent: &'static str,
    pub params: fn(&SearchQuery) -> QueryParams,
    /// Matches one element per job listing.
    pub card: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub salary: Option<&'static str>,
    /// Anchor whose `href` is the listing URL.
    pub link: &'static str,
}

pub static INDEED: MarkupSite = MarkupSite {
    name: "indeed",
    search_url: "https://www.indeed.com/jobs",
    link_base: "https://www.indeed.com",
    user_agent: CHROME_UA,
    params: indeed_params,
    card: ".job_seen_beacon",
    title: "h2.jobTitle span",
    company: "span.companyName",
    location: "div.companyLocation",
    salary: Some("div.metadata.salary-snippet-container"),
    link: "a",
};

pub static MONSTER: MarkupSite = MarkupSite {
    name: "monster",
    search_url: "https://www.monster.com/jobs/search/",
    link_base: "https://www.monster.com",
    user_agent: BROWSER_UA,
    params: monster_params,
    card: "div.job-search-results-style__JobCardWrap-sc-30547e5b-4 article[data-testid='JobCard']",
    title: "h3 a[data-testid='jobTitle']",
    company: "span[data-testid='company']",
    location: "span[data-testid='jobDetailLocation']",
    salary: None,
    link: "h3 a[data-testid='jobTitle']",
};

pub static FLEXJOBS: MarkupSite = MarkupSite {
    name: "flexjobs",
    search_url: "https://www.flexjobs.com/search",
    link_base: "https://www.flexjobs.com",
    user_agent: BROWSER_UA,
    params: search_param,
    card: "li.job-listing",
    title: "a.job-link",
    company: "div.company",
    location: "span.location",
    salary: None,
    link: "a.job-link",
};

pub static ZIPRECRUITER: MarkupSite = MarkupSite {
    name: "ziprecruiter",
    search_url: "https://www.ziprecruiter.com/candidate/search",
    link_base: "https://www.ziprecruiter.com",
    user_agent: BROWSER_UA,
    params: search_param,
    card: "article.job_result",
    title: "a.job_title",
    company: "a.company_name",
    location: "span.location",
    salary: None,
    link: "a.job_title",
};

pub static CAREERBUILDER: MarkupSite = MarkupSite {
    name: "careerbuilder",
    search_url: "https://www.careerbuilder.com/jobs",
    link_base: "https://www.careerbuilder.com",
    user_agent: BROWSER_UA,
    params: keywords_param,
    card: "div.data-results-content-parent",
    title: "h2 a",
    company: "div.data-details span[data-test='job-company']",
    location: "div.data-details span[data-test='job-location']",
    salary: None,
    link: "h2 a",
};

fn indeed_params(q: &SearchQuery) -> QueryParams {
    let remote = if q.job_type == "remote" { "1" } else { "" };
    vec![
        ("q", q.keyword.clone()),
        ("l", String::new()),
        ("remotejob", remote.to_string()),
    ]
}

fn monster_params(q: &SearchQuery) -> QueryParams {
    vec![
        ("q", q.keyword.clone()),
        ("where", String::new()),
        ("jobid", String::new()),
    ]
}

fn search_param(q: &SearchQuery) -> QueryParams {
    vec![("search", q.keyword.clone())]
}

fn keywords_param(q: &SearchQuery) -> QueryParams {
    vec![("keywords", q.keyword.clone())]
}

pub static SITES: [&MarkupSite; 5] = [&INDEED, &MONSTER, &FLEXJOBS, &ZIPRECRUITER, &CAREERBUILDER];

pub struct MarkupFetcher {
    site: &'static MarkupSite,
    client: Client,
    search_url: String,
}

impl MarkupFetcher {
    pub fn new(site: &'static MarkupSite, client: Client) -> Self {
        Self {
            site,
            client,
            search_url: site.search_url.to_string(),
        }
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }
}

#[async_trait]
impl Fetcher for MarkupFetcher {
    fn name(&self) -> &str {
        self.site.name
    }

    async fn try_fetch(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, FetchError> {
        log::debug!("Fetching {} listings from {}", self.site.name, self.search_url);

        let response = self
            .client
            .get(&self.search_url)
            .query(&(self.site.params)(query))
            .header(USER_AGENT, self.site.user_agent)
            .send()
            .await?;
        let html = check_status(response)?.text().await?;

        parse_listings(self.site, &html, query.job_type())
    }
}

/// Extracts one record per card. Sub-selectors that match nothing leave
/// their field empty instead of dropping the card.
pub fn parse_listings(
    site: &MarkupSite,
    html: &str,
    job_type: Option<&str>,
) -> Result<Vec<JobRecord>, FetchError> {
    let card = selector(site.card)?;
    let title = selector(site.title)?;
    let company = selector(site.company)?;
    let location = selector(site.location)?;
    let salary = site.salary.map(selector).transpose()?;
    let link = selector(site.link)?;

    let document = Html::parse_document(html);
    let jobs = document
        .select(&card)
        .map(|element| {
            let salary = salary.as_ref().and_then(|s| first_text(element, s));
            let url = element
                .select(&link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| absolutize(href.trim(), site.link_base));

            normalize(
                &first_text(element, &title).unwrap_or_default(),
                &first_text(element, &company).unwrap_or_default(),
                &first_text(element, &location).unwrap_or_default(),
                salary.as_deref(),
                job_type,
                url.as_deref(),
                site.name,
            )
        })
        .collect();

    Ok(jobs)
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Selector(format!("'{}': {:?}", css, e)))
}

fn first_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn absolutize(href: &str, base: &str) -> String {
    if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        href.to_string()
    }
}

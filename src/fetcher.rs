use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use log::{error, warn};
use serde::Serialize;

use crate::extractor::{Extractor, ListingCard};

const LISTING_ENDPOINT: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
const DETAIL_ENDPOINT: &str = "https://www.linkedin.com/jobs-guest/jobs/api/jobPosting";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Listing pages expose ten results per request.
pub const PAGE_SIZE: usize = 10;

/// Typed result of a single fetch. The pipeline driver decides loop
/// continuation from the tag: Abort ends the phase, Skip drops the item.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Success(T),
    Skip,
    Abort,
}

/// A listing card that carried an identifier, ready for a detail fetch.
#[derive(Debug, Clone)]
pub struct JobLead {
    pub job_id: String,
    pub posted_time: Option<String>,
}

/// One row of the result table. Field order is the CSV column order.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_id: String,
    pub job_posted_time: Option<String>,
}

pub struct JobFetcher {
    client: Client,
    extractor: Extractor,
}

fn random_user_agent() -> &'static str {
    let uas = [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    ];
    use rand::Rng;
    let mut rng = rand::thread_rng();
    uas[rng.gen_range(0..uas.len())]
}

impl JobFetcher {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        JobFetcher {
            client,
            extractor: Extractor::new(),
        }
    }

    /// One page of search results. Any failure here ends the whole listing
    /// phase: a page that cannot be fetched, a non-success status, or a page
    /// with no list items (end of results, or the site is blocking us).
    pub fn fetch_listing_page(
        &self,
        title: &str,
        location: &str,
        start: usize,
    ) -> FetchOutcome<Vec<ListingCard>> {
        let url = format!(
            "{}?keywords={}&location={}&start={}",
            LISTING_ENDPOINT,
            urlencoding::encode(title),
            urlencoding::encode(location),
            start
        );

        let (body, status) = match self.visit(&url) {
            Ok(pair) => pair,
            Err(e) => {
                error!("Failed to fetch jobs list: {}", e);
                return FetchOutcome::Abort;
            }
        };

        if !status.is_success() {
            error!("Jobs list request returned status {}", status);
            return FetchOutcome::Abort;
        }

        let cards = self.extractor.extract_listing_cards(&body);
        if cards.is_empty() {
            warn!("No job postings found, or the listing endpoint blocked us.");
            return FetchOutcome::Abort;
        }

        FetchOutcome::Success(cards)
    }

    /// One job detail page. Failures here only skip this lead; the outer
    /// loop keeps going.
    pub fn fetch_job_detail(&self, lead: &JobLead) -> FetchOutcome<JobRecord> {
        let url = format!("{}/{}", DETAIL_ENDPOINT, lead.job_id);

        let (body, status) = match self.visit(&url) {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Failed to fetch job {}: {}", lead.job_id, e);
                return FetchOutcome::Skip;
            }
        };

        if !status.is_success() {
            warn!("Job {} returned status {}", lead.job_id, status);
            return FetchOutcome::Skip;
        }

        let fields = self.extractor.extract_detail_fields(&body);
        FetchOutcome::Success(JobRecord {
            job_title: fields.job_title,
            company_name: fields.company_name,
            job_id: lead.job_id.clone(),
            job_posted_time: lead.posted_time.clone(),
        })
    }

    fn visit(&self, url: &str) -> Result<(String, StatusCode), reqwest::Error> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, random_user_agent())
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        Ok((text, status))
    }
}

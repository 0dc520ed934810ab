use log::info;

use crate::command::Query;
use crate::delay_manager;
use crate::extractor::ListingCard;
use crate::fetcher::{FetchOutcome, JobFetcher, JobLead, JobRecord, PAGE_SIZE};

/// Runs the whole scrape for one query and returns the result table.
/// Listing phase first, then detail phase; both strictly sequential.
pub fn run(query: &Query) -> Vec<JobRecord> {
    let fetcher = JobFetcher::new();

    let leads = collect_leads(query.count, |start| {
        fetcher.fetch_listing_page(&query.title, &query.location, start)
    });
    info!("Collected {} job leads from listing pages.", leads.len());

    let records = collect_details(&leads, query.count, |lead| {
        let outcome = fetcher.fetch_job_detail(lead);
        delay_manager::detail_fetch_delay();
        outcome
    });
    info!("Collected {} job records.", records.len());

    records
}

/// Paginates the listing endpoint, keeping every card that carried an id
/// until `count` leads are collected or a page aborts the phase. Ids are
/// not deduplicated across pages; a job repeated by the site is collected
/// again.
fn collect_leads<F>(count: usize, mut fetch_page: F) -> Vec<JobLead>
where
    F: FnMut(usize) -> FetchOutcome<Vec<ListingCard>>,
{
    let mut leads = Vec::new();
    let mut start = 0;

    while start < count {
        match fetch_page(start) {
            FetchOutcome::Success(cards) => {
                for card in cards {
                    if let Some(job_id) = card.job_id {
                        leads.push(JobLead {
                            job_id,
                            posted_time: card.posted_time,
                        });
                        if leads.len() >= count {
                            return leads;
                        }
                    }
                }
            }
            FetchOutcome::Skip => {}
            FetchOutcome::Abort => break,
        }
        start += PAGE_SIZE;
    }

    leads
}

/// Walks the leads in order. A Skip drops that lead only; an Abort ends the
/// phase; collection stops once `count` records exist.
fn collect_details<F>(leads: &[JobLead], count: usize, mut fetch_detail: F) -> Vec<JobRecord>
where
    F: FnMut(&JobLead) -> FetchOutcome<JobRecord>,
{
    let mut records = Vec::new();

    for lead in leads {
        if records.len() >= count {
            break;
        }
        match fetch_detail(lead) {
            FetchOutcome::Success(record) => records.push(record),
            FetchOutcome::Skip => continue,
            FetchOutcome::Abort => break,
        }
    }

    records
}

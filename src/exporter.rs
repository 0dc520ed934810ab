use std::error::Error;
use std::path::{Path, PathBuf};
use chrono::{Duration, Local, NaiveDate};
use log::info;

use crate::command::Query;
use crate::fetcher::JobRecord;

/// Writes the result table to a CSV in the working directory. Nothing is
/// written when no records were collected; a recency filter that empties
/// the table still produces a header-only file.
pub fn export(records: &[JobRecord], query: &Query) -> Result<(), Box<dyn Error>> {
    write_table(records, query, Path::new("."))
}

fn write_table(records: &[JobRecord], query: &Query, dir: &Path) -> Result<(), Box<dyn Error>> {
    if records.is_empty() {
        info!("No job data to save.");
        return Ok(());
    }

    let rows: Vec<&JobRecord> = match query.days_filter {
        Some(days) => {
            let cutoff = Local::now().date_naive() - Duration::days(days);
            records
                .iter()
                .filter(|r| posted_within(r.job_posted_time.as_deref(), cutoff))
                .collect()
        }
        None => records.iter().collect(),
    };

    let path = unique_output_path(dir, &query.title);
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&path)?;
    writer.write_record(["job_title", "company_name", "job_id", "job_posted_time"])?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Saved {} jobs to {:?}", rows.len(), path);
    Ok(())
}

/// Posting dates arrive as the `datetime` attribute, e.g. "2026-08-01".
/// Anything absent or unparseable fails the cutoff comparison.
fn posted_within(posted_time: Option<&str>, cutoff: NaiveDate) -> bool {
    match posted_time.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()) {
        Some(date) => date >= cutoff,
        None => false,
    }
}

/// "Python developer" becomes Python_developer_jobs.csv, then
/// Python_developer_jobs_1.csv and so on if earlier runs left files behind.
fn unique_output_path(dir: &Path, title: &str) -> PathBuf {
    let base = title.replace(' ', "_");
    let mut path = dir.join(format!("{}_jobs.csv", base));
    let mut idx = 0;
    while path.exists() {
        idx += 1;
        path = dir.join(format!("{}_jobs_{}.csv", base, idx));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("job_scraper_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn query(title: &str, days_filter: Option<i64>) -> Query {
        Query {
            title: title.to_string(),
            location: "Kolkata".to_string(),
            count: 10,
            days_filter,
        }
    }

    fn record(id: &str, posted: Option<&str>) -> JobRecord {
        JobRecord {
            job_title: Some("Python Developer".to_string()),
            company_name: Some("Acme".to_string()),
            job_id: id.to_string(),
            job_posted_time: posted.map(str::to_string),
        }
    }

    fn days_ago(days: i64) -> String {
        (Local::now().date_naive() - Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn cutoff_keeps_recent_and_drops_old() {
        let cutoff = Local::now().date_naive() - Duration::days(7);
        assert!(posted_within(Some(&days_ago(3)), cutoff));
        assert!(!posted_within(Some(&days_ago(10)), cutoff));
    }

    #[test]
    fn absent_or_garbage_dates_fail_the_cutoff() {
        let cutoff = Local::now().date_naive() - Duration::days(7);
        assert!(!posted_within(None, cutoff));
        assert!(!posted_within(Some("yesterday"), cutoff));
    }

    #[test]
    fn filename_gets_numeric_suffix_on_collision() {
        let dir = temp_dir("collision");
        assert_eq!(
            unique_output_path(&dir, "Python developer"),
            dir.join("Python_developer_jobs.csv")
        );

        fs::write(dir.join("Python_developer_jobs.csv"), "").unwrap();
        assert_eq!(
            unique_output_path(&dir, "Python developer"),
            dir.join("Python_developer_jobs_1.csv")
        );

        fs::write(dir.join("Python_developer_jobs_1.csv"), "").unwrap();
        assert_eq!(
            unique_output_path(&dir, "Python developer"),
            dir.join("Python_developer_jobs_2.csv")
        );
    }

    #[test]
    fn no_records_writes_no_file() {
        let dir = temp_dir("empty");
        write_table(&[], &query("Python developer", None), &dir).unwrap();
        assert!(!dir.join("Python_developer_jobs.csv").exists());
    }

    #[test]
    fn days_filter_excludes_stale_records() {
        let dir = temp_dir("filter");
        let records = vec![
            record("1", Some(&days_ago(3))),
            record("2", Some(&days_ago(10))),
            record("3", None),
        ];
        write_table(&records, &query("Python developer", Some(7)), &dir).unwrap();

        let content = fs::read_to_string(dir.join("Python_developer_jobs.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "job_title,company_name,job_id,job_posted_time");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(",1,"));
    }

    #[test]
    fn fully_filtered_table_still_writes_header() {
        let dir = temp_dir("all_filtered");
        let records = vec![record("9", Some(&days_ago(30)))];
        write_table(&records, &query("Old jobs", Some(7)), &dir).unwrap();

        let content = fs::read_to_string(dir.join("Old_jobs_jobs.csv")).unwrap();
        assert_eq!(
            content.trim_end(),
            "job_title,company_name,job_id,job_posted_time"
        );
    }

    #[test]
    fn unfiltered_rows_round_trip_with_empty_optional_cells() {
        let dir = temp_dir("plain");
        let records = vec![
            record("100", Some("2026-08-01")),
            JobRecord {
                job_title: None,
                company_name: None,
                job_id: "200".to_string(),
                job_posted_time: None,
            },
        ];
        write_table(&records, &query("Rust engineer", None), &dir).unwrap();

        let content = fs::read_to_string(dir.join("Rust_engineer_jobs.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Python Developer,Acme,100,2026-08-01");
        assert_eq!(lines[2], ",,200,");
    }
}

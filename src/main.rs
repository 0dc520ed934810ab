use job_scraper_lib::{command, exporter, logger, pipeline};
use job_scraper_lib::command::Query;

use std::error::Error;
use std::io::{self, Write};
use log::{info, warn};

const DEFAULT_COMMAND: &str = "Scrape 20 Python developer jobs in Kolkata posted in the last 7 days";
const FALLBACK_TITLE: &str = "Python developer";
const FALLBACK_LOCATION: &str = "Kolkata";

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    info!("Starting job scraper...");

    let command_line = prompt("Enter command: ").unwrap_or_else(|| {
        warn!("Interactive input not supported. Using default command.");
        DEFAULT_COMMAND.to_string()
    });

    let parsed = command::interpret_command(&command_line);

    let title = parsed
        .title
        .clone()
        .or_else(|| prompt("Enter job title: "))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());
    let location = parsed
        .location
        .clone()
        .or_else(|| prompt("Enter job location: "))
        .unwrap_or_else(|| FALLBACK_LOCATION.to_string());

    let query = Query {
        title,
        location,
        count: parsed.count,
        days_filter: parsed.days_filter,
    };
    info!(
        "Scraping up to {} '{}' jobs in '{}'{}",
        query.count,
        query.title,
        query.location,
        match query.days_filter {
            Some(days) => format!(" posted in the last {} days", days),
            None => String::new(),
        }
    );

    let records = pipeline::run(&query);
    exporter::export(&records, &query)?;

    Ok(())
}

/// Reads one trimmed line from stdin. Returns None when input is
/// unavailable or the user entered nothing, so callers can fall back.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(n) if n > 0 => {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

use regex::Regex;

/// Raw output of the command interpreter. Title and location may be absent;
/// the caller is responsible for supplying fallbacks before building a Query.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub title: Option<String>,
    pub location: Option<String>,
    pub count: usize,
    pub days_filter: Option<i64>,
}

/// Resolved query parameters. Built once in main, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Query {
    pub title: String,
    pub location: String,
    pub count: usize,
    pub days_filter: Option<i64>,
}

pub const DEFAULT_COUNT: usize = 10;

/// Interprets a free-text command like
/// "Scrape 20 Python developer jobs in Kolkata posted in the last 7 days".
/// The four rules are applied independently; none of them is required to match.
pub fn interpret_command(command: &str) -> ParsedCommand {
    let count_re = Regex::new(r"(\d+)\s*(jobs)?").unwrap();
    let title_re = Regex::new(r"(?i)\d+\s+(.*?)\s+jobs?").unwrap();
    let location_re = Regex::new(r"(?i)(?:in|at|near)\s+([A-Za-z ]+?)(?:\s+posted|$)").unwrap();
    let days_re = Regex::new(r"(?i)last\s+(\d+)\s+days").unwrap();

    let count = count_re
        .captures(command)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .unwrap_or(DEFAULT_COUNT);

    let title = title_re
        .captures(command)
        .map(|caps| caps[1].to_string());

    let location = location_re
        .captures(command)
        .map(|caps| caps[1].trim().to_string());

    let days_filter = days_re
        .captures(command)
        .and_then(|caps| caps[1].parse::<i64>().ok());

    ParsedCommand {
        title,
        location,
        count,
        days_filter,
    }
}

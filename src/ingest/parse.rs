use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::CommitRecord;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Formats tried, in order, for absolute markers. Relative markers are handled first.
const ABSOLUTE_FORMATS: &[&str] = &[
    // git --date=iso
    "%Y-%m-%d %H:%M:%S %z",
    // git default
    "%a %b %e %H:%M:%S %Y %z",
];

/// A classified line of collector output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Header(String),
    Commit(CommitRecord),
    Skip,
}

pub fn classify_line(line: &str, now: DateTime<Utc>) -> Line {
    let line = line.trim();
    if line.is_empty() {
        return Line::Skip;
    }
    if let Some(commit) = parse_commit_line(line, now) {
        return Line::Commit(commit);
    }
    if is_header_line(line) {
        if let Some(name) = repository_name(line) {
            return Line::Header(name);
        }
    }
    Line::Skip
}

pub fn is_header_line(line: &str) -> bool {
    line.starts_with('/')
        || line.starts_with('~')
        || line.contains("/workspace/")
        || line.contains("/repos/")
}

/// Final non-empty path segment.
pub fn repository_name(path: &str) -> Option<String> {
    path.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "~")
        .map(str::to_string)
}

/// Parses `<hash> - <message> (<marker>) <author>`.
pub fn parse_commit_line(line: &str, now: DateTime<Utc>) -> Option<CommitRecord> {
    let line = line.trim();
    let (hash, rest) = line.split_once(" - ")?;
    let hash = hash.trim();
    if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    // the marker is the last parenthesised group directly before " <author>"
    let close = rest.rfind(") <")?;
    let open = rest[..close].rfind(" (")?;
    let message = rest[..open].trim();
    let marker = rest[open + 2..close].trim();

    let author_part = &rest[close + 3..];
    let author_end = author_part.find('>')?;
    let author = author_part[..author_end].trim();

    if message.is_empty() || author.is_empty() {
        return None;
    }

    let author_instant = parse_temporal_marker(marker, now)?;

    Some(CommitRecord {
        id: hash.to_string(),
        message: message.to_string(),
        author: author.to_string(),
        author_instant,
    })
}

/// Resolves a relative ("3 hours ago") or absolute timestamp marker.
pub fn parse_temporal_marker(marker: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let marker = marker.trim();
    if let Some(ago) = parse_relative(marker) {
        return now.checked_sub_signed(ago);
    }
    parse_absolute(marker)
}

/// "26 minutes ago", "1 day ago", "1 year, 2 months ago".
/// Months are 30 days and years 365 days.
pub fn parse_relative(marker: &str) -> Option<Duration> {
    let body = marker.to_lowercase();
    let body = body.strip_suffix("ago")?.trim_end();
    if body.is_empty() {
        return None;
    }

    let mut seconds: i64 = 0;
    for part in body.split(',') {
        let mut words = part.split_whitespace();
        let amount: i64 = words.next()?.parse().ok()?;
        let unit = words.next()?;
        if words.next().is_some() {
            return None;
        }
        let unit_seconds = unit_seconds(unit.strip_suffix('s').unwrap_or(unit))?;
        seconds = seconds.checked_add(amount.checked_mul(unit_seconds)?)?;
    }
    // None past chrono's range
    Duration::try_seconds(seconds)
}

fn unit_seconds(unit: &str) -> Option<i64> {
    match unit {
        "second" => Some(1),
        "minute" => Some(MINUTE),
        "hour" => Some(HOUR),
        "day" => Some(DAY),
        "week" => Some(7 * DAY),
        "month" => Some(30 * DAY),
        "year" => Some(365 * DAY),
        _ => None,
    }
}

pub fn parse_absolute(marker: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(marker) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ABSOLUTE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(marker, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(marker) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(marker, "%Y-%m-%d")
        .ok()
        .map(crate::util::day_start)
}

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use std::path::{Path, PathBuf};

pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 23:59:59.999 on `date`.
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|end| end.and_utc())
        .unwrap_or_else(|| day_start(date))
}

/// Monday of the ISO week containing `date`.
/// Saturates at the earliest representable date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(date.weekday().num_days_from_monday().into()))
        .unwrap_or(NaiveDate::MIN)
}

/// "Friday, August 1"
pub fn weekday_month_day(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// "Monday, July 28, 2025"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Shortens the home directory prefix to `~` for headers.
pub fn display_dir(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

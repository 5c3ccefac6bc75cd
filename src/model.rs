use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::util::{day_end, day_start, week_start};

pub const SCHEMA_VERSION: u32 = 1;

/// Counts at or above this value saturate a pattern slot.
pub const OVERFLOW_THRESHOLD: u32 = 10;

pub const EMPTY_MARKER: char = '·';
pub const OVERFLOW_MARKER: char = '+';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    SingleDay,
    MultiDay,
    DateRange,
    SmartYesterday,
}

/// A resolved, day-aligned window in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub kind: SpanKind,
    pub reference_now: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
}

impl TimeSpan {
    pub fn single_day(
        kind: SpanKind,
        now: DateTime<Utc>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self::days(kind, now, date, date, description)
    }

    pub fn days(
        kind: SpanKind,
        now: DateTime<Utc>,
        first: NaiveDate,
        last: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            reference_now: now,
            start: day_start(first),
            end: day_end(last),
            description: description.into(),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    pub fn is_single_day(&self) -> bool {
        self.start_date() == self.end_date()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// The date a week view is anchored on.
    pub fn reference_date(&self) -> NaiveDate {
        if self.is_single_day() {
            self.start_date()
        } else {
            self.end_date()
        }
    }

    /// Monday through Sunday of the week holding [`Self::reference_date`].
    /// The description is kept so headers still name the requested period.
    pub fn covering_week(&self) -> TimeSpan {
        let monday = week_start(self.reference_date());
        let sunday = monday
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX);
        TimeSpan::days(
            SpanKind::MultiDay,
            self.reference_now,
            monday,
            sunday,
            self.description.clone(),
        )
    }

    /// The days a week pattern is drawn from. A single day widens to its whole
    /// week; longer spans keep their own bounds, clipped to that week.
    pub fn week_window(&self) -> TimeSpan {
        let week = self.covering_week();
        if self.is_single_day() {
            return week;
        }
        TimeSpan {
            kind: self.kind,
            reference_now: self.reference_now,
            start: self.start.max(week.start),
            end: self.end.min(week.end),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub message: String,
    pub author: String,
    pub author_instant: DateTime<Utc>,
}

impl CommitRecord {
    pub fn date(&self) -> NaiveDate {
        self.author_instant.date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryActivity {
    pub repository_name: String,
    pub commits: Vec<CommitRecord>,
    pub commit_count: usize,
}

impl RepositoryActivity {
    pub fn new(repository_name: impl Into<String>, commits: Vec<CommitRecord>) -> Self {
        let commit_count = commits.len();
        Self {
            repository_name: repository_name.into(),
            commits,
            commit_count,
        }
    }
}

/// One day of a [`WeekPattern`]. `Count` is exact, `Overflow` is a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySlot {
    #[default]
    Empty,
    Count(u8),
    Overflow,
}

impl DaySlot {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => DaySlot::Empty,
            n if n >= OVERFLOW_THRESHOLD => DaySlot::Overflow,
            n => DaySlot::Count(n as u8),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            DaySlot::Empty => EMPTY_MARKER,
            DaySlot::Count(n) => char::from(b'0' + n),
            DaySlot::Overflow => OVERFLOW_MARKER,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            EMPTY_MARKER | '.' => Some(DaySlot::Empty),
            OVERFLOW_MARKER => Some(DaySlot::Overflow),
            '1'..='9' => symbol.to_digit(10).map(|d| DaySlot::Count(d as u8)),
            _ => None,
        }
    }
}

/// Seven slots, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekPattern(pub [DaySlot; 7]);

impl WeekPattern {
    pub fn from_counts(counts: [u32; 7]) -> Self {
        WeekPattern(counts.map(DaySlot::from_count))
    }

    pub fn slots(&self) -> &[DaySlot; 7] {
        &self.0
    }

    pub fn has_overflow(&self) -> bool {
        self.0.contains(&DaySlot::Overflow)
    }
}

impl fmt::Display for WeekPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in self.0 {
            write!(f, "{}", slot.symbol())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternParseError(pub String);

impl fmt::Display for PatternParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid week pattern '{}'", self.0)
    }
}

impl std::error::Error for PatternParseError {}

impl FromStr for WeekPattern {
    type Err = PatternParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let slots: Vec<DaySlot> = s
            .chars()
            .map(DaySlot::from_symbol)
            .collect::<Option<_>>()
            .ok_or_else(|| PatternParseError(s.to_string()))?;
        let slots: [DaySlot; 7] = slots
            .try_into()
            .map_err(|_| PatternParseError(s.to_string()))?;
        Ok(WeekPattern(slots))
    }
}

impl Serialize for WeekPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayKind {
    SingleDay,
    WeekPattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub repository_name: String,
    pub total_commits: usize,
    pub pattern: Option<WeekPattern>,
    pub display_kind: DisplayKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineReport {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub parent_directory: String,
    pub title: String,
    pub timespan: TimeSpan,
    /// Days the items were counted over.
    pub window: TimeSpan,
    pub display_kind: DisplayKind,
    pub items: Vec<TimelineItem>,
    pub validation: ValidationResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: std::path::PathBuf,
}


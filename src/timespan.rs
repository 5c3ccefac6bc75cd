//! Turns a time directive and an injected "now" into a day-aligned [`TimeSpan`].
//!
//! Resolution never fails: anything unusable falls back to the smart-yesterday
//! span (Friday when run on a Monday, yesterday otherwise).

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc, Weekday};
use tracing::debug;

use crate::model::{SpanKind, TimeSpan};
use crate::util::{plural, weekday_month_day};

/// Days covered by `Between` when no lower bound is given.
pub const DEFAULT_RANGE_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directive {
    LastWeekday(Weekday),
    PreviousWeekday(Weekday),
    LastWorkday,
    DaysAgo(u32),
    Today,
    LastDays(u32),
    Between {
        after: Option<NaiveDate>,
        before: Option<NaiveDate>,
    },
    #[default]
    SmartYesterday,
}

impl Directive {
    /// Reads phrases such as "last tuesday", "yesterday" or "last 3 days".
    /// Unknown phrases yield [`Directive::SmartYesterday`].
    pub fn from_phrase(phrase: &str) -> Directive {
        let phrase = phrase.trim().to_lowercase();
        let words: Vec<&str> = phrase.split_whitespace().collect();

        let directive = match words.as_slice() {
            ["today"] => Some(Directive::Today),
            ["yesterday"] => Some(Directive::DaysAgo(1)),
            ["last", "workday"] | ["last", "work", "day"] => Some(Directive::LastWorkday),
            ["last", day] => parse_weekday(day).map(Directive::LastWeekday),
            ["prev" | "previous", day] => parse_weekday(day).map(Directive::PreviousWeekday),
            [n, "day" | "days", "ago"] => n.parse().ok().map(Directive::DaysAgo),
            ["last", n, "day" | "days"] => n.parse().ok().map(Directive::LastDays),
            ["since", date] => parse_date(date).map(|after| Directive::Between {
                after: Some(after),
                before: None,
            }),
            [from, "to", to] => match (parse_date(from), parse_date(to)) {
                (Some(after), Some(before)) => Some(Directive::Between {
                    after: Some(after),
                    before: Some(before),
                }),
                _ => None,
            },
            _ => None,
        };

        directive.unwrap_or_else(|| {
            debug!(phrase = %phrase, "Unrecognized time phrase, using smart yesterday");
            Directive::SmartYesterday
        })
    }
}

pub fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

pub fn resolve(directive: &Directive, now: DateTime<Utc>) -> TimeSpan {
    let today = now.date_naive();

    let span = match *directive {
        Directive::LastWeekday(day) => {
            let date = last_occurrence(day, today);
            Some(TimeSpan::single_day(
                SpanKind::SingleDay,
                now,
                date,
                weekday_month_day(date),
            ))
        }
        Directive::PreviousWeekday(day) => last_occurrence(day, today)
            .checked_sub_days(Days::new(7))
            .map(|date| {
                TimeSpan::single_day(
                    SpanKind::SingleDay,
                    now,
                    date,
                    format!("previous {}", weekday_month_day(date)),
                )
            }),
        Directive::LastWorkday => {
            let back = match today.weekday() {
                Weekday::Mon => 3,
                Weekday::Sun => 2,
                _ => 1,
            };
            let date = today - Duration::days(back);
            Some(TimeSpan::single_day(
                SpanKind::SingleDay,
                now,
                date,
                weekday_month_day(date),
            ))
        }
        Directive::DaysAgo(n) => today.checked_sub_days(Days::new(n.into())).map(|date| {
            TimeSpan::single_day(
                SpanKind::SingleDay,
                now,
                date,
                format!("{} ago", plural(n, "day")),
            )
        }),
        Directive::Today => Some(TimeSpan::single_day(SpanKind::SingleDay, now, today, "today")),
        Directive::LastDays(0) => None,
        Directive::LastDays(n) => today
            .checked_sub_days(Days::new(u64::from(n) - 1))
            .map(|first| {
                TimeSpan::days(
                    SpanKind::MultiDay,
                    now,
                    first,
                    today,
                    format!("last {}", plural(n, "day")),
                )
            }),
        Directive::Between {
            after: None,
            before: None,
        } => None,
        Directive::Between { after, before } => {
            let first = after.or_else(|| today.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS)));
            let last = before.unwrap_or(today);
            first.filter(|first| *first <= last).map(|first| {
                TimeSpan::days(
                    SpanKind::DateRange,
                    now,
                    first,
                    last,
                    format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d")),
                )
            })
        }
        Directive::SmartYesterday => None,
    };

    let span = span.unwrap_or_else(|| {
        if *directive != Directive::SmartYesterday {
            debug!(?directive, "Unusable directive, using smart yesterday");
        }
        smart_yesterday(now)
    });

    debug!(
        kind = ?span.kind,
        start = %span.start,
        end = %span.end,
        description = %span.description,
        "Resolved timespan"
    );
    span
}

fn smart_yesterday(now: DateTime<Utc>) -> TimeSpan {
    let today = now.date_naive();
    let (date, description) = if today.weekday() == Weekday::Mon {
        let friday = today - Duration::days(3);
        (friday, format!("since {}", weekday_month_day(friday)))
    } else {
        let yesterday = today - Duration::days(1);
        (yesterday, weekday_month_day(yesterday))
    };
    TimeSpan::single_day(SpanKind::SmartYesterday, now, date, description)
}

/// Most recent `target` strictly before `today`; a full week back when today
/// already is `target`.
pub fn last_occurrence(target: Weekday, today: NaiveDate) -> NaiveDate {
    let current = today.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;
    let back = match (current - wanted).rem_euclid(7) {
        0 => 7,
        n => n,
    };
    today - Duration::days(back)
}

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

use crate::error::YdayError;
use crate::timespan::{parse_date, Directive};
use crate::util::expand_tilde;

pub const DEFAULT_PARENT: &str = "~/workspace";

#[derive(Parser)]
#[command(name = "yday")]
#[command(about = "What did I work on yesterday? Commit activity across every repository in a directory")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[clap(flatten)]
    pub report: ReportArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, env = "YDAY_PARENT", global = true, help = "Directory whose subdirectories are git repositories [default: ~/workspace]")]
    pub parent: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only log warnings and errors")]
    pub quiet: bool,

    #[arg(long, env = "YDAY_NOW", hide = true, global = true, help = "Pretend the current instant is this RFC3339 timestamp or YYYY-MM-DD date")]
    pub now: Option<String>,
}

impl CommonArgs {
    pub fn parent_dir(&self) -> PathBuf {
        let parent = self
            .parent
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PARENT));
        expand_tilde(&parent)
    }

    pub fn now(&self) -> crate::error::Result<DateTime<Utc>> {
        match self.now.as_deref() {
            None => Ok(Utc::now()),
            Some(raw) => parse_now(raw),
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

pub fn parse_now(raw: &str) -> crate::error::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    // a bare date means noon, well clear of either day boundary
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| YdayError::InvalidDate(format!("Invalid --now value '{raw}'")))
}

#[derive(Args, Clone, Debug, Default)]
pub struct TimeArgs {
    #[arg(long, help = "Most recent Monday before today")]
    pub last_monday: bool,
    #[arg(long, help = "Most recent Tuesday before today")]
    pub last_tuesday: bool,
    #[arg(long, help = "Most recent Wednesday before today")]
    pub last_wednesday: bool,
    #[arg(long, help = "Most recent Thursday before today")]
    pub last_thursday: bool,
    #[arg(long, help = "Most recent Friday before today")]
    pub last_friday: bool,
    #[arg(long, help = "Most recent Saturday before today")]
    pub last_saturday: bool,
    #[arg(long, help = "Most recent Sunday before today")]
    pub last_sunday: bool,

    #[arg(long, help = "Monday one week before --last-monday")]
    pub prev_monday: bool,
    #[arg(long, help = "Tuesday one week before --last-tuesday")]
    pub prev_tuesday: bool,
    #[arg(long, help = "Wednesday one week before --last-wednesday")]
    pub prev_wednesday: bool,
    #[arg(long, help = "Thursday one week before --last-thursday")]
    pub prev_thursday: bool,
    #[arg(long, help = "Friday one week before --last-friday")]
    pub prev_friday: bool,
    #[arg(long, help = "Saturday one week before --last-saturday")]
    pub prev_saturday: bool,
    #[arg(long, help = "Sunday one week before --last-sunday")]
    pub prev_sunday: bool,

    #[arg(long, help = "Previous working day (Friday on Sunday and Monday)")]
    pub last_workday: bool,

    #[arg(long, value_name = "N", help = "Exactly N days ago")]
    pub on: Option<u32>,

    #[arg(long, help = "Today only")]
    pub today: bool,

    #[arg(long, value_name = "N", help = "Last N days, today included")]
    pub days: Option<u32>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Start of a date range [default: 30 days ago]")]
    pub after: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "End of a date range [default: today]")]
    pub before: Option<String>,

    #[arg(long, value_name = "PHRASE", help = "Time phrase such as \"last tuesday\", \"yesterday\" or \"last 3 days\"")]
    pub when: Option<String>,
}

impl TimeArgs {
    fn weekday_flag(flags: [(bool, Weekday); 7]) -> Option<Weekday> {
        flags.into_iter().find(|(set, _)| *set).map(|(_, day)| day)
    }

    /// Picks one directive when several flags are given: weekday, workday,
    /// day offset, today, day count, date bounds, phrase, then the default.
    pub fn directive(&self) -> Directive {
        let last = Self::weekday_flag([
            (self.last_monday, Weekday::Mon),
            (self.last_tuesday, Weekday::Tue),
            (self.last_wednesday, Weekday::Wed),
            (self.last_thursday, Weekday::Thu),
            (self.last_friday, Weekday::Fri),
            (self.last_saturday, Weekday::Sat),
            (self.last_sunday, Weekday::Sun),
        ]);
        if let Some(day) = last {
            return Directive::LastWeekday(day);
        }

        let prev = Self::weekday_flag([
            (self.prev_monday, Weekday::Mon),
            (self.prev_tuesday, Weekday::Tue),
            (self.prev_wednesday, Weekday::Wed),
            (self.prev_thursday, Weekday::Thu),
            (self.prev_friday, Weekday::Fri),
            (self.prev_saturday, Weekday::Sat),
            (self.prev_sunday, Weekday::Sun),
        ]);
        if let Some(day) = prev {
            return Directive::PreviousWeekday(day);
        }

        if self.last_workday {
            return Directive::LastWorkday;
        }
        if let Some(n) = self.on {
            return Directive::DaysAgo(n);
        }
        if self.today {
            return Directive::Today;
        }
        if let Some(n) = self.days {
            return Directive::LastDays(n);
        }
        if self.after.is_some() || self.before.is_some() {
            return Directive::Between {
                after: self.after.as_deref().and_then(bound),
                before: self.before.as_deref().and_then(bound),
            };
        }
        if let Some(phrase) = &self.when {
            return Directive::from_phrase(phrase);
        }
        Directive::SmartYesterday
    }
}

fn bound(raw: &str) -> Option<NaiveDate> {
    let date = parse_date(raw);
    if date.is_none() {
        warn!(value = %raw, "Ignoring date that is not YYYY-MM-DD");
    }
    date
}

#[derive(Args, Clone, Debug, Default)]
pub struct ReportArgs {
    #[clap(flatten)]
    pub time: TimeArgs,

    #[arg(short, long, help = "Show the MTWRFSs week pattern even for a single day")]
    pub week: bool,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Print a legend under the week pattern")]
    pub details: bool,

    #[arg(long, help = "Use x and / instead of digits in the week pattern")]
    pub symbols: bool,

    #[arg(long, help = "Only count commits whose author contains this text")]
    pub author: Option<String>,

    #[arg(long, value_name = "PATH", help = "Read collector output from a file ('-' for stdin) instead of scanning repositories")]
    pub input: Option<PathBuf>,

    #[arg(long, conflicts_with = "input", help = "Collect commits with the external git-standup tool")]
    pub standup: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the repositories found under the parent directory
    Projects,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Projects) => crate::report::projects(&self.common),
            None => crate::report::exec(&self.common, &self.report),
        }
    }
}

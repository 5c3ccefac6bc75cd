use chrono::NaiveDate;

use crate::model::{CommitRecord, WeekPattern};

/// Per-day commit counts for the week opening on `monday`.
/// Commits dated outside that week are not counted.
pub fn week_counts(commits: &[CommitRecord], monday: NaiveDate) -> [u32; 7] {
    let mut counts = [0u32; 7];
    for commit in commits {
        let offset = (commit.date() - monday).num_days();
        if let Ok(slot) = usize::try_from(offset) {
            if let Some(count) = counts.get_mut(slot) {
                *count += 1;
            }
        }
    }
    counts
}

pub fn week_pattern(commits: &[CommitRecord], monday: NaiveDate) -> WeekPattern {
    WeekPattern::from_counts(week_counts(commits, monday))
}

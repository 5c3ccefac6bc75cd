//! Builds the per-repository timeline: a plain count for single-day spans, or a
//! Monday-first `MTWRFSs` pattern for the week holding the span's reference date.

pub mod aggregate;

pub use aggregate::{week_counts, week_pattern};
pub use crate::util::week_start;

use crate::model::{DisplayKind, RepositoryActivity, TimeSpan, TimelineItem};
use crate::util::long_date;
use tracing::debug;

pub fn display_kind(span: &TimeSpan, force_week_view: bool) -> DisplayKind {
    if !force_week_view && span.is_single_day() {
        DisplayKind::SingleDay
    } else {
        DisplayKind::WeekPattern
    }
}

pub fn render(
    activities: &[RepositoryActivity],
    span: &TimeSpan,
    force_week_view: bool,
) -> Vec<TimelineItem> {
    let kind = display_kind(span, force_week_view);

    let items: Vec<TimelineItem> = match kind {
        DisplayKind::SingleDay => activities
            .iter()
            .map(|activity| TimelineItem {
                repository_name: activity.repository_name.clone(),
                total_commits: activity.commit_count,
                pattern: None,
                display_kind: kind,
            })
            .collect(),
        DisplayKind::WeekPattern => {
            let monday = week_start(span.reference_date());
            debug!(%monday, "Rendering week pattern");
            activities
                .iter()
                .map(|activity| TimelineItem {
                    repository_name: activity.repository_name.clone(),
                    total_commits: activity.commit_count,
                    pattern: Some(week_pattern(&activity.commits, monday)),
                    display_kind: kind,
                })
                .collect()
        }
    };

    debug!(?kind, items = items.len(), "Timeline generated");
    items
}

pub fn title(span: &TimeSpan, kind: DisplayKind) -> String {
    match kind {
        DisplayKind::SingleDay => span.description.clone(),
        DisplayKind::WeekPattern => format!(
            "Week beginning {}",
            long_date(week_start(span.reference_date()))
        ),
    }
}

//! Parses collector output into per-repository commits and keeps only those
//! whose author date falls inside a [`TimeSpan`].
//!
//! Malformed lines are skipped rather than reported: a partial report is more
//! useful than none.

pub mod filter;
pub mod parse;

pub use filter::{in_span, restrict_to_span, retain_author};
pub use parse::{classify_line, parse_commit_line, parse_temporal_marker, Line};

use crate::model::{CommitRecord, RepositoryActivity, TimeSpan};
use tracing::{debug, trace};

pub fn ingest(raw_text: &str, span: &TimeSpan) -> Vec<RepositoryActivity> {
    let repositories = group_by_repository(raw_text, span);
    let parsed: usize = repositories.iter().map(|(_, commits)| commits.len()).sum();

    let activities = restrict_to_span(repositories, span);

    debug!(
        parsed,
        kept = activities.iter().map(|a| a.commit_count).sum::<usize>(),
        repositories = activities.len(),
        "Ingested commits"
    );
    activities
}

/// Groups commit lines under the header that precedes them, in input order.
pub fn group_by_repository(raw_text: &str, span: &TimeSpan) -> Vec<(String, Vec<CommitRecord>)> {
    let mut repositories: Vec<(String, Vec<CommitRecord>)> = Vec::new();

    let lines = raw_text
        .lines()
        .enumerate()
        .filter_map(|(number, line)| match classify_line(line, span.reference_now) {
            Line::Skip => {
                if !line.trim().is_empty() {
                    trace!(line = number + 1, text = %line, "Skipping unrecognized line");
                }
                None
            }
            parsed => Some(parsed),
        });

    for line in lines {
        match line {
            Line::Header(name) => repositories.push((name, Vec::new())),
            Line::Commit(commit) => match repositories.last_mut() {
                Some((_, commits)) => commits.push(commit),
                None => trace!(id = %commit.id, "Commit before any repository header"),
            },
            Line::Skip => {}
        }
    }

    repositories
}

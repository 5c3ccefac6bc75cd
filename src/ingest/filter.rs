use crate::model::{CommitRecord, RepositoryActivity, TimeSpan};

/// Date-level membership: time of day is ignored.
pub fn in_span(commit: &CommitRecord, span: &TimeSpan) -> bool {
    span.contains_date(commit.date())
}

/// Restricts every repository to `span`, dropping those left without commits.
pub fn restrict_to_span(
    repositories: Vec<(String, Vec<CommitRecord>)>,
    span: &TimeSpan,
) -> Vec<RepositoryActivity> {
    repositories
        .into_iter()
        .filter_map(|(name, commits)| {
            let kept: Vec<CommitRecord> = commits
                .into_iter()
                .filter(|commit| in_span(commit, span))
                .collect();
            (!kept.is_empty()).then(|| RepositoryActivity::new(name, kept))
        })
        .collect()
}

/// Keeps commits whose author contains `author`, ignoring case.
pub fn retain_author(activities: Vec<RepositoryActivity>, author: &str) -> Vec<RepositoryActivity> {
    let wanted = author.to_lowercase();
    activities
        .into_iter()
        .filter_map(|activity| {
            let kept: Vec<CommitRecord> = activity
                .commits
                .into_iter()
                .filter(|commit| commit.author.to_lowercase().contains(&wanted))
                .collect();
            (!kept.is_empty()).then(|| RepositoryActivity::new(activity.repository_name, kept))
        })
        .collect()
}

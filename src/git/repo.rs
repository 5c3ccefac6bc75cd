use crate::error::{Result, YdayError};
use crate::model::{CommitRecord, RepoEntry, TimeSpan};
use chrono::{DateTime, Utc};
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = discover(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits reachable from HEAD dated on or after `since`, newest first.
    pub fn commits_since(&self, since: DateTime<Utc>) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let committed = instant(commit.time()?.seconds)?;

            // history committed before the window is not walked
            if committed < since {
                continue;
            }

            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }

            // rebased or amended commits keep the day they were authored
            let author = commit.author()?;
            let authored = author.time().map_err(|e| {
                YdayError::InvalidDate(format!("Unreadable author time on {commit_id}: {e}"))
            })?;

            commits.push(CommitRecord {
                id: commit_id.to_string().chars().take(7).collect(),
                message: commit.message()?.title.to_string(),
                author: author.name.to_string(),
                author_instant: instant(authored.seconds)?,
            });
        }

        commits.sort_by(|a, b| b.author_instant.cmp(&a.author_instant));
        Ok(commits)
    }
}

fn instant(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| YdayError::InvalidDate(format!("Invalid timestamp: {secs}")))
}

/// Renders a commit in the line grammar understood by [`crate::ingest`].
pub fn commit_line(commit: &CommitRecord) -> String {
    format!(
        "{} - {} ({}) <{}>",
        commit.id,
        commit.message.trim(),
        commit.author_instant.format("%Y-%m-%d %H:%M:%S %z"),
        commit.author
    )
}

/// Immediate subdirectories of `parent` that hold a `.git` directory or file.
pub fn find_repositories(parent: &Path) -> Result<Vec<RepoEntry>> {
    let entries = std::fs::read_dir(parent).map_err(|e| {
        YdayError::GitRepo(format!("Failed to scan directory {}: {e}", parent.display()))
    })?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join(".git").exists() {
            repos.push(RepoEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path,
            });
        }
    }

    repos.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(repos)
}

/// Walks every repository under `parent` and produces collector text: a header
/// line with the repository path followed by one line per commit in `span`.
pub fn collect_text(parent: &Path, span: &TimeSpan) -> Result<String> {
    let repos = find_repositories(parent)?;
    debug!(parent = %parent.display(), count = repos.len(), "Found repositories");

    let pb = ProgressBar::new(repos.len() as u64);
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} ({pos}/{len})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut text = String::new();
    for entry in &repos {
        pb.set_message(format!("Collecting {}", entry.name));

        let commits = match GitRepo::open(&entry.path).and_then(|r| r.commits_since(span.start)) {
            Ok(commits) => commits,
            Err(e) => {
                warn!(repo = %entry.name, error = %e, "Skipping unreadable repository");
                pb.inc(1);
                continue;
            }
        };

        let _ = writeln!(text, "{}", entry.path.display());
        for commit in &commits {
            let _ = writeln!(text, "{}", commit_line(commit));
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(text)
}

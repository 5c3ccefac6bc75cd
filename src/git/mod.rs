pub mod repo;
pub mod standup;

pub use repo::{collect_text, commit_line, find_repositories, GitRepo};

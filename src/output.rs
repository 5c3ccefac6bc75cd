use crate::model::{
    DaySlot, DisplayKind, RepoEntry, TimeSpan, TimelineItem, TimelineReport, ValidationResult,
    SCHEMA_VERSION,
};
use anyhow::Result;
use chrono::Utc;
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternStyle {
    #[default]
    Numbers,
    Symbols,
}

/// Symbol style collapses counts: `x` for 3 or more, `/` for 1-2.
pub fn styled_pattern(item: &TimelineItem, pattern_style: PatternStyle) -> String {
    let Some(pattern) = &item.pattern else {
        return String::new();
    };
    match pattern_style {
        PatternStyle::Numbers => pattern.to_string(),
        PatternStyle::Symbols => pattern
            .slots()
            .iter()
            .map(|slot| match slot {
                DaySlot::Empty => '·',
                DaySlot::Count(1 | 2) => '/',
                _ => 'x',
            })
            .collect(),
    }
}

pub fn header(display_dir: &str, title: &str, span: &TimeSpan) -> String {
    format!(
        "### Activity in `{}` for {} ({})",
        display_dir, title, span.description
    )
}

pub fn markdown_table(
    kind: DisplayKind,
    items: &[TimelineItem],
    pattern_style: PatternStyle,
) -> Vec<String> {
    let mut lines = Vec::new();

    if items.is_empty() {
        match kind {
            DisplayKind::SingleDay => {
                lines.push("| Repo | Commits |".to_string());
                lines.push("|------|---------|".to_string());
                lines.push("| -    | No commits found |".to_string());
            }
            DisplayKind::WeekPattern => {
                lines.push("| MTWRFSs | Repo | Commits |".to_string());
                lines.push("|---------|------|---------|".to_string());
                lines.push("| ······· | -    | No commits found |".to_string());
            }
        }
        return lines;
    }

    let repo_width = items
        .iter()
        .map(|i| i.repository_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let commits_width = items
        .iter()
        .map(|i| i.total_commits.to_string().len())
        .max()
        .unwrap_or(0)
        .max(7);

    match kind {
        DisplayKind::SingleDay => {
            lines.push(format!(
                "| {:<repo_width$} | {:<commits_width$} |",
                "Repo", "Commits"
            ));
            lines.push(format!(
                "|{}|{}|",
                "-".repeat(repo_width + 2),
                "-".repeat(commits_width + 2)
            ));
            for item in items {
                lines.push(format!(
                    "| {:<repo_width$} | {:<commits_width$} |",
                    item.repository_name, item.total_commits
                ));
            }
        }
        DisplayKind::WeekPattern => {
            lines.push(format!(
                "| {:<7} | {:<repo_width$} | {:<commits_width$} |",
                "MTWRFSs", "Repo", "Commits"
            ));
            lines.push(format!(
                "|{}|{}|{}|",
                "-".repeat(9),
                "-".repeat(repo_width + 2),
                "-".repeat(commits_width + 2)
            ));
            for item in items {
                lines.push(format!(
                    "| {:<7} | {:<repo_width$} | {:<commits_width$} |",
                    styled_pattern(item, pattern_style),
                    item.repository_name,
                    item.total_commits
                ));
            }
        }
    }

    lines
}

pub fn legend(pattern_style: PatternStyle) -> Vec<&'static str> {
    let mut lines = vec!["Legend:"];
    match pattern_style {
        PatternStyle::Numbers => {
            lines.push("  1-9 = Number of commits that day");
            lines.push("  + = 10 or more commits");
        }
        PatternStyle::Symbols => {
            lines.push("  x = High activity day (3+ commits)");
            lines.push("  / = Some activity day (1-2 commits)");
        }
    }
    lines.push("  · = No activity");
    lines.push("  M T W R F S s = Mon Tue Wed Thu Fri Sat Sun");
    lines
}

pub struct MarkdownOptions {
    pub details: bool,
    pub pattern_style: PatternStyle,
}

pub fn output_markdown(
    display_dir: &str,
    title: &str,
    span: &TimeSpan,
    kind: DisplayKind,
    items: &[TimelineItem],
    options: &MarkdownOptions,
) -> Result<()> {
    println!("{}\n", header(display_dir, title, span));
    for line in markdown_table(kind, items, options.pattern_style) {
        println!("{line}");
    }

    if options.details && kind == DisplayKind::WeekPattern && !items.is_empty() {
        println!();
        for line in legend(options.pattern_style) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn build_report(
    parent_directory: &str,
    title: &str,
    span: &TimeSpan,
    window: &TimeSpan,
    kind: DisplayKind,
    items: Vec<TimelineItem>,
    validation: ValidationResult,
) -> TimelineReport {
    TimelineReport {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        parent_directory: parent_directory.to_string(),
        title: title.to_string(),
        timespan: span.clone(),
        window: window.clone(),
        display_kind: kind,
        items,
        validation,
    }
}

pub fn output_json(report: &TimelineReport) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn output_validation_failure(validation: &ValidationResult) {
    eprintln!(
        "{} {}",
        style("Timeline validation failed:").red().bold(),
        validation.errors.join(", ")
    );
}

pub fn output_projects(repos: &[RepoEntry]) -> Result<()> {
    if repos.is_empty() {
        println!("No repositories found");
        return Ok(());
    }
    for repo in repos {
        println!("- {}", repo.name);
    }
    Ok(())
}

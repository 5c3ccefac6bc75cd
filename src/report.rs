use crate::cli::{CommonArgs, ReportArgs};
use crate::git::{collect_text, find_repositories, standup};
use crate::ingest::{ingest, retain_author};
use crate::model::TimeSpan;
use crate::output::{
    build_report, output_json, output_markdown, output_projects, output_validation_failure,
    MarkdownOptions, PatternStyle,
};
use crate::util::display_dir;
use crate::{timeline, timespan, validate};
use anyhow::{bail, Context};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub fn exec(common: &CommonArgs, args: &ReportArgs) -> anyhow::Result<()> {
    let parent = common.parent_dir();
    let now = common.now().context("Failed to determine the current instant")?;

    let directive = args.time.directive();
    let span = timespan::resolve(&directive, now);

    // slots and totals must be counted over the same days
    let week_view = args.week || !span.is_single_day();
    let view_span = if week_view {
        span.week_window()
    } else {
        span.clone()
    };
    debug!(start = %view_span.start, end = %view_span.end, "Counting window");

    let raw = read_source(args, &parent, &view_span)?;
    let mut activities = ingest(&raw, &view_span);
    if let Some(author) = args.author.as_deref() {
        activities = retain_author(activities, author);
    }
    info!(
        repositories = activities.len(),
        description = %span.description,
        "Collected activity"
    );

    let items = timeline::render(&activities, &view_span, week_view);
    let kind = timeline::display_kind(&view_span, week_view);
    let title = timeline::title(&view_span, kind);

    let validation = validate::validate(&items);
    if validation.is_valid {
        debug!("Timeline validation passed");
    }

    let shown_dir = display_dir(&parent);
    if args.json {
        let errors = validation.errors.len();
        let report = build_report(
            &shown_dir, &title, &span, &view_span, kind, items, validation,
        );
        output_json(&report)?;
        if errors > 0 {
            bail!("Timeline validation failed for {errors} repositories");
        }
        return Ok(());
    }

    if !validation.is_valid {
        output_validation_failure(&validation);
        bail!(
            "Timeline validation failed for {} repositories",
            validation.errors.len()
        );
    }

    let options = MarkdownOptions {
        details: args.details,
        pattern_style: if args.symbols {
            PatternStyle::Symbols
        } else {
            PatternStyle::Numbers
        },
    };
    output_markdown(&shown_dir, &title, &span, kind, &items, &options)
}

fn read_source(args: &ReportArgs, parent: &Path, span: &TimeSpan) -> anyhow::Result<String> {
    if let Some(input) = &args.input {
        if input.as_path() == Path::new("-") {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read collector output from stdin")?;
            return Ok(raw);
        }
        return std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read collector output from {}", input.display()));
    }

    if args.standup {
        return standup::run(parent, span).context("Failed to collect commits with git-standup");
    }

    collect_text(parent, span).context("Failed to collect commits from repositories")
}

pub fn projects(common: &CommonArgs) -> anyhow::Result<()> {
    let parent = common.parent_dir();
    let repos = find_repositories(&parent).context("Failed to list repositories")?;
    output_projects(&repos)
}

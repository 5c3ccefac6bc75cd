use crate::error::{Result, YdayError};
use crate::model::TimeSpan;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub const STANDUP_BIN: &str = "git-standup";

/// Arguments asking git-standup for exactly the days of `span`, with absolute
/// ISO dates so ingestion does not depend on when the tool ran.
pub fn standup_args(span: &TimeSpan) -> Vec<String> {
    let today = span.reference_now.date_naive();
    let since = (today - span.start_date()).num_days().max(0);
    let until = (today - span.end_date()).num_days().max(0);

    vec![
        "-d".to_string(),
        since.to_string(),
        "-u".to_string(),
        until.to_string(),
        "-D".to_string(),
        "iso".to_string(),
    ]
}

pub fn run(parent: &Path, span: &TimeSpan) -> Result<String> {
    let args = standup_args(span);
    debug!(cwd = %parent.display(), ?args, "Running {STANDUP_BIN}");

    let output = Command::new(STANDUP_BIN)
        .args(&args)
        .current_dir(parent)
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => YdayError::ToolMissing {
                tool: STANDUP_BIN.to_string(),
                hint: "Install with: npm install -g git-standup".to_string(),
            },
            _ => YdayError::Io(e),
        })?;

    if !output.status.success() {
        return Err(YdayError::ToolFailed {
            tool: STANDUP_BIN.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    debug!(bytes = stdout.len(), "{STANDUP_BIN} finished");
    Ok(stdout)
}

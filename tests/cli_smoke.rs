use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const NOW: &str = "2025-08-04T10:00:00Z";

const FIXTURE: &str = "\
/Users/test/workspace/repo1
a1b2c3d - Fixed bug (2025-07-29 10:00:00 +0000) <Jane Doe>
a1b2c3e - Added feature (2025-07-29 14:30:00 +0000) <Jane Doe>
a1b2c3f - Friday cleanup (2025-08-01 09:00:00 +0000) <Bob>

/Users/test/workspace/repo2
b4d5e6f - Updated docs (2025-07-28 16:15:00 +0000) <Bob>
";

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

fn commit_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", &format!("add {name}")]);
}

fn fixture_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("standup.txt");
    fs::write(&path, FIXTURE).unwrap();
    path
}

fn yday(dir: &TempDir, input: &Path) -> Command {
    let mut cmd = Command::cargo_bin("yday").unwrap();
    cmd.env_remove("YDAY_PARENT")
        .env_remove("YDAY_NOW")
        .arg("--parent")
        .arg(dir.path())
        .args(["--now", NOW, "--input"])
        .arg(input);
    cmd
}

#[test]
fn markdown_lists_single_day_totals() {
    let dir = tempdir().unwrap();
    let input = fixture_file(&dir);

    let out = yday(&dir, &input)
        .arg("--last-tuesday")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("for Tuesday, July 29 (Tuesday, July 29)"));
    assert!(text.contains("| Repo  | Commits |"));
    assert!(text.contains("| repo1 | 2       |"));
    assert!(!text.contains("repo2"));
}

#[test]
fn json_report_carries_timespan_and_items() {
    let dir = tempdir().unwrap();
    let input = fixture_file(&dir);

    let out = yday(&dir, &input)
        .args(["--last-tuesday", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["version"], 1);
    assert_eq!(v["display_kind"], "single-day");
    assert_eq!(v["timespan"]["kind"], "single-day");
    assert_eq!(v["timespan"]["description"], "Tuesday, July 29");
    assert_eq!(v["items"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(v["items"][0]["repository_name"], "repo1");
    assert_eq!(v["items"][0]["total_commits"], 2);
    assert!(v["items"][0]["pattern"].is_null());
    assert_eq!(v["validation"]["is_valid"], true);
}

#[test]
fn week_flag_renders_patterns_for_the_whole_week() {
    let dir = tempdir().unwrap();
    let input = fixture_file(&dir);

    let out = yday(&dir, &input)
        .args(["--last-tuesday", "--week", "--details"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("for Week beginning Monday, July 28, 2025 (Tuesday, July 29)"));
    assert!(text.contains("| MTWRFSs | Repo  | Commits |"));
    assert!(text.contains("| ·2··1·· | repo1 | 3       |"));
    assert!(text.contains("| 1······ | repo2 | 1       |"));
    assert!(text.contains("Legend:"));
}

#[test]
fn week_json_validates_patterns() {
    let dir = tempdir().unwrap();
    let input = fixture_file(&dir);

    let out = yday(&dir, &input)
        .args(["--when", "last 7 days", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["display_kind"], "week-pattern");
    assert_eq!(v["title"], "Week beginning Monday, August 4, 2025");
    assert_eq!(v["validation"]["is_valid"], true);
}

#[test]
fn author_filter_drops_other_authors() {
    let dir = tempdir().unwrap();
    let input = fixture_file(&dir);

    let out = yday(&dir, &input)
        .args(["--last-tuesday", "--week", "--json", "--author", "bob"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let items = v["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["pattern"], "····1··");
    assert_eq!(items[1]["pattern"], "1······");
}

#[test]
fn empty_window_reports_no_commits() {
    let dir = tempdir().unwrap();
    let input = fixture_file(&dir);

    let out = yday(&dir, &input)
        .arg("--today")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("No commits found"));
}

#[test]
fn stdin_input_is_accepted() {
    let dir = tempdir().unwrap();

    let out = assert_cmd::Command::cargo_bin("yday")
        .unwrap()
        .env_remove("YDAY_PARENT")
        .arg("--parent")
        .arg(dir.path())
        .args(["--now", NOW, "--last-tuesday", "--json", "--input", "-"])
        .write_stdin(FIXTURE)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["items"][0]["total_commits"], 2);
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let out = yday(&dir, &missing)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Failed to read collector output"));
}

#[test]
fn projects_lists_git_directories_only() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("alpha/.git")).unwrap();
    fs::create_dir_all(dir.path().join("beta/.git")).unwrap();
    fs::create_dir_all(dir.path().join("notes")).unwrap();

    let out = Command::cargo_bin("yday")
        .unwrap()
        .arg("--parent")
        .arg(dir.path())
        .arg("projects")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "- alpha\n- beta\n");
}

#[test]
fn scans_real_repositories_under_parent() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    let repo = dir.path().join("widget");
    fs::create_dir_all(&repo).unwrap();
    init_git_repo(&repo);
    commit_file(&repo, "src/a.rs", "fn a(){}\n");
    commit_file(&repo, "src/b.rs", "fn b(){}\n");

    let mut cmd = Command::cargo_bin("yday").unwrap();
    cmd.env_remove("YDAY_NOW")
        .arg("--parent")
        .arg(dir.path())
        .args(["--days", "2", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["items"][0]["repository_name"], "widget");
    assert_eq!(v["items"][0]["total_commits"], 2);
    assert_eq!(v["validation"]["is_valid"], true);
}

#[test]
fn date_bounds_hold_in_week_view() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("range.txt");
    fs::write(
        &input,
        "\
/Users/test/workspace/repo
c0ffee1 - Early July (2025-07-05 10:00:00 +0000) <Dev>
c0ffee2 - Late July (2025-07-30 10:00:00 +0000) <Dev>
c0ffee3 - After the range (2025-08-02 10:00:00 +0000) <Dev>
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("yday").unwrap();
    cmd.env_remove("YDAY_PARENT")
        .arg("--parent")
        .arg(dir.path())
        .args(["--now", "2025-08-10T12:00:00Z"])
        .args(["--after", "2025-07-01", "--before", "2025-07-31", "--json", "--input"])
        .arg(&input);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["title"], "Week beginning Monday, July 28, 2025");
    assert_eq!(v["timespan"]["start"], "2025-07-01T00:00:00Z");
    assert_eq!(v["window"]["start"], "2025-07-28T00:00:00Z");
    assert_eq!(v["window"]["end"], "2025-07-31T23:59:59.999Z");
    assert_eq!(v["items"][0]["pattern"], "··1····");
    assert_eq!(v["items"][0]["total_commits"], 1);
    assert_eq!(v["validation"]["is_valid"], true);
}

#[test]
fn author_date_decides_the_day() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    let repo = dir.path().join("rebased");
    fs::create_dir_all(&repo).unwrap();
    init_git_repo(&repo);
    fs::write(repo.join("notes.txt"), "tuesday work\n").unwrap();
    git(&repo, &["add", "."]);
    assert!(Command::new("git")
        .args(["commit", "-m", "tuesday work"])
        .env("GIT_AUTHOR_DATE", "2025-07-29T10:00:00+0000")
        .env("GIT_COMMITTER_DATE", "2025-08-01T10:00:00+0000")
        .current_dir(&repo)
        .status()
        .unwrap()
        .success());

    let mut cmd = Command::cargo_bin("yday").unwrap();
    cmd.env_remove("YDAY_NOW")
        .arg("--parent")
        .arg(dir.path())
        .args(["--now", NOW, "--last-tuesday", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["items"][0]["repository_name"], "rebased");
    assert_eq!(v["items"][0]["total_commits"], 1);
}

#[test]
fn single_day_json_window_matches_timespan() {
    let dir = tempdir().unwrap();
    let input = fixture_file(&dir);

    let out = yday(&dir, &input)
        .args(["--last-tuesday", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["window"], v["timespan"]);
}

use pretty_assertions::assert_eq;
use yday::model::{DisplayKind, TimelineItem, WeekPattern};
use yday::validate::{check_item, validate, PatternTally};

fn week_item(name: &str, pattern: &str, total: usize) -> TimelineItem {
    TimelineItem {
        repository_name: name.to_string(),
        total_commits: total,
        pattern: Some(pattern.parse::<WeekPattern>().unwrap()),
        display_kind: DisplayKind::WeekPattern,
    }
}

#[test]
fn matching_pattern_is_valid() {
    let result = validate(&[week_item("td-core", "2···1··", 3)]);
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[test]
fn undercounting_pattern_is_reported() {
    let result = validate(&[week_item("td-core", "2···1··", 5)]);
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec!["td-core: pattern shows 3 commits but total is 5".to_string()]
    );
}

#[test]
fn overflow_pattern_is_a_lower_bound() {
    assert!(validate(&[week_item("busy", "+·3····", 15)]).is_valid);
    assert!(validate(&[week_item("busy", "+·3····", 13)]).is_valid);

    let result = validate(&[week_item("busy", "+·3····", 12)]);
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec!["busy: pattern shows at least 13 commits but total is 12".to_string()]
    );
}

#[test]
fn single_day_items_are_not_checked() {
    let item = TimelineItem {
        repository_name: "td-core".to_string(),
        total_commits: 4,
        pattern: None,
        display_kind: DisplayKind::SingleDay,
    };
    assert_eq!(check_item(&item), None);
    assert!(validate(&[item]).is_valid);
}

#[test]
fn every_failing_repository_is_listed() {
    let result = validate(&[
        week_item("a", "1······", 1),
        week_item("b", "1······", 2),
        week_item("c", "·······", 1),
    ]);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].starts_with("b:"));
    assert!(result.errors[1].starts_with("c:"));
}

#[test]
fn empty_timeline_is_valid() {
    assert!(validate(&[]).is_valid);
}

#[test]
fn tally_counts_exact_and_minimum_sums() {
    let tally = PatternTally::of(&"9+·+1··".parse().unwrap());
    assert_eq!(tally.exact_sum, 10);
    assert_eq!(tally.minimum_sum, 30);
    assert_eq!(tally.overflow_slots, 2);
    assert!(tally.accepts(30));
    assert!(!tally.accepts(29));

    let exact = PatternTally::of(&"1234567".parse().unwrap());
    assert_eq!(exact.exact_sum, 28);
    assert!(exact.accepts(28));
    assert!(!exact.accepts(29));
}

#[test]
fn single_digit_pattern_against_larger_total() {
    let result = validate(&[week_item("api", "5······", 14)]);
    assert!(!result.is_valid);
    assert_eq!(result.errors[0], "api: pattern shows 5 commits but total is 14");
}

#[test]
fn one_overflow_with_five_singles() {
    assert!(validate(&[week_item("api", "+11111·", 16)]).is_valid);

    let result = validate(&[week_item("api", "+11111·", 12)]);
    assert!(!result.is_valid);
    assert_eq!(
        result.errors[0],
        "api: pattern shows at least 15 commits but total is 12"
    );
}

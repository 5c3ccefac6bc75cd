//! Checks that every week pattern agrees with its repository total.
//!
//! Digits are exact, so a pattern without `+` must sum to the total. Each `+`
//! only promises at least ten commits, so a saturated pattern gives a lower bound.

use crate::model::{DaySlot, TimelineItem, ValidationResult, WeekPattern, OVERFLOW_THRESHOLD};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTally {
    pub exact_sum: usize,
    pub minimum_sum: usize,
    pub overflow_slots: usize,
}

impl PatternTally {
    pub fn of(pattern: &WeekPattern) -> Self {
        let mut tally = PatternTally {
            exact_sum: 0,
            minimum_sum: 0,
            overflow_slots: 0,
        };
        for slot in pattern.slots() {
            match *slot {
                DaySlot::Empty => {}
                DaySlot::Count(n) => {
                    tally.exact_sum += n as usize;
                    tally.minimum_sum += n as usize;
                }
                DaySlot::Overflow => {
                    tally.overflow_slots += 1;
                    tally.minimum_sum += OVERFLOW_THRESHOLD as usize;
                }
            }
        }
        tally
    }

    pub fn accepts(&self, total: usize) -> bool {
        if self.overflow_slots == 0 {
            self.exact_sum == total
        } else {
            total >= self.minimum_sum
        }
    }
}

pub fn check_item(item: &TimelineItem) -> Option<String> {
    let pattern = item.pattern.as_ref()?;
    let tally = PatternTally::of(pattern);
    if tally.accepts(item.total_commits) {
        return None;
    }

    Some(if tally.overflow_slots == 0 {
        format!(
            "{}: pattern shows {} commits but total is {}",
            item.repository_name, tally.exact_sum, item.total_commits
        )
    } else {
        format!(
            "{}: pattern shows at least {} commits but total is {}",
            item.repository_name, tally.minimum_sum, item.total_commits
        )
    })
}

pub fn validate(items: &[TimelineItem]) -> ValidationResult {
    let errors: Vec<String> = items.iter().filter_map(check_item).collect();
    debug!(checked = items.len(), failures = errors.len(), "Validated timeline");
    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

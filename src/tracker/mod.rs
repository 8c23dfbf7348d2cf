//! Domain operations. Every mutating function takes the
//! [Document](crate::store::document::Document) explicitly, validates its input
//! before touching anything, and leaves persistence to the caller.

pub mod dashboard;
pub mod focus;
pub mod journal;
pub mod mood;
pub mod vyvanse;
pub mod water;

use crate::{
    error::{validation, Result},
    utils::{clock::Clock, time::Timestamp},
};

pub(crate) fn stamp(clock: &dyn Clock) -> Timestamp {
    Timestamp::from_datetime(clock.now())
}

/// Trimmed copy of `value`, rejecting blank input.
pub(crate) fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(validation(format!("{field} can't be empty")));
    }
    Ok(value.to_string())
}

/// Blank optional text is stored as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Last `limit` items, newest first. `None` returns everything.
pub(crate) fn newest_first<T>(items: &[T], limit: Option<usize>) -> Vec<&T> {
    items.iter().rev().take(limit.unwrap_or(usize::MAX)).collect()
}

#[cfg(test)]
pub(crate) fn clock_at(moment: chrono::NaiveDateTime) -> crate::utils::clock::MockClock {
    let mut clock = crate::utils::clock::MockClock::new();
    clock.expect_now().return_const(moment);
    clock
}

use chrono::NaiveDate;
use tracing::info;

use crate::{
    error::{validation, Result},
    store::document::{Document, FocusSession},
    utils::clock::Clock,
};

use super::{newest_first, required_text, stamp};

/// Checks a session before anything happens, so a timer is never started for input that would be
/// rejected afterwards. Returns the cleaned task name.
pub fn validate(task: &str, planned_minutes: u32) -> Result<String> {
    let task = required_text("Task", task)?;
    if planned_minutes == 0 {
        return Err(validation("Planned minutes must be at least 1"));
    }
    Ok(task)
}

/// Appends one session. `actual_minutes` is what a timer measured, if one ran.
pub fn add(
    document: &mut Document,
    task: &str,
    planned_minutes: u32,
    actual_minutes: Option<u32>,
    clock: &dyn Clock,
) -> Result<FocusSession> {
    let task = validate(task, planned_minutes)?;
    let session = FocusSession {
        task,
        planned_minutes,
        actual_minutes,
        timestamp: stamp(clock),
    };
    info!("Logged focus session {:?}", session);
    document.focus.push(session.clone());
    Ok(session)
}

#[derive(Debug)]
pub struct FocusSummary<'a> {
    /// Minutes across every session, not only the listed ones.
    pub total_minutes: u64,
    /// Newest first.
    pub sessions: Vec<&'a FocusSession>,
}

pub fn summary(document: &Document, limit: Option<usize>) -> FocusSummary<'_> {
    FocusSummary {
        total_minutes: document.focus.iter().map(|v| u64::from(v.minutes())).sum(),
        sessions: newest_first(&document.focus, limit),
    }
}

pub fn minutes_on(document: &Document, date: NaiveDate) -> u64 {
    document
        .focus
        .iter()
        .filter(|v| v.timestamp.date() == date)
        .map(|v| u64::from(v.minutes()))
        .sum()
}

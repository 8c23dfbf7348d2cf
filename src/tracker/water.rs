use chrono::{Days, NaiveDate};
use tracing::info;

use crate::{
    error::{validation, Result},
    store::document::{Document, WaterEntry},
    utils::clock::Clock,
};

use super::stamp;

/// One graph block stands for a glass of water.
pub const GRAPH_BLOCK_ML: u64 = 250;
pub const GRAPH_DAYS: u64 = 7;
const PROGRESS_WIDTH: usize = 20;

pub fn log(document: &mut Document, milliliters: u32, clock: &dyn Clock) -> Result<WaterEntry> {
    if milliliters == 0 {
        return Err(validation("Water amount must be at least 1 ml"));
    }
    let entry = WaterEntry {
        milliliters,
        timestamp: stamp(clock),
    };
    info!("Logged water {:?}", entry);
    document.water.push(entry.clone());
    Ok(entry)
}

pub fn total_on(document: &Document, date: NaiveDate) -> u64 {
    document
        .water
        .iter()
        .filter(|v| v.timestamp.date() == date)
        .map(|v| u64::from(v.milliliters))
        .sum()
}

#[derive(Debug)]
pub struct WaterDay<'a> {
    pub total_ml: u64,
    pub entries: Vec<&'a WaterEntry>,
}

pub fn today<'a>(document: &'a Document, clock: &dyn Clock) -> WaterDay<'a> {
    let date = clock.now().date();
    WaterDay {
        total_ml: total_on(document, date),
        entries: document
            .water
            .iter()
            .filter(|v| v.timestamp.date() == date)
            .collect(),
    }
}

pub fn set_goal(document: &mut Document, milliliters: u32) -> Result<u32> {
    if milliliters == 0 {
        return Err(validation("Water goal must be at least 1 ml"));
    }
    document.water_goal = milliliters;
    info!("Water goal set to {milliliters} ml");
    Ok(milliliters)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterStatus {
    pub total_ml: u64,
    pub goal_ml: u32,
}

impl WaterStatus {
    pub fn progress_bar(&self) -> String {
        let goal = u64::from(self.goal_ml.max(1));
        let width = PROGRESS_WIDTH as u64;
        let filled = (self.total_ml.saturating_mul(width) / goal).min(width) as usize;
        format!(
            "[{}{}] {}/{} ml",
            "█".repeat(filled),
            "░".repeat(PROGRESS_WIDTH - filled),
            self.total_ml,
            self.goal_ml
        )
    }
}

pub fn status(document: &Document, clock: &dyn Clock) -> WaterStatus {
    WaterStatus {
        total_ml: total_on(document, clock.now().date()),
        goal_ml: document.water_goal,
    }
}

/// Totals for the last [GRAPH_DAYS] days ending today, oldest first.
pub fn graph(document: &Document, clock: &dyn Clock) -> Vec<(NaiveDate, u64)> {
    let today = clock.now().date();
    (0..GRAPH_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|day| (day, total_on(document, day)))
        .collect()
}

pub fn graph_bar(total_ml: u64) -> String {
    // Rounded to the nearest glass.
    let blocks = (total_ml + GRAPH_BLOCK_ML / 2) / GRAPH_BLOCK_ML;
    if blocks == 0 {
        "·".into()
    } else {
        "█".repeat(blocks as usize)
    }
}

/// Drops today's entries. Returns how many were removed.
pub fn reset_today(document: &mut Document, clock: &dyn Clock) -> usize {
    let date = clock.now().date();
    let before = document.water.len();
    document.water.retain(|v| v.timestamp.date() != date);
    let removed = before - document.water.len();
    info!("Removed {removed} water entries for {date}");
    removed
}

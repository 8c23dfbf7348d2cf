use tracing::info;

use crate::{
    error::{validation, Result},
    store::document::{Document, MoodEntry},
    utils::clock::Clock,
};

use super::{optional_text, stamp};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

pub fn log(
    document: &mut Document,
    rating: u8,
    note: Option<String>,
    clock: &dyn Clock,
) -> Result<MoodEntry> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(validation(format!(
            "Mood rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    let entry = MoodEntry {
        rating,
        note: optional_text(note),
        timestamp: stamp(clock),
    };
    info!("Logged mood {:?}", entry);
    document.mood.push(entry.clone());
    Ok(entry)
}

pub fn latest(document: &Document) -> Option<&MoodEntry> {
    document.mood.last()
}

/// Renders the last `limit` ratings as horizontal bars, oldest first so the trend reads top to
/// bottom. One line per entry.
pub fn graph(document: &Document, limit: Option<usize>) -> Vec<String> {
    let skip = limit.map_or(0, |v| document.mood.len().saturating_sub(v));
    document
        .mood
        .iter()
        .skip(skip)
        .enumerate()
        .map(|(index, entry)| {
            let note = entry
                .note
                .as_deref()
                .map(|v| format!(" {v}"))
                .unwrap_or_default();
            format!(
                "{:>3} {} {}/{MAX_RATING}{note} ({})",
                index + 1,
                rating_bar(entry.rating),
                entry.rating,
                entry.timestamp
            )
        })
        .collect()
}

fn rating_bar(rating: u8) -> String {
    let filled = usize::from(rating.min(MAX_RATING));
    format!(
        "{}{}",
        "█".repeat(filled),
        "·".repeat(usize::from(MAX_RATING) - filled)
    )
}

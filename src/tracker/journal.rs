use tracing::info;

use crate::{
    error::Result,
    store::document::{Document, HempEntry, SubstanceEntry},
    utils::clock::Clock,
};

use super::{newest_first, optional_text, required_text, stamp};

/// Free-form notes attached to a journal entry.
#[derive(Debug, Default, Clone)]
pub struct Reflection {
    pub feeling: Option<String>,
    pub outcome: Option<String>,
}

pub fn log_hemp(
    document: &mut Document,
    amount: &str,
    reflection: Reflection,
    clock: &dyn Clock,
) -> Result<HempEntry> {
    let entry = HempEntry {
        amount: required_text("Amount", amount)?,
        feeling: optional_text(reflection.feeling),
        outcome: optional_text(reflection.outcome),
        timestamp: stamp(clock),
    };
    info!("Logged hemp {:?}", entry);
    document.hemp.push(entry.clone());
    Ok(entry)
}

pub fn log_substance(
    document: &mut Document,
    name: &str,
    amount: &str,
    reflection: Reflection,
    clock: &dyn Clock,
) -> Result<SubstanceEntry> {
    let entry = SubstanceEntry {
        name: required_text("Substance name", name)?,
        amount: required_text("Amount", amount)?,
        feeling: optional_text(reflection.feeling),
        outcome: optional_text(reflection.outcome),
        timestamp: stamp(clock),
    };
    info!("Logged substance {:?}", entry);
    document.substance.push(entry.clone());
    Ok(entry)
}

pub fn recent_hemp(document: &Document, limit: Option<usize>) -> Vec<&HempEntry> {
    newest_first(&document.hemp, limit)
}

pub fn recent_substance(document: &Document, limit: Option<usize>) -> Vec<&SubstanceEntry> {
    newest_first(&document.substance, limit)
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::time::Timestamp;

/// Water goal used until the user sets one, roughly eight glasses.
pub const DEFAULT_WATER_GOAL_ML: u32 = 2000;

/// The whole tracker state as it is kept on disk. Every command loads one of these, changes it
/// and hands it back to [JsonStore](super::json_store::JsonStore). Missing keys fall back to
/// their defaults so a partially written file still loads. Top-level keys this version doesn't
/// know are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub focus: Vec<FocusSession>,
    pub mood: Vec<MoodEntry>,
    pub water: Vec<WaterEntry>,
    pub water_goal: u32,
    pub vyvanse: VyvanseState,
    pub hemp: Vec<HempEntry>,
    pub substance: Vec<SubstanceEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            focus: vec![],
            mood: vec![],
            water: vec![],
            water_goal: DEFAULT_WATER_GOAL_ML,
            vyvanse: VyvanseState::default(),
            hemp: vec![],
            substance: vec![],
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub task: String,
    pub planned_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_minutes: Option<u32>,
    pub timestamp: Timestamp,
}

impl FocusSession {
    /// Minutes that count towards totals. Sessions logged without a timer count what was planned.
    pub fn minutes(&self) -> u32 {
        self.actual_minutes.unwrap_or(self.planned_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub milliliters: u32,
    pub timestamp: Timestamp,
}

/// The one mutable record in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VyvanseState {
    pub pill_count: u32,
    pub daily_dosage: u32,
    /// `None` until the counter has been configured, taken from or refilled once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refill_date: Option<NaiveDate>,
    pub log: Vec<VyvanseEvent>,
}

impl Default for VyvanseState {
    fn default() -> Self {
        Self {
            pill_count: 0,
            daily_dosage: 1,
            refill_date: None,
            log: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VyvanseEventKind {
    Take,
    Refill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VyvanseEvent {
    pub kind: VyvanseEventKind,
    pub amount: u32,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HempEntry {
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceEntry {
    pub name: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{Document, DEFAULT_WATER_GOAL_ML};

    #[test]
    fn test_partial_document_fills_defaults() -> Result<()> {
        let document: Document = serde_json::from_str(
            r#"{"mood": [{"rating": 4, "timestamp": "2025-03-14T09:26"}]}"#,
        )?;

        assert_eq!(document.mood.len(), 1);
        assert_eq!(document.mood[0].note, None);
        assert_eq!(document.water_goal, DEFAULT_WATER_GOAL_ML);
        assert_eq!(document.vyvanse.daily_dosage, 1);
        assert!(document.vyvanse.refill_date.is_none());
        Ok(())
    }

    #[test]
    fn test_optional_fields_are_omitted() -> Result<()> {
        let value = serde_json::to_value(Document::default())?;
        assert!(value["vyvanse"].get("refill_date").is_none());
        assert_eq!(value["water_goal"], DEFAULT_WATER_GOAL_ML);
        Ok(())
    }

    #[test]
    fn test_unknown_keys_survive_a_rewrite() -> Result<()> {
        let document: Document = serde_json::from_str(
            r#"{"water": [], "vyvanse_log": [{"amount": 1}], "theme": "dark"}"#,
        )?;
        assert_eq!(document.extra.len(), 2);

        let value = serde_json::to_value(&document)?;
        assert_eq!(value["vyvanse_log"][0]["amount"], 1);
        assert_eq!(value["theme"], "dark");
        assert!(value.get("extra").is_none());
        Ok(())
    }
}

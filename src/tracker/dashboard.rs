use crate::{
    store::document::{Document, MoodEntry},
    utils::{clock::Clock, time::Timestamp},
};

use super::{
    focus, mood,
    vyvanse::{self, DosePhase, VyvanseStatus},
    water::{self, WaterStatus},
};

#[derive(Debug)]
pub struct LastDose {
    pub taken_at: Timestamp,
    pub phase: DosePhase,
}

/// A read-only overview of the day across every domain.
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub vyvanse: VyvanseStatus,
    pub last_dose: Option<LastDose>,
    pub water: WaterStatus,
    pub latest_mood: Option<&'a MoodEntry>,
    pub focus_minutes_today: u64,
}

pub fn snapshot<'a>(document: &'a Document, clock: &dyn Clock) -> Dashboard<'a> {
    let now = clock.now();
    Dashboard {
        vyvanse: vyvanse::status(document),
        last_dose: vyvanse::last_take(document).map(|taken_at| LastDose {
            taken_at,
            phase: DosePhase::from_elapsed(now - taken_at.datetime()),
        }),
        water: water::status(document, clock),
        latest_mood: mood::latest(document),
        focus_minutes_today: focus::minutes_on(document, now.date()),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use crate::{
        store::document::Document,
        tracker::{clock_at, focus, mood, vyvanse, water},
    };

    use super::snapshot;

    fn morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_document_snapshot() {
        let document = Document::default();
        let dashboard = snapshot(&document, &clock_at(morning()));

        assert!(dashboard.last_dose.is_none());
        assert!(dashboard.latest_mood.is_none());
        assert_eq!(dashboard.water.total_ml, 0);
        assert_eq!(dashboard.focus_minutes_today, 0);
        assert!(dashboard.vyvanse.needs_refill());
    }

    #[test]
    fn test_snapshot_collects_every_domain() -> Result<()> {
        let mut document = Document::default();
        let clock = clock_at(morning());
        vyvanse::configure(&mut document, 20, 1, &clock)?;
        vyvanse::take(&mut document, 1, &clock)?;
        water::log(&mut document, 300, &clock)?;
        mood::log(&mut document, 6, None, &clock)?;
        focus::add(&mut document, "plan", 20, Some(15), &clock)?;

        let later = clock_at(morning() + Duration::hours(4));
        let dashboard = snapshot(&document, &later);

        let dose = dashboard.last_dose.unwrap();
        assert_eq!(dose.phase, vyvanse::DosePhase::Plateau);
        assert_eq!(dashboard.vyvanse.pill_count, 19);
        assert_eq!(dashboard.water.total_ml, 300);
        assert_eq!(dashboard.latest_mood.map(|v| v.rating), Some(6));
        assert_eq!(dashboard.focus_minutes_today, 15);
        Ok(())
    }
}

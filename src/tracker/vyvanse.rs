use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::{
    error::{validation, Result, TrackerError},
    store::document::{Document, VyvanseEvent, VyvanseEventKind},
    utils::{
        clock::Clock,
        time::{days_after, Timestamp},
    },
};

use super::stamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VyvanseStatus {
    pub pill_count: u32,
    pub daily_dosage: u32,
    pub refill_date: Option<NaiveDate>,
}

impl VyvanseStatus {
    pub fn needs_refill(&self) -> bool {
        self.pill_count == 0
    }
}

/// Date the stock runs out at the current dosage: `today + pill_count / daily_dosage` days.
pub fn project_refill_date(
    pill_count: u32,
    daily_dosage: u32,
    today: NaiveDate,
) -> Result<NaiveDate> {
    let days_remaining = pill_count
        .checked_div(daily_dosage)
        .ok_or_else(|| validation("Daily dosage must be at least 1"))?;
    Ok(days_after(today, days_remaining))
}

pub fn status(document: &Document) -> VyvanseStatus {
    let state = &document.vyvanse;
    VyvanseStatus {
        pill_count: state.pill_count,
        daily_dosage: state.daily_dosage,
        refill_date: state.refill_date,
    }
}

pub fn configure(
    document: &mut Document,
    pill_count: u32,
    daily_dosage: u32,
    clock: &dyn Clock,
) -> Result<VyvanseStatus> {
    let refill_date = project_refill_date(pill_count, daily_dosage, clock.now().date())?;

    let state = &mut document.vyvanse;
    state.pill_count = pill_count;
    state.daily_dosage = daily_dosage;
    state.refill_date = Some(refill_date);
    info!("Configured vyvanse: {pill_count} pills, {daily_dosage} per day");
    Ok(status(document))
}

pub fn take(document: &mut Document, amount: u32, clock: &dyn Clock) -> Result<VyvanseStatus> {
    if amount == 0 {
        return Err(validation("Pill amount must be at least 1"));
    }
    let available = document.vyvanse.pill_count;
    let remaining = available
        .checked_sub(amount)
        .ok_or(TrackerError::InsufficientPills {
            requested: amount,
            available,
        })?;
    apply_change(document, remaining, VyvanseEventKind::Take, amount, clock)
}

pub fn refill(document: &mut Document, amount: u32, clock: &dyn Clock) -> Result<VyvanseStatus> {
    if amount == 0 {
        return Err(validation("Refill amount must be at least 1"));
    }
    let total = document
        .vyvanse
        .pill_count
        .checked_add(amount)
        .ok_or_else(|| validation(format!("Can't add {amount} pills to the current stock")))?;
    apply_change(document, total, VyvanseEventKind::Refill, amount, clock)
}

fn apply_change(
    document: &mut Document,
    pill_count: u32,
    kind: VyvanseEventKind,
    amount: u32,
    clock: &dyn Clock,
) -> Result<VyvanseStatus> {
    let timestamp = stamp(clock);
    // Projection can fail on a hand-edited dosage of 0, so it runs before anything changes.
    let refill_date =
        project_refill_date(pill_count, document.vyvanse.daily_dosage, timestamp.date())?;

    let state = &mut document.vyvanse;
    state.pill_count = pill_count;
    state.refill_date = Some(refill_date);
    state.log.push(VyvanseEvent {
        kind,
        amount,
        timestamp,
    });
    info!("Vyvanse {kind:?} of {amount}, {pill_count} left");
    Ok(status(document))
}

/// Timestamp of the most recent dose.
pub fn last_take(document: &Document) -> Option<Timestamp> {
    document
        .vyvanse
        .log
        .iter()
        .rev()
        .find(|v| v.kind == VyvanseEventKind::Take)
        .map(|v| v.timestamp)
}

/// Rough stage of a dose based on the time since it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DosePhase {
    /// The last dose is logged in the future.
    ClockAnomaly,
    Onset,
    Peak,
    Plateau,
    Taper,
    WornOff,
}

impl DosePhase {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        if elapsed < Duration::zero() {
            return DosePhase::ClockAnomaly;
        }
        match elapsed.num_minutes() {
            m if m < 30 => DosePhase::Onset,
            m if m < 3 * 60 => DosePhase::Peak,
            m if m < 6 * 60 => DosePhase::Plateau,
            m if m < 10 * 60 => DosePhase::Taper,
            _ => DosePhase::WornOff,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            DosePhase::ClockAnomaly => "time anomaly (dose logged in the future)",
            DosePhase::Onset => "onset (0-30 min)",
            DosePhase::Peak => "peak window (0.5-3 h after dose)",
            DosePhase::Plateau => "plateau (3-6 h after dose)",
            DosePhase::Taper => "taper (6-10 h after dose)",
            DosePhase::WornOff => "mostly worn off (10+ h)",
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use crate::{
        error::TrackerError,
        store::document::{Document, VyvanseEventKind},
        tracker::clock_at,
        utils::time::days_after,
    };

    use super::{configure, last_take, refill, status, take, DosePhase};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn morning() -> NaiveDateTime {
        today().and_hms_opt(8, 5, 41).unwrap()
    }

    #[test]
    fn test_configure_take_refill_scenario() -> Result<()> {
        let clock = clock_at(morning());
        let mut document = Document::default();

        let configured = configure(&mut document, 30, 1, &clock)?;
        assert_eq!(configured.refill_date, Some(days_after(today(), 30)));

        let taken = take(&mut document, 5, &clock)?;
        assert_eq!(taken.pill_count, 25);
        assert_eq!(taken.refill_date, Some(days_after(today(), 25)));

        let refilled = refill(&mut document, 10, &clock)?;
        assert_eq!(refilled.pill_count, 35);
        assert_eq!(refilled.refill_date, Some(days_after(today(), 35)));

        let kinds = document
            .vyvanse
            .log
            .iter()
            .map(|v| (v.kind, v.amount))
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![(VyvanseEventKind::Take, 5), (VyvanseEventKind::Refill, 10)]
        );
        Ok(())
    }

    #[test]
    fn test_take_projects_refill_for_every_valid_amount() -> Result<()> {
        let clock = clock_at(morning());
        for daily_dosage in 1..=3 {
            for pill_count in 0..=12 {
                for amount in 1..=pill_count {
                    let mut document = Document::default();
                    configure(&mut document, pill_count, daily_dosage, &clock)?;

                    let after = take(&mut document, amount, &clock)?;

                    let remaining = pill_count - amount;
                    assert_eq!(after.pill_count, remaining);
                    assert_eq!(
                        after.refill_date,
                        Some(days_after(today(), remaining / daily_dosage))
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_take_more_than_available_leaves_document_untouched() -> Result<()> {
        let clock = clock_at(morning());
        let mut document = Document::default();
        configure(&mut document, 3, 1, &clock)?;
        let before = document.clone();

        for amount in [4, 10, u32::MAX] {
            let result = take(&mut document, amount, &clock);
            assert!(matches!(
                result,
                Err(TrackerError::InsufficientPills {
                    requested,
                    available: 3
                }) if requested == amount
            ));
            assert_eq!(document, before);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_amounts_are_rejected() -> Result<()> {
        let clock = clock_at(morning());
        let mut document = Document::default();
        configure(&mut document, 10, 2, &clock)?;
        let before = document.clone();

        assert!(matches!(
            configure(&mut document, 10, 0, &clock),
            Err(TrackerError::Validation(_))
        ));
        assert!(matches!(
            take(&mut document, 0, &clock),
            Err(TrackerError::Validation(_))
        ));
        assert!(matches!(
            refill(&mut document, 0, &clock),
            Err(TrackerError::Validation(_))
        ));
        assert!(refill(&mut document, u32::MAX, &clock).is_err());
        assert_eq!(document, before);
        Ok(())
    }

    #[test]
    fn test_corrupt_dosage_is_rejected_without_changes() {
        let clock = clock_at(morning());
        let mut document = Document::default();
        document.vyvanse.pill_count = 5;
        document.vyvanse.daily_dosage = 0;
        let before = document.clone();

        assert!(take(&mut document, 1, &clock).is_err());
        assert_eq!(document, before);
    }

    #[test]
    fn test_refill_date_uses_whole_days() -> Result<()> {
        let clock = clock_at(morning());
        let mut document = Document::default();

        let configured = configure(&mut document, 7, 2, &clock)?;
        assert_eq!(configured.refill_date, Some(days_after(today(), 3)));
        assert!(!status(&document).needs_refill());

        take(&mut document, 7, &clock)?;
        assert_eq!(status(&document).refill_date, Some(today()));
        assert!(status(&document).needs_refill());
        Ok(())
    }

    #[test]
    fn test_last_take_skips_refills() -> Result<()> {
        let mut document = Document::default();
        configure(&mut document, 10, 1, &clock_at(morning()))?;
        assert_eq!(last_take(&document), None);

        take(&mut document, 1, &clock_at(morning()))?;
        let later = morning() + Duration::hours(4);
        refill(&mut document, 30, &clock_at(later))?;

        let last = last_take(&document).unwrap();
        assert_eq!(last.to_string(), "2025-03-14T08:05");
        Ok(())
    }

    #[test]
    fn test_dose_phase_boundaries() {
        let phase = |minutes| DosePhase::from_elapsed(Duration::minutes(minutes));
        assert_eq!(phase(-5), DosePhase::ClockAnomaly);
        assert_eq!(phase(0), DosePhase::Onset);
        assert_eq!(phase(30), DosePhase::Peak);
        assert_eq!(phase(179), DosePhase::Peak);
        assert_eq!(phase(180), DosePhase::Plateau);
        assert_eq!(phase(599), DosePhase::Taper);
        assert_eq!(phase(600), DosePhase::WornOff);

        // Less than a minute ahead still counts as logged in the future.
        assert_eq!(
            DosePhase::from_elapsed(Duration::seconds(-30)),
            DosePhase::ClockAnomaly
        );
        assert_eq!(DosePhase::from_elapsed(Duration::seconds(30)), DosePhase::Onset);
    }
}

use std::fmt::Display;

use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// This is the standard way of writing a moment into the document in chaoscatcher.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A local wall-clock moment with minute precision. Stored as `YYYY-MM-DDTHH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(#[serde(with = "minute_ser")] NaiveDateTime);

impl Timestamp {
    /// Drops seconds and sub-second precision.
    pub fn from_datetime(moment: NaiveDateTime) -> Self {
        Timestamp(truncate_to_minute(moment))
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

fn truncate_to_minute(moment: NaiveDateTime) -> NaiveDateTime {
    moment
        .with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(moment)
}

/// `date + days`, saturating at the end of chrono's calendar.
pub fn days_after(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(days.into()))
        .unwrap_or(NaiveDate::MAX)
}

mod minute_ser {
    use chrono::NaiveDateTime;
    use serde::{self, de::Error, Deserialize, Deserializer, Serializer};

    use super::{truncate_to_minute, TIMESTAMP_FORMAT};

    pub fn serialize<S>(moment: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&moment.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Hand-edited files sometimes carry seconds, those are accepted and dropped on next write.
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
            .map(truncate_to_minute)
            .map_err(|e| D::Error::custom(format!("invalid timestamp {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{days_after, Timestamp};

    #[test]
    fn test_timestamp_drops_seconds() -> Result<()> {
        let moment = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap();
        let timestamp = Timestamp::from_datetime(moment);

        assert_eq!(timestamp.to_string(), "2025-03-14T09:26");
        assert_eq!(serde_json::to_string(&timestamp)?, "\"2025-03-14T09:26\"");
        Ok(())
    }

    #[test]
    fn test_timestamp_parses_legacy_seconds() -> Result<()> {
        let timestamp: Timestamp = serde_json::from_str("\"2025-03-14T09:26:53\"")?;
        assert_eq!(timestamp.to_string(), "2025-03-14T09:26");
        assert_eq!(timestamp.datetime().format("%S").to_string(), "00");

        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
        Ok(())
    }

    #[test]
    fn test_days_after_crosses_month() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        assert_eq!(
            days_after(date, 30),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }
}

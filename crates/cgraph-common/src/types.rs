//! Common type definitions and newtype wrappers for domain modeling.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// First day of a calendar week bucket. Always a Monday.
///
/// The only way to obtain one is [`WeekStart::containing`] (or stepping an
/// existing value), so window generation and commit bucketing cannot drift
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WeekStart(NaiveDate);

impl WeekStart {
    /// The Monday of the week that contains `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_monday());
        Self(date - Duration::days(offset))
    }

    /// The week bucket a UTC instant falls into.
    #[must_use]
    pub fn of_instant(instant: DateTime<Utc>) -> Self {
        Self::containing(instant.date_naive())
    }

    /// The following week.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + Duration::days(7))
    }

    /// The Monday this bucket starts on.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM` when this week is the first one starting in its month,
    /// otherwise an empty string.
    #[must_use]
    pub fn month_label(self) -> String {
        if self.0.day() <= 7 {
            self.0.format("%Y-%m").to_string()
        } else {
            String::new()
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl<'de> Deserialize<'de> for WeekStart {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        NaiveDate::deserialize(deserializer).map(Self::containing)
    }
}

impl From<WeekStart> for NaiveDate {
    fn from(week: WeekStart) -> Self {
        week.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_containing_aligns_to_monday() {
        // 2024-01-01 is a Monday
        for day in 1..=7 {
            assert_eq!(WeekStart::containing(date(2024, 1, day)).date(), date(2024, 1, 1));
        }
        assert_eq!(WeekStart::containing(date(2024, 1, 8)).date(), date(2024, 1, 8));
    }

    #[test]
    fn test_containing_crosses_year_boundary() {
        // Sunday 2023-01-01 belongs to the week of Monday 2022-12-26
        assert_eq!(WeekStart::containing(date(2023, 1, 1)).date(), date(2022, 12, 26));
    }

    #[test]
    fn test_of_instant_boundaries() {
        let monday_midnight = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        let sunday_last_second = Utc.with_ymd_and_hms(2024, 1, 7, 23, 59, 59).unwrap();

        assert_eq!(WeekStart::of_instant(monday_midnight).date(), date(2024, 1, 8));
        assert_eq!(WeekStart::of_instant(sunday_last_second).date(), date(2024, 1, 1));
    }

    #[test]
    fn test_next_steps_seven_days() {
        let week = WeekStart::containing(date(2024, 2, 28));
        assert_eq!(week.next().date(), date(2024, 3, 4));
        assert_eq!(week.next().date().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(WeekStart::containing(date(2024, 1, 1)).month_label(), "2024-01");
        assert_eq!(WeekStart::containing(date(2024, 7, 1)).month_label(), "2024-07");
        assert_eq!(WeekStart::containing(date(2024, 1, 8)).month_label(), "");
        assert_eq!(WeekStart::containing(date(2024, 4, 29)).month_label(), "");
    }

    #[test]
    fn test_display_and_serde() {
        let week = WeekStart::containing(date(2024, 3, 6));
        assert_eq!(week.to_string(), "2024-03-04");
        assert_eq!(serde_json::to_string(&week).unwrap(), "\"2024-03-04\"");

        let parsed: WeekStart = serde_json::from_str("\"2024-03-06\"").unwrap();
        assert_eq!(parsed, week);
    }
}

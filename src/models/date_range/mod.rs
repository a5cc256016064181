// Date range module
// Inclusive seven-day window of calendar days

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const DAYS_IN_WEEK: i64 = 7;

/// First day of a displayed week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    fn days_since_start(self, day: NaiveDate) -> i64 {
        let offset = match self {
            WeekStart::Sunday => day.weekday().num_days_from_sunday(),
            WeekStart::Monday => day.weekday().num_days_from_monday(),
        };
        i64::from(offset)
    }
}

/// Inclusive `(start, end)` pair spanning exactly seven consecutive days.
///
/// Fields are private so every value upholds `end == start + 6 days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Window whose first day is `start`, or `None` when the last day falls
    /// past the end of the calendar.
    pub fn try_starting_at(start: NaiveDate) -> Option<Self> {
        let end = start.checked_add_signed(Duration::days(DAYS_IN_WEEK - 1))?;
        Some(Self { start, end })
    }

    /// Window whose first day is `start`.
    ///
    /// Saturates to the last representable week near `NaiveDate::MAX`.
    pub fn starting_at(start: NaiveDate) -> Self {
        Self::try_starting_at(start).unwrap_or_else(Self::latest)
    }

    /// Window containing `day`, anchored on `week_start`.
    pub fn try_week_containing(day: NaiveDate, week_start: WeekStart) -> Option<Self> {
        let start = day.checked_sub_signed(Duration::days(week_start.days_since_start(day)))?;
        Self::try_starting_at(start)
    }

    /// Window containing `day`, anchored on `week_start`.
    ///
    /// At either end of the calendar this falls back to the first or last
    /// seven representable days, which may not begin on `week_start`.
    pub fn week_containing(day: NaiveDate, week_start: WeekStart) -> Self {
        Self::try_week_containing(day, week_start).unwrap_or_else(|| Self::nearest_bound(day))
    }

    /// First seven days chrono can represent.
    pub fn earliest() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MIN + Duration::days(DAYS_IN_WEEK - 1),
        }
    }

    /// Last seven days chrono can represent.
    pub fn latest() -> Self {
        Self {
            start: NaiveDate::MAX - Duration::days(DAYS_IN_WEEK - 1),
            end: NaiveDate::MAX,
        }
    }

    fn nearest_bound(day: NaiveDate) -> Self {
        if day.year() < 0 {
            Self::earliest()
        } else {
            Self::latest()
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Same window moved by `weeks` whole weeks (negative moves backward),
    /// or `None` when it would leave the calendar.
    pub fn try_shifted_weeks(&self, weeks: i64) -> Option<Self> {
        let days = weeks.checked_mul(DAYS_IN_WEEK)?;
        let start = self.start.checked_add_signed(Duration::try_days(days)?)?;
        Self::try_starting_at(start)
    }

    /// Same window moved by `weeks` whole weeks, saturating at the calendar
    /// bounds.
    pub fn shifted_weeks(&self, weeks: i64) -> Self {
        self.try_shifted_weeks(weeks).unwrap_or_else(|| {
            if weeks < 0 {
                Self::earliest()
            } else {
                Self::latest()
            }
        })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The seven days of the window in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..DAYS_IN_WEEK).map(move |offset| start + Duration::days(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_starting_at_spans_seven_days() {
        let range = DateRange::starting_at(ymd(2024, 3, 4));
        assert_eq!(range.end(), ymd(2024, 3, 10));
        assert_eq!(range.len_days(), 7);
    }

    #[test_case(ymd(2024, 3, 6), WeekStart::Monday, ymd(2024, 3, 4) ; "wednesday monday start")]
    #[test_case(ymd(2024, 3, 10), WeekStart::Monday, ymd(2024, 3, 4) ; "sunday belongs to previous monday")]
    #[test_case(ymd(2024, 3, 10), WeekStart::Sunday, ymd(2024, 3, 10) ; "sunday starts its own week")]
    #[test_case(ymd(2024, 3, 9), WeekStart::Sunday, ymd(2024, 3, 3) ; "saturday sunday start")]
    #[test_case(ymd(2025, 1, 1), WeekStart::Monday, ymd(2024, 12, 30) ; "crosses year boundary")]
    fn test_week_containing(day: NaiveDate, week_start: WeekStart, expected_start: NaiveDate) {
        let range = DateRange::week_containing(day, week_start);
        assert_eq!(range.start(), expected_start);
        assert!(range.contains(day));
        assert_eq!(range.start().weekday(), week_start.weekday());
    }

    #[test]
    fn test_shifted_weeks_round_trip() {
        let range = DateRange::starting_at(ymd(2024, 2, 26));
        let moved = range.shifted_weeks(1);
        assert_eq!(moved.start(), ymd(2024, 3, 4));
        assert_eq!(moved.shifted_weeks(-1), range);
    }

    #[test]
    fn test_days_lists_every_day_in_order() {
        let range = DateRange::starting_at(ymd(2024, 2, 26));
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[3], ymd(2024, 2, 29));
        assert_eq!(days[6], range.end());
    }

    #[test]
    fn test_try_constructors_reject_calendar_overflow() {
        assert_eq!(DateRange::try_starting_at(NaiveDate::MAX), None);
        assert_eq!(DateRange::latest().try_shifted_weeks(1), None);
        assert_eq!(DateRange::earliest().try_shifted_weeks(-1), None);
        assert_eq!(DateRange::starting_at(ymd(2024, 3, 4)).try_shifted_weeks(i64::MAX), None);
    }

    #[test]
    fn test_saturating_constructors_stay_seven_days() {
        let last = DateRange::week_containing(NaiveDate::MAX, WeekStart::Sunday);
        assert_eq!(last, DateRange::latest());
        assert_eq!(last.end(), NaiveDate::MAX);
        assert_eq!(last.len_days(), 7);

        assert_eq!(
            DateRange::week_containing(NaiveDate::MIN, WeekStart::Monday),
            DateRange::earliest()
        );
        assert_eq!(DateRange::starting_at(NaiveDate::MAX), DateRange::latest());
        assert_eq!(
            DateRange::starting_at(ymd(2024, 3, 4)).shifted_weeks(i64::MIN),
            DateRange::earliest()
        );
        assert_eq!(DateRange::earliest().days().count(), 7);
    }
}

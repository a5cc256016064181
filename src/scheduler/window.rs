use chrono::NaiveDate;

use crate::models::date_range::{DateRange, WeekStart};
use crate::utils::date::today;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDirection {
    Backward,
    Forward,
    ResetToToday,
}

/// Owns the visible seven-day window.
#[derive(Clone, Debug)]
pub struct DateWindow {
    range: DateRange,
    week_start: WeekStart,
}

impl DateWindow {
    /// Window for the week containing the current local day.
    pub fn new(week_start: WeekStart) -> Self {
        Self::with_today(today(), week_start)
    }

    pub fn with_today(today: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            range: DateRange::week_containing(today, week_start),
            week_start,
        }
    }

    pub fn current_range(&self) -> DateRange {
        self.range
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Move the window. `ResetToToday` reads the clock at call time.
    pub fn page(&mut self, direction: PageDirection) -> DateRange {
        self.page_at(direction, today())
    }

    /// Like [`page`](Self::page) with an explicit `today`. A move past either
    /// end of the calendar leaves the window where it is.
    pub fn page_at(&mut self, direction: PageDirection, today: NaiveDate) -> DateRange {
        let next = match direction {
            PageDirection::Backward => self.range.try_shifted_weeks(-1),
            PageDirection::Forward => self.range.try_shifted_weeks(1),
            PageDirection::ResetToToday => DateRange::try_week_containing(today, self.week_start),
        };
        match next {
            Some(range) => {
                self.range = range;
                log::debug!(
                    "Date window paged {:?} to {} .. {}",
                    direction,
                    range.start(),
                    range.end()
                );
            }
            None => log::warn!(
                "Cannot page {:?} from {}: outside the supported calendar",
                direction,
                self.range.start()
            ),
        }
        self.range
    }

    /// Show the week containing `day`. Days whose week cannot be represented
    /// leave the window unchanged.
    pub fn jump_to(&mut self, day: NaiveDate) -> DateRange {
        match DateRange::try_week_containing(day, self.week_start) {
            Some(range) => self.range = range,
            None => log::warn!("Cannot show the week of {}: outside the supported calendar", day),
        }
        self.range
    }
}

// Event module
// A routine scheduled on a calendar day

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::routine::Routine;

/// Scheduling assignment of exactly one routine to one calendar day.
///
/// `id` is `None` while the event only exists as an optimistic local entry
/// that the server has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub routine: Routine,
    pub date: NaiveDate,
}

impl Event {
    /// Create a server-confirmed event
    ///
    /// # Examples
    /// ```
    /// use workout_scheduler::models::event::Event;
    /// use workout_scheduler::models::routine::Routine;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    /// let event = Event::new(42, Routine::new("r1", "Legs", "ff0000"), day);
    /// assert!(!event.is_pending());
    /// ```
    pub fn new(id: i64, routine: Routine, date: NaiveDate) -> Self {
        Self {
            id: Some(id),
            routine,
            date,
        }
    }

    /// Create an optimistic event that is still awaiting server confirmation
    pub fn pending(routine: Routine, date: NaiveDate) -> Self {
        Self {
            id: None,
            routine,
            date,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_none()
    }

    pub fn routine_id(&self) -> &str {
        &self.routine.id
    }

    /// Whether the event falls on the given day according to `matching`.
    pub fn falls_on(&self, day: NaiveDate, matching: DayMatching) -> bool {
        match matching {
            DayMatching::ExactDate => self.date == day,
            DayMatching::Weekday => self.date.weekday() == day.weekday(),
        }
    }
}

/// How events are assigned to day columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMatching {
    /// Event is shown only on its own calendar date.
    #[default]
    ExactDate,
    /// Event is shown under every column sharing its day of week.
    Weekday,
}

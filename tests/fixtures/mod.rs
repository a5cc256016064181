// Test fixtures - reusable test data
// Provides consistent routines, dates and an in-memory events API

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use workout_scheduler::models::date_range::DateRange;
use workout_scheduler::models::event::Event;
use workout_scheduler::models::routine::Routine;
use workout_scheduler::services::api::{ApiError, ScheduleApi};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Monday Mar 4, 2024
    pub fn monday_mar_4_2024() -> NaiveDate {
        ymd(2024, 3, 4)
    }

    /// Wednesday Mar 6, 2024
    pub fn wednesday_mar_6_2024() -> NaiveDate {
        ymd(2024, 3, 6)
    }

    /// Friday Mar 8, 2024
    pub fn friday_mar_8_2024() -> NaiveDate {
        ymd(2024, 3, 8)
    }

    /// Mon Mar 4 .. Sun Mar 10, 2024
    pub fn week_of_mar_4_2024() -> DateRange {
        DateRange::starting_at(monday_mar_4_2024())
    }
}

/// Sample routines for testing
pub mod routines {
    use super::*;

    pub fn legs() -> Routine {
        Routine::new("r1", "Leg day", "ff0000")
    }

    pub fn push() -> Routine {
        Routine::new("r2", "Push", "00ff00")
    }

    pub fn catalog() -> Vec<Routine> {
        vec![legs(), push()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchRoutines,
    FetchEvents(DateRange),
    Create { routine_id: String, date: NaiveDate },
    Delete(i64),
}

#[derive(Debug, Default)]
struct FailurePlan {
    creates: usize,
    deletes: usize,
    fetches: usize,
}

#[derive(Debug)]
struct ServerState {
    routines: Vec<Routine>,
    events: Vec<Event>,
    next_id: i64,
}

/// Records every call and keeps a tiny server-side event table.
#[derive(Debug)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    state: Mutex<ServerState>,
    failures: Mutex<FailurePlan>,
}

impl RecordingApi {
    pub fn new(routines: Vec<Routine>, events: Vec<Event>) -> Self {
        let next_id = events.iter().filter_map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            calls: Mutex::new(Vec::new()),
            state: Mutex::new(ServerState {
                routines,
                events,
                next_id,
            }),
            failures: Mutex::new(FailurePlan::default()),
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn server_events(&self) -> Vec<Event> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn fail_next_creates(&self, count: usize) {
        self.failures.lock().unwrap().creates = count;
    }

    pub fn fail_next_deletes(&self, count: usize) {
        self.failures.lock().unwrap().deletes = count;
    }

    pub fn fail_next_fetches(&self, count: usize) {
        self.failures.lock().unwrap().fetches = count;
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_failure(counter: &mut usize) -> bool {
        if *counter > 0 {
            *counter -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl ScheduleApi for RecordingApi {
    async fn fetch_routines(&self) -> Result<Vec<Routine>, ApiError> {
        self.record(ApiCall::FetchRoutines);
        Ok(self.state.lock().unwrap().routines.clone())
    }

    async fn fetch_events(&self, range: &DateRange) -> Result<Vec<Event>, ApiError> {
        self.record(ApiCall::FetchEvents(*range));
        if Self::take_failure(&mut self.failures.lock().unwrap().fetches) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .events
            .iter()
            .filter(|event| range.contains(event.date))
            .cloned()
            .collect())
    }

    async fn create_event(&self, routine_id: &str, date: NaiveDate) -> Result<(), ApiError> {
        self.record(ApiCall::Create {
            routine_id: routine_id.to_string(),
            date,
        });
        if Self::take_failure(&mut self.failures.lock().unwrap().creates) {
            return Err(ApiError::Status(500));
        }

        let mut state = self.state.lock().unwrap();
        let routine = state
            .routines
            .iter()
            .find(|routine| routine.id == routine_id)
            .cloned()
            .ok_or(ApiError::Status(400))?;
        let id = state.next_id;
        state.next_id += 1;
        state.events.push(Event::new(id, routine, date));
        Ok(())
    }

    async fn delete_event(&self, event_id: i64) -> Result<(), ApiError> {
        self.record(ApiCall::Delete(event_id));
        if Self::take_failure(&mut self.failures.lock().unwrap().deletes) {
            return Err(ApiError::Status(503));
        }
        self.state
            .lock()
            .unwrap()
            .events
            .retain(|event| event.id != Some(event_id));
        Ok(())
    }
}

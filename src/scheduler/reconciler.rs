//! Drag sessions and the local event collection.
//!
//! Drops are applied optimistically to the local collection first, then the
//! matching remote calls run and the collection is replaced by a re-fetch.
//! Remote failures are logged, recorded in [`SyncStatus`] and published on
//! the notification bus; they never propagate to the caller.

use std::sync::Arc;

use chrono::NaiveDate;

use super::drag::{DragManager, DragSession};
use super::status::SyncStatus;
use crate::models::date_range::DateRange;
use crate::models::event::{DayMatching, Event};
use crate::models::routine::Routine;
use crate::services::api::{ApiError, ScheduleApi};
use crate::services::notification::{NotificationBus, SchedulerNotice, SyncOperation};

/// Remote work left to do after a drop has been applied locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingMutation {
    Create {
        routine_id: String,
        day: NaiveDate,
    },
    Move {
        source_event_id: i64,
        routine_id: String,
        day: NaiveDate,
        /// Date of the source event, used to restore it if the move fails halfway.
        original_day: Option<NaiveDate>,
    },
}

/// Identifies one fetch; only the most recently issued ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    range: DateRange,
}

impl FetchTicket {
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct EventReconciler {
    api: Arc<dyn ScheduleApi>,
    notifications: NotificationBus,
    matching: DayMatching,
    events: Vec<Event>,
    drag: DragManager,
    generation: u64,
    status: SyncStatus,
}

impl EventReconciler {
    pub fn new(
        api: Arc<dyn ScheduleApi>,
        notifications: NotificationBus,
        matching: DayMatching,
    ) -> Self {
        Self {
            api,
            notifications,
            matching,
            events: Vec::new(),
            drag: DragManager::new(),
            generation: 0,
            status: SyncStatus::default(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events to render under the column for `day`.
    pub fn events_on(&self, day: NaiveDate) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| event.falls_on(day, self.matching))
            .collect()
    }

    pub fn find_event(&self, event_id: i64) -> Option<&Event> {
        self.events.iter().find(|event| event.id == Some(event_id))
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.drag.active()
    }

    pub fn current_event_id(&self) -> Option<i64> {
        self.drag.current_event_id()
    }

    pub fn preview(&self) -> Option<(&Routine, NaiveDate)> {
        self.drag.preview()
    }

    pub fn begin_drag(&mut self, routine: Routine, source_event_id: Option<i64>) -> &DragSession {
        let session = DragSession::new(routine, source_event_id);
        log::debug!(
            "Drag started for routine {} ({:?})",
            session.routine.id,
            session.mode()
        );
        self.notifications.publish(&SchedulerNotice::DragStarted {
            routine_id: session.routine.id.clone(),
            mode: session.mode(),
        });
        self.drag.begin(session)
    }

    /// Record the hovered day for preview rendering. No effect without a drag.
    pub fn hover(&mut self, day: NaiveDate) -> bool {
        self.drag.update_hover(day)
    }

    pub fn leave_hover(&mut self) {
        self.drag.clear_hover();
    }

    /// Drag ended without a drop. Returns false when nothing was active.
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.cancel() {
            Some(session) => {
                log::debug!("Drag cancelled for routine {}", session.routine.id);
                self.notifications.publish(&SchedulerNotice::DragCancelled {
                    routine_id: session.routine.id,
                });
                true
            }
            None => false,
        }
    }

    /// Apply a drop locally: end the session and append an optimistic event.
    pub fn drop_on(&mut self, day: NaiveDate) -> Option<PendingMutation> {
        let session = self.drag.finish()?;
        let routine_id = session.routine.id.clone();

        let mutation = match session.source_event_id {
            Some(source_event_id) => PendingMutation::Move {
                source_event_id,
                routine_id,
                day,
                original_day: self.find_event(source_event_id).map(|event| event.date),
            },
            None => PendingMutation::Create { routine_id, day },
        };

        self.events.push(Event::pending(session.routine, day));
        Some(mutation)
    }

    /// Issue the remote calls for `mutation`, then re-fetch `range`.
    pub async fn commit(&mut self, mutation: PendingMutation, range: &DateRange) {
        self.status.clear_error();
        match mutation {
            PendingMutation::Create { routine_id, day } => {
                log::info!("Creating event for routine {} on {}", routine_id, day);
                if let Err(err) = self.api.create_event(&routine_id, day).await {
                    self.report_failure(SyncOperation::CreateEvent, err);
                }
            }
            PendingMutation::Move {
                source_event_id,
                routine_id,
                day,
                original_day,
            } => {
                self.move_event(source_event_id, &routine_id, day, original_day)
                    .await;
            }
        }

        self.fetch(range).await;
    }

    /// Drop the active session on `day`. Returns false when no drag was active.
    pub async fn complete_drag(&mut self, day: NaiveDate, range: &DateRange) -> bool {
        match self.drop_on(day) {
            Some(mutation) => {
                self.commit(mutation, range).await;
                true
            }
            None => {
                log::debug!("Drop on {} ignored, no active drag", day);
                false
            }
        }
    }

    /// Delete the source event of the last drag (trash target).
    pub async fn delete_current_event(&mut self, range: &DateRange) -> bool {
        let Some(event_id) = self.drag.take_current_event_id() else {
            log::debug!("Trash drop ignored, no source event recorded");
            return false;
        };

        log::info!("Deleting event {}", event_id);
        self.status.clear_error();
        if let Err(err) = self.api.delete_event(event_id).await {
            self.report_failure(SyncOperation::DeleteEvent, err);
        }

        self.fetch(range).await;
        true
    }

    /// Start a fetch; any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self, range: &DateRange) -> FetchTicket {
        self.generation += 1;
        self.status.is_fetching = true;
        FetchTicket {
            generation: self.generation,
            range: *range,
        }
    }

    /// Apply a fetch result. Returns true when the collection was replaced.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Event>, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Discarding stale events response for {} .. {}",
                ticket.range.start(),
                ticket.range.end()
            );
            return false;
        }

        self.status.is_fetching = false;
        match result {
            Ok(events) => {
                self.events = events;
                self.status.clear_error_for(SyncOperation::FetchEvents);
                self.notifications.publish(&SchedulerNotice::EventsReplaced {
                    count: self.events.len(),
                });
                true
            }
            Err(err) => {
                self.report_failure(SyncOperation::FetchEvents, err);
                false
            }
        }
    }

    /// Re-fetch `range` and return the resulting collection. On failure the
    /// previous collection is kept.
    pub async fn fetch(&mut self, range: &DateRange) -> &[Event] {
        let ticket = self.begin_fetch(range);
        let result = self.api.fetch_events(range).await;
        self.apply_fetch(ticket, result);
        &self.events
    }

    pub(crate) fn report_failure(&mut self, operation: SyncOperation, error: ApiError) {
        log::warn!("{:?} failed: {}", operation, error);
        self.notifications.publish(&SchedulerNotice::SyncFailed {
            operation,
            message: error.to_string(),
        });
        self.status.record_failure(operation, error);
    }

    // Delete, then create. A failed delete skips the create; a failed create
    // re-creates the source on its original day.
    async fn move_event(
        &mut self,
        source_event_id: i64,
        routine_id: &str,
        day: NaiveDate,
        original_day: Option<NaiveDate>,
    ) {
        log::info!(
            "Moving event {} (routine {}) to {}",
            source_event_id,
            routine_id,
            day
        );

        if let Err(err) = self.api.delete_event(source_event_id).await {
            self.report_failure(SyncOperation::DeleteEvent, err);
            return;
        }

        let Err(err) = self.api.create_event(routine_id, day).await else {
            return;
        };
        self.report_failure(SyncOperation::CreateEvent, err);

        let Some(original_day) = original_day else {
            log::error!(
                "Event {} was deleted but its replacement failed and its original date is unknown",
                source_event_id
            );
            return;
        };

        log::info!("Restoring routine {} on {}", routine_id, original_day);
        if let Err(err) = self.api.create_event(routine_id, original_day).await {
            self.report_failure(SyncOperation::RestoreEvent, err);
        }
    }
}

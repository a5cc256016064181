// Workout scheduler
// Ties the visible week, the routine catalog and the event reconciler together

pub mod catalog;
pub mod drag;
pub mod reconciler;
pub mod status;
pub mod window;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::date_range::DateRange;
use crate::models::event::{DayMatching, Event};
use crate::models::routine::Routine;
use crate::models::settings::CalendarSettings;
use crate::services::api::ScheduleApi;
use crate::services::notification::{NotificationBus, SyncOperation};
use crate::utils::date::week_days;

pub use catalog::RoutineCatalog;
pub use drag::{DragMode, DragSession};
pub use reconciler::{EventReconciler, FetchTicket, PendingMutation};
pub use status::{SyncFailure, SyncStatus};
pub use window::{DateWindow, PageDirection};

pub struct WorkoutScheduler {
    api: Arc<dyn ScheduleApi>,
    window: DateWindow,
    catalog: RoutineCatalog,
    reconciler: EventReconciler,
    notifications: NotificationBus,
}

impl WorkoutScheduler {
    /// Scheduler showing the current week.
    pub fn new(
        api: Arc<dyn ScheduleApi>,
        settings: &CalendarSettings,
        notifications: NotificationBus,
    ) -> Self {
        Self::with_window(
            api,
            DateWindow::new(settings.week_start),
            settings.day_matching,
            notifications,
        )
    }

    pub fn with_window(
        api: Arc<dyn ScheduleApi>,
        window: DateWindow,
        matching: DayMatching,
        notifications: NotificationBus,
    ) -> Self {
        let reconciler = EventReconciler::new(Arc::clone(&api), notifications.clone(), matching);
        Self {
            api,
            window,
            catalog: RoutineCatalog::new(),
            reconciler,
            notifications,
        }
    }

    /// Initial load: routine catalog and the visible week's events.
    pub async fn load(&mut self) {
        self.load_routines().await;
        self.refresh().await;
    }

    pub async fn load_routines(&mut self) -> &[Routine] {
        match self.catalog.refresh(self.api.as_ref()).await {
            Ok(count) => log::debug!("Loaded {} routines", count),
            Err(err) => self
                .reconciler
                .report_failure(SyncOperation::FetchRoutines, err),
        }
        self.catalog.routines()
    }

    pub async fn refresh(&mut self) -> &[Event] {
        let range = self.window.current_range();
        self.reconciler.fetch(&range).await
    }

    pub fn current_range(&self) -> DateRange {
        self.window.current_range()
    }

    /// Page the window and re-fetch the events for the new range.
    pub async fn page(&mut self, direction: PageDirection) -> DateRange {
        let range = self.window.page(direction);
        self.reconciler.fetch(&range).await;
        range
    }

    pub async fn page_at(&mut self, direction: PageDirection, today: NaiveDate) -> DateRange {
        let range = self.window.page_at(direction, today);
        self.reconciler.fetch(&range).await;
        range
    }

    pub async fn jump_to(&mut self, day: NaiveDate) -> DateRange {
        let range = self.window.jump_to(day);
        self.reconciler.fetch(&range).await;
        range
    }

    pub fn begin_drag(&mut self, routine: Routine, source_event_id: Option<i64>) -> &DragSession {
        self.reconciler.begin_drag(routine, source_event_id)
    }

    /// Start dragging a routine from the catalog.
    pub fn begin_drag_routine(&mut self, routine_id: &str) -> Option<&DragSession> {
        let routine = self.catalog.find(routine_id)?.clone();
        Some(self.reconciler.begin_drag(routine, None))
    }

    /// Start dragging an event that is shown in the current window.
    pub fn begin_drag_event(&mut self, event_id: i64) -> Option<&DragSession> {
        let routine = self.reconciler.find_event(event_id)?.routine.clone();
        Some(self.reconciler.begin_drag(routine, Some(event_id)))
    }

    pub fn hover(&mut self, day: NaiveDate) -> bool {
        self.reconciler.hover(day)
    }

    pub fn leave_hover(&mut self) {
        self.reconciler.leave_hover();
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.reconciler.cancel_drag()
    }

    pub async fn complete_drag(&mut self, day: NaiveDate) -> bool {
        let range = self.window.current_range();
        self.reconciler.complete_drag(day, &range).await
    }

    pub async fn delete_current_event(&mut self) -> bool {
        let range = self.window.current_range();
        self.reconciler.delete_current_event(&range).await
    }

    pub fn events(&self) -> &[Event] {
        self.reconciler.events()
    }

    pub fn events_on(&self, day: NaiveDate) -> Vec<&Event> {
        self.reconciler.events_on(day)
    }

    pub fn week_days(&self) -> Vec<NaiveDate> {
        week_days(&self.window.current_range())
    }

    pub fn routines(&self) -> &[Routine] {
        self.catalog.routines()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.reconciler.session()
    }

    pub fn preview(&self) -> Option<(&Routine, NaiveDate)> {
        self.reconciler.preview()
    }

    pub fn status(&self) -> &SyncStatus {
        self.reconciler.status()
    }

    pub fn notifications(&self) -> &NotificationBus {
        &self.notifications
    }
}

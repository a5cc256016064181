use chrono::NaiveDate;

use crate::models::routine::Routine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Dragging a routine out of the catalog.
    Create,
    /// Dragging an event that is already on the calendar.
    Move,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub routine: Routine,
    pub source_event_id: Option<i64>,
    pub hovered_date: Option<NaiveDate>,
}

impl DragSession {
    pub fn new(routine: Routine, source_event_id: Option<i64>) -> Self {
        Self {
            routine,
            source_event_id,
            hovered_date: None,
        }
    }

    pub fn mode(&self) -> DragMode {
        if self.source_event_id.is_some() {
            DragMode::Move
        } else {
            DragMode::Create
        }
    }
}

/// Holds at most one drag session plus the source event id of the last
/// drag, which the trash target deletes.
#[derive(Debug, Default)]
pub struct DragManager {
    active: Option<DragSession>,
    current_event_id: Option<i64>,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any previous one.
    pub fn begin(&mut self, session: DragSession) -> &DragSession {
        self.current_event_id = session.source_event_id;
        self.active.insert(session)
    }

    pub fn active(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Record the candidate drop day. Returns false when no drag is running.
    pub fn update_hover(&mut self, day: NaiveDate) -> bool {
        match self.active.as_mut() {
            Some(session) => {
                session.hovered_date = Some(day);
                true
            }
            None => false,
        }
    }

    pub fn clear_hover(&mut self) {
        if let Some(session) = self.active.as_mut() {
            session.hovered_date = None;
        }
    }

    /// Routine and day to render as a translucent preview.
    pub fn preview(&self) -> Option<(&Routine, NaiveDate)> {
        let session = self.active.as_ref()?;
        session.hovered_date.map(|day| (&session.routine, day))
    }

    /// End the session on a drop, clearing the recorded source event id.
    pub fn finish(&mut self) -> Option<DragSession> {
        self.current_event_id = None;
        self.active.take()
    }

    /// Abandon the session without a drop.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.finish()
    }

    pub fn current_event_id(&self) -> Option<i64> {
        self.current_event_id
    }

    /// Consume the recorded source event id for a trash drop.
    pub fn take_current_event_id(&mut self) -> Option<i64> {
        let event_id = self.current_event_id.take();
        if event_id.is_some() {
            self.active = None;
        }
        event_id
    }
}

use crate::models::routine::Routine;
use crate::services::api::{ApiError, ScheduleApi};

/// Last successfully fetched routine list.
#[derive(Debug, Default, Clone)]
pub struct RoutineCatalog {
    routines: Vec<Routine>,
}

impl RoutineCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    pub fn find(&self, routine_id: &str) -> Option<&Routine> {
        self.routines.iter().find(|routine| routine.id == routine_id)
    }

    /// Replace the list from the API. On error the previous list is kept.
    pub async fn refresh(&mut self, api: &dyn ScheduleApi) -> Result<usize, ApiError> {
        let routines = api.fetch_routines().await?;

        for routine in &routines {
            if let Err(reason) = routine.validate() {
                log::warn!("Routine {} looks malformed: {}", routine.id, reason);
            }
        }

        self.routines = routines;
        Ok(self.routines.len())
    }
}

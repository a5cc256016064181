// Settings module
// Explicit configuration handed to the API client and the scheduler

use serde::{Deserialize, Serialize};

use crate::models::date_range::WeekStart;
use crate::models::event::DayMatching;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/rest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    pub api: ApiSettings,
    pub calendar: CalendarSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Sent as the `x-hasura-admin-secret` header when present.
    pub admin_secret: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            admin_secret: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub week_start: WeekStart,
    pub day_matching: DayMatching,
}

impl SchedulerSettings {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err("API base URL cannot be empty".to_string());
        }

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err("API base URL must use http or https".to_string());
        }

        if self.api.timeout_secs == 0 {
            return Err("API timeout must be greater than 0 seconds".to_string());
        }

        Ok(())
    }
}

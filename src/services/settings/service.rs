use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::SchedulerSettings;

pub const CONFIG_FILE_NAME: &str = "scheduler.toml";
pub const API_URL_ENV: &str = "SCHEDULER_API_URL";
pub const ADMIN_SECRET_ENV: &str = "SCHEDULER_ADMIN_SECRET";

/// Loads scheduler settings from TOML with environment overrides.
pub struct SettingsService;

impl SettingsService {
    /// Resolve settings for this run.
    ///
    /// An explicit `path` must exist. Without one, the per-user config file is
    /// read when present and defaults are used otherwise. Environment
    /// variables are applied last.
    pub fn load(path: Option<&Path>) -> Result<SchedulerSettings> {
        let mut settings = match path {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                _ => {
                    log::info!("No settings file found, using defaults");
                    SchedulerSettings::default()
                }
            },
        };

        Self::apply_overrides(&mut settings, |key| env::var(key).ok());

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    pub fn load_file(path: &Path) -> Result<SchedulerSettings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn default_path() -> Option<PathBuf> {
        match ProjectDirs::from("com", "KenBoyle", "WorkoutScheduler") {
            Some(dirs) => Some(dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => {
                log::warn!("Unable to resolve project directory for settings");
                None
            }
        }
    }

    /// Apply `SCHEDULER_*` overrides; blank values are ignored.
    pub fn apply_overrides<F>(settings: &mut SchedulerSettings, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(API_URL_ENV) {
            settings.api.base_url = url.trim().to_string();
        }

        if let Some(secret) = get(ADMIN_SECRET_ENV) {
            settings.api.admin_secret = Some(secret);
        }
    }
}

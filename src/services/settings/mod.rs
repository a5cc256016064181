mod service;

pub use service::{SettingsService, ADMIN_SECRET_ENV, API_URL_ENV, CONFIG_FILE_NAME};

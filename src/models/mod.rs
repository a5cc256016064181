// Module exports for models

pub mod date_range;
pub mod event;
pub mod routine;
pub mod settings;

// Workout Scheduler Library
// Exports all modules for testing and reuse

pub mod models;
pub mod scheduler;
pub mod services;
pub mod utils;

// Service module exports

pub mod api;
pub mod notification;
pub mod settings;

//! Core library modules: configuration, storage location, form handling,
//! logging and user-facing messages.

pub mod config;
pub mod data_storage;
pub mod forms;
pub mod logging;
pub mod messages;
pub mod task;

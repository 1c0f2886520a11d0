//! External collaborator module
//! 
//! This module contains the services the timer hands work off to, such as
//! persisting preferences between runs.

pub mod settings;

// Re-export main types
pub use settings::{Settings, SettingsError, SettingsStore};

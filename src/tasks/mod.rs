//! Background tasks module
//! 
//! This module contains the tasks that run alongside the console loop.

pub mod countdown;
pub mod render;

// Re-export main functions
pub use countdown::countdown_driver_task;
pub use render::render_task;

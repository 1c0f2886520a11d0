//! Console front end
//! 
//! This module turns lines typed on stdin into timer operations and renders
//! timer snapshots back as text.

pub mod commands;
pub mod handlers;
pub mod render;
pub mod runner;

pub use commands::{Command, CommandError};
pub use handlers::{handle_command, persist, Response};
pub use runner::run_console;

//! Session kinds and duration bounds

use serde::{Deserialize, Serialize};

/// Shortest allowed work session (5 minutes)
pub const MIN_WORK_SECONDS: u64 = 5 * 60;
/// Longest allowed work session (60 minutes)
pub const MAX_WORK_SECONDS: u64 = 60 * 60;
/// Shortest allowed break (1 minute)
pub const MIN_BREAK_SECONDS: u64 = 60;
/// Longest allowed break (30 minutes)
pub const MAX_BREAK_SECONDS: u64 = 30 * 60;

pub const DEFAULT_WORK_SECONDS: u64 = 25 * 60;
pub const DEFAULT_BREAK_SECONDS: u64 = 5 * 60;

/// Which countdown mode is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    /// The opposite session kind
    pub fn toggled(self) -> Self {
        match self {
            SessionKind::Work => SessionKind::Break,
            SessionKind::Break => SessionKind::Work,
        }
    }

    /// Inclusive duration bounds for this kind, in seconds
    pub fn bounds(self) -> (u64, u64) {
        match self {
            SessionKind::Work => (MIN_WORK_SECONDS, MAX_WORK_SECONDS),
            SessionKind::Break => (MIN_BREAK_SECONDS, MAX_BREAK_SECONDS),
        }
    }

    /// Apply a signed delta to a duration and clamp it into this kind's bounds
    pub fn clamp_adjusted(self, current: u64, delta_seconds: i64) -> u64 {
        let (min, max) = self.bounds();
        let adjusted = (current as i128 + delta_seconds as i128).clamp(min as i128, max as i128);
        adjusted as u64
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Work => "WORK",
            SessionKind::Break => "BREAK",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

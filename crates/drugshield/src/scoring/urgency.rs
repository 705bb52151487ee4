use serde::{Deserialize, Serialize};
use std::fmt;

const URGENT_THRESHOLD: f64 = 7.5;
const CALL_SOON_THRESHOLD: f64 = 4.0;

/// Caller-facing urgency band derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Monitor,
    CallSoon,
    Urgent,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monitor => "monitor",
            Self::CallSoon => "call-soon",
            Self::Urgent => "urgent",
        }
    }

    pub const fn colour(self) -> &'static str {
        match self {
            Self::Monitor => "green",
            Self::CallSoon => "yellow",
            Self::Urgent => "red",
        }
    }

    /// Code used by earlier report consumers.
    pub const fn legacy_code(self) -> &'static str {
        match self {
            Self::Monitor => "GREEN_MONITOR",
            Self::CallSoon => "YELLOW_CALL_SOON",
            Self::Urgent => "RED_URGENT",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn urgency_from_score(score: f64) -> Urgency {
    if score >= URGENT_THRESHOLD {
        Urgency::Urgent
    } else if score >= CALL_SOON_THRESHOLD {
        Urgency::CallSoon
    } else {
        Urgency::Monitor
    }
}

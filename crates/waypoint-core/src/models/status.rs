//! Lifecycle status of an event.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of event statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Event has not been started
    #[default]
    Pending,

    /// Event is being worked on
    InProgress,

    /// Event is finished
    Completed,
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(EventStatus::Pending),
            "in_progress" | "in-progress" | "inprogress" => Ok(EventStatus::InProgress),
            "completed" | "done" => Ok(EventStatus::Completed),
            _ => Err(format!("Invalid event status: {s}")),
        }
    }
}

impl EventStatus {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::InProgress => "in_progress",
            EventStatus::Completed => "completed",
        }
    }

    /// Status with an icon for terminal output.
    ///
    /// ```rust
    /// use waypoint_core::models::EventStatus;
    ///
    /// assert_eq!(EventStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(EventStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            EventStatus::Pending => "○ Pending",
            EventStatus::InProgress => "➤ In Progress",
            EventStatus::Completed => "✓ Completed",
        }
    }
}

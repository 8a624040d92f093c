//! Event model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{EventStatus, Step};

/// A user-tracked event together with its steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Unique identifier for the event
    pub id: u64,

    /// Title of the event
    pub title: String,

    /// Free-text description, often kept in sync with the step list
    pub description: Option<String>,

    /// Optional classification label, matched against template categories
    pub category: Option<String>,

    /// Lifecycle status of the event
    #[serde(default)]
    pub status: EventStatus,

    /// Timestamp when the event was marked completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Timestamp when the event was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the event was last modified (UTC)
    pub updated_at: Timestamp,

    /// Steps ordered by `order_index` (empty unless explicitly loaded)
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Event {
    /// Number of completed steps.
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_completed).count()
    }

    /// True once the event itself has been marked completed.
    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }
}

//! Step model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents an individual step within an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the parent event
    pub event_id: u64,

    /// Short title of the step
    pub title: String,

    /// Longer text, e.g. the untruncated line a title was cut from
    pub description: Option<String>,

    /// Position of the step within the event (ascending = execution order)
    pub order_index: u32,

    /// Free-text label, independent of the event category
    pub category: Option<String>,

    /// Whether the step was produced by the generator
    pub is_auto_generated: bool,

    /// Whether the step has been checked off
    pub is_completed: bool,

    /// When the step was checked off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,
}

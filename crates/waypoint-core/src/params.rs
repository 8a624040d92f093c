//! Parameter structures for tracker operations.
//!
//! These structures carry input from the interface layer (the CLI) to the
//! [`crate::Tracker`] without depending on any interface framework. The CLI
//! defines its own clap-derived argument structs and converts them with
//! `From` impls:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{
    EventStatus, StepDraft, StepTemplate, TemplateStep, UpdateEventRequest, UpdateStepRequest,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Title of the event (required)
    pub title: String,
    /// Free-text description; parsed for steps when generating
    pub description: Option<String>,
    /// Optional category, matched against template categories
    pub category: Option<String>,
}

/// Parameters for editing an event's text. `None` leaves a field as is; an
/// empty description or category clears it.
///
/// Also used by regeneration, which applies these edits before generating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// Event ID to update (required)
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl UpdateEvent {
    pub fn to_request(&self) -> UpdateEventRequest {
        UpdateEventRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }
}

/// Parameters for moving an event to a new lifecycle status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetEventStatus {
    pub id: u64,
    pub status: EventStatus,
}

/// Parameters for previewing generated steps without storing anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewSteps {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<&CreateEvent> for PreviewSteps {
    fn from(value: &CreateEvent) -> Self {
        Self {
            title: value.title.clone(),
            description: value.description.clone(),
            category: value.category.clone(),
        }
    }
}

/// Parameters for creating a user-authored step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepCreate {
    /// ID of the event to add the step to
    pub event_id: u64,
    /// Title of the step (required)
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl StepCreate {
    /// Converts the step to a non-generated draft at `order_index`.
    pub fn to_draft(&self, order_index: u32) -> StepDraft {
        StepDraft {
            event_id: self.event_id.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            order_index,
            category: self.category.clone(),
            is_auto_generated: false,
        }
    }
}

/// Parameters for inserting a step at a specific position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsertStep {
    /// Base step creation parameters
    #[serde(flatten)]
    pub step: StepCreate,
    /// Position to insert the step (0-indexed)
    pub position: u32,
}

/// Parameters for updating an existing step. `None` leaves a field as is;
/// an empty description or category clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStep {
    /// Step ID to update (required)
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl UpdateStep {
    pub fn to_request(&self) -> UpdateStepRequest {
        UpdateStepRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }
}

/// Parameters for checking a step off or un-checking it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleStep {
    pub id: u64,
    pub completed: bool,
}

/// Parameters for reordering the steps of an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderSteps {
    pub event_id: u64,
    /// Every step ID of the event, in the new order
    pub step_ids: Vec<u64>,
}

/// Parameters for adding a step template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddTemplate {
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub steps: Vec<TemplateStep>,
    #[serde(default)]
    pub priority: i64,
}

impl From<AddTemplate> for StepTemplate {
    fn from(value: AddTemplate) -> Self {
        StepTemplate {
            id: 0,
            category: value.category,
            keywords: value.keywords,
            template_steps: value.steps,
            priority: value.priority,
        }
    }
}

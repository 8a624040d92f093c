//! Step drafts produced by generation.

use serde::{Deserialize, Serialize};

use super::TemplateStep;

/// A step definition that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDraft {
    /// Identifier of the event the draft was generated for
    pub event_id: String,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 0-based position in the generated list
    pub order_index: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub is_auto_generated: bool,
}

impl StepDraft {
    /// Builds an auto-generated draft from a template step. Empty description
    /// and category are dropped.
    pub fn from_template_step(event_id: &str, order_index: u32, step: &TemplateStep) -> Self {
        Self {
            event_id: event_id.to_string(),
            title: step.title.clone(),
            description: non_empty(&step.description),
            order_index,
            category: non_empty(&step.category),
            is_auto_generated: true,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

//! Step template model definitions.

use serde::{Deserialize, Serialize};

/// One entry of a template checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TemplateStep {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,
}

impl TemplateStep {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

/// A keyword and category tagged checklist used to seed steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepTemplate {
    /// Identifier issued by the store (0 for templates not yet stored)
    #[serde(default)]
    pub id: u64,

    /// Matched exactly against an event's category
    pub category: String,

    /// Substrings searched case-insensitively in the event text
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Checklist this template yields, in order
    pub template_steps: Vec<TemplateStep>,

    /// Higher priorities are consulted first
    #[serde(default)]
    pub priority: i64,
}

impl StepTemplate {
    /// True if `category` is non-empty and equals this template's category.
    pub fn matches_category(&self, category: Option<&str>) -> bool {
        matches!(category, Some(c) if !c.is_empty() && c == self.category)
    }

    /// True if any keyword occurs in `haystack`. The haystack must already be
    /// lowercased.
    pub fn matches_keywords(&self, haystack: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| haystack.contains(&keyword.to_lowercase()))
    }
}

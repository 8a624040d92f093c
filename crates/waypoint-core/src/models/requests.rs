//! Request types for updating models.

/// Partial update of a step; `None` fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct UpdateStepRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl UpdateStepRequest {
    /// True if the request would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.category.is_none()
    }
}

/// Partial update of an event's text fields; `None` fields are left
/// unchanged and an empty description or category clears it.
#[derive(Debug, Default, Clone)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl UpdateEventRequest {
    /// True if the request would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.category.is_none()
    }
}

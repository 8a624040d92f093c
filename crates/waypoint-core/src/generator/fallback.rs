//! Generic plan used when neither parsing nor templates yield steps.

use crate::models::TemplateStep;

/// The fixed four-step plan: prepare, plan, execute, review.
pub fn fallback_plan() -> Vec<TemplateStep> {
    vec![
        TemplateStep::new(
            "Begin preparation",
            "Gather necessary information and resources",
            "preparation",
        ),
        TemplateStep::new("Make a plan", "Plan concrete execution steps", "planning"),
        TemplateStep::new("Execute", "Carry out the work per plan", "execution"),
        TemplateStep::new("Review and accept", "Confirm completion quality", "summary"),
    ]
}

//! Draft step generation for events.
//!
//! [`StepGenerator`] resolves a step list from the best available signal, in
//! this order, stopping at the first tier that yields steps:
//!
//! 1. **Parsed**: lines pulled out of the event description
//!    ([`parser::parse_description_for_steps`])
//! 2. **Template**: the highest-priority template whose category equals the
//!    event category, or failing that the highest-priority template with a
//!    keyword occurring in the event text
//! 3. **Fallback**: the generic four-step plan ([`fallback::fallback_plan`])
//!
//! Sources are never combined. Generation cannot fail: a catalogue error is
//! logged and treated as an empty catalogue.
//!
//! ```rust
//! use waypoint_core::{generator::StepGenerator, StaticCatalogue};
//!
//! # async fn example() {
//! let generator = StepGenerator::new(StaticCatalogue::empty());
//! let drafts = generator
//!     .generate_steps("42", "Move house", Some("1. Pack\n2. Load truck"), None)
//!     .await;
//! assert_eq!(drafts.len(), 2);
//! assert_eq!(drafts[1].order_index, 1);
//! # }
//! ```

use std::fmt;

use log::{debug, warn};

use crate::{
    catalogue::TemplateCatalogue,
    models::{StepDraft, StepTemplate, TemplateStep},
};

pub mod fallback;
pub mod parser;

#[cfg(test)]
mod tests;

/// Which resolution tier produced a generated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSource {
    /// Steps parsed from the description
    Parsed,
    /// Steps copied from a matched template
    Template {
        template_id: u64,
        category: String,
        /// True when the template was chosen by category rather than keyword
        by_category: bool,
    },
    /// The generic fallback plan
    Fallback,
}

impl fmt::Display for StepSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepSource::Parsed => write!(f, "parsed from description"),
            StepSource::Template {
                category,
                by_category: true,
                ..
            } => write!(f, "template '{category}' (category match)"),
            StepSource::Template { category, .. } => {
                write!(f, "template '{category}' (keyword match)")
            }
            StepSource::Fallback => write!(f, "generic plan"),
        }
    }
}

/// A generated draft list together with the tier it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub source: StepSource,
    pub drafts: Vec<StepDraft>,
}

/// Finds the template that matches the event.
///
/// An exact category match anywhere in the catalogue wins over keyword
/// matches; otherwise the first template, in catalogue order, with a keyword
/// in the event text is chosen. Returns the template and whether it matched
/// by category.
pub fn match_template<'a>(
    title: &str,
    description: Option<&str>,
    category: Option<&str>,
    templates: &'a [StepTemplate],
) -> Option<(&'a StepTemplate, bool)> {
    if let Some(template) = templates.iter().find(|t| t.matches_category(category)) {
        return Some((template, true));
    }

    let haystack = format!(
        "{} {} {}",
        title,
        description.unwrap_or_default(),
        category.unwrap_or_default()
    )
    .to_lowercase();

    templates
        .iter()
        .find(|t| t.matches_keywords(&haystack))
        .map(|template| (template, false))
}

/// Maps template steps to auto-generated drafts numbered from 0.
pub fn to_drafts(event_id: &str, steps: &[TemplateStep]) -> Vec<StepDraft> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| StepDraft::from_template_step(event_id, index as u32, step))
        .collect()
}

/// Generates draft steps using a template catalogue.
pub struct StepGenerator<C> {
    catalogue: C,
}

impl<C: TemplateCatalogue> StepGenerator<C> {
    pub fn new(catalogue: C) -> Self {
        Self { catalogue }
    }

    /// Generates drafts for an event. See the module docs for the tiers.
    pub async fn generate_steps(
        &self,
        event_id: &str,
        title: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> Vec<StepDraft> {
        self.generate(event_id, title, description, category)
            .await
            .drafts
    }

    /// Like [`Self::generate_steps`] but also reports the winning tier.
    pub async fn generate(
        &self,
        event_id: &str,
        title: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> Generation {
        let (source, steps) = match Self::parsed_steps(description) {
            Some(steps) => (StepSource::Parsed, steps),
            None => match self.template_steps(title, description, category).await {
                Some(resolved) => resolved,
                None => (StepSource::Fallback, fallback::fallback_plan()),
            },
        };

        debug!(
            "Generated {} step(s) for event {event_id} from {source}",
            steps.len()
        );

        Generation {
            source,
            drafts: to_drafts(event_id, &steps),
        }
    }

    fn parsed_steps(description: Option<&str>) -> Option<Vec<TemplateStep>> {
        let description = description.filter(|d| !d.trim().is_empty())?;
        let steps = parser::parse_description_for_steps(description);
        (!steps.is_empty()).then_some(steps)
    }

    async fn template_steps(
        &self,
        title: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> Option<(StepSource, Vec<TemplateStep>)> {
        let templates = self.fetch_templates().await;
        let (template, by_category) = match_template(title, description, category, &templates)?;

        // a matched template without steps still falls through to the generic plan
        if template.template_steps.is_empty() {
            return None;
        }

        Some((
            StepSource::Template {
                template_id: template.id,
                category: template.category.clone(),
                by_category,
            },
            template.template_steps.clone(),
        ))
    }

    async fn fetch_templates(&self) -> Vec<StepTemplate> {
        match self.catalogue.fetch_templates().await {
            Ok(templates) => templates,
            Err(e) => {
                warn!("Failed to fetch step templates, continuing without: {e}");
                Vec::new()
            }
        }
    }
}

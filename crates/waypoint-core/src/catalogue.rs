//! Template catalogue providers.
//!
//! The generator reads templates through [`TemplateCatalogue`] so it can be
//! driven by the SQLite store ([`crate::Tracker`]) or by an in-memory
//! [`StaticCatalogue`] in tests and previews.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::Result, models::StepTemplate};

/// Read-only source of step templates.
///
/// Implementations return templates ordered by descending priority. An empty
/// list is a normal answer; an `Err` is treated by the generator as an empty
/// catalogue.
#[async_trait]
pub trait TemplateCatalogue: Send + Sync {
    async fn fetch_templates(&self) -> Result<Vec<StepTemplate>>;
}

#[async_trait]
impl<C: TemplateCatalogue + ?Sized> TemplateCatalogue for Arc<C> {
    async fn fetch_templates(&self) -> Result<Vec<StepTemplate>> {
        (**self).fetch_templates().await
    }
}

#[async_trait]
impl<C: TemplateCatalogue + ?Sized> TemplateCatalogue for &C {
    async fn fetch_templates(&self) -> Result<Vec<StepTemplate>> {
        (**self).fetch_templates().await
    }
}

/// In-memory catalogue.
///
/// Templates are kept sorted by descending priority; equal priorities keep
/// the order they were added in.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogue {
    templates: Vec<StepTemplate>,
}

impl StaticCatalogue {
    pub fn new(templates: Vec<StepTemplate>) -> Self {
        let mut catalogue = Self { templates };
        catalogue.sort();
        catalogue
    }

    /// An empty catalogue; generation falls back to the generic plan.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: StepTemplate) -> Self {
        self.templates.push(template);
        self.sort();
        self
    }

    pub fn templates(&self) -> &[StepTemplate] {
        &self.templates
    }

    fn sort(&mut self) {
        // stable: ties keep insertion order
        self.templates.sort_by(|a, b| b.priority.cmp(&a.priority));
    }
}

#[async_trait]
impl TemplateCatalogue for StaticCatalogue {
    async fn fetch_templates(&self) -> Result<Vec<StepTemplate>> {
        Ok(self.templates.clone())
    }
}

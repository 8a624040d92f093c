//! Template operations for the Tracker.

use std::path::Path;

use log::info;

use super::Tracker;
use crate::{
    error::{Result, WaypointError},
    models::StepTemplate,
    params::{AddTemplate, Id},
};

impl Tracker {
    /// Stores a new step template.
    pub async fn add_template(&self, params: AddTemplate) -> Result<StepTemplate> {
        let template = StepTemplate::from(params);
        self.with_db(move |db| db.add_template(&template)).await
    }

    /// Lists templates by descending priority.
    pub async fn list_templates(&self) -> Result<Vec<StepTemplate>> {
        self.with_db(|db| db.list_templates()).await
    }

    /// Deletes a step template.
    pub async fn remove_template(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_db(move |db| db.remove_template(id)).await
    }

    /// Imports templates from a JSON file holding an array of templates.
    ///
    /// The file is validated as a whole; either every template is stored or
    /// none is. IDs in the file are ignored.
    pub async fn import_templates(&self, path: &Path) -> Result<Vec<StepTemplate>> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| WaypointError::FileSystem {
                path: path.to_path_buf(),
                source: e,
            })?;
        let templates: Vec<StepTemplate> = serde_json::from_str(&contents)?;

        let stored = self.with_db(move |db| db.add_templates(&templates)).await?;
        info!("Imported {} template(s) from {}", stored.len(), path.display());
        Ok(stored)
    }
}

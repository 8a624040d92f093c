//! Step template storage.

use jiff::Timestamp;
use rusqlite::params;

use super::utils::json_column;
use crate::{
    error::{DatabaseResultExt, Result, WaypointError},
    models::StepTemplate,
};

const INSERT_TEMPLATE_SQL: &str = "INSERT INTO step_templates (category, keywords, template_steps, priority, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_TEMPLATES_SQL: &str = "SELECT id, category, keywords, template_steps, priority FROM step_templates ORDER BY priority DESC, id ASC";
const DELETE_TEMPLATE_SQL: &str = "DELETE FROM step_templates WHERE id = ?1";

impl super::Database {
    fn build_template_from_row(row: &rusqlite::Row) -> rusqlite::Result<StepTemplate> {
        Ok(StepTemplate {
            id: row.get::<_, i64>(0)? as u64,
            category: row.get(1)?,
            keywords: json_column(row, 2)?,
            template_steps: json_column(row, 3)?,
            priority: row.get(4)?,
        })
    }

    fn validate_template(template: &StepTemplate) -> Result<()> {
        if template.category.trim().is_empty() {
            return Err(WaypointError::invalid_input("category")
                .with_reason("Template category cannot be empty"));
        }
        if template
            .template_steps
            .iter()
            .any(|step| step.title.trim().is_empty())
        {
            return Err(WaypointError::invalid_input("template_steps")
                .with_reason("Every template step needs a title"));
        }
        Ok(())
    }

    /// Stores a template. The `id` of the argument is ignored; the stored
    /// template is returned with its new ID.
    pub fn add_template(&mut self, template: &StepTemplate) -> Result<StepTemplate> {
        Self::validate_template(template)?;

        let keywords = serde_json::to_string(&template.keywords)?;
        let steps = serde_json::to_string(&template.template_steps)?;

        self.connection
            .execute(
                INSERT_TEMPLATE_SQL,
                params![
                    &template.category,
                    keywords,
                    steps,
                    template.priority,
                    Timestamp::now().to_string()
                ],
            )
            .db_context("Failed to insert template")?;

        Ok(StepTemplate {
            id: self.connection.last_insert_rowid() as u64,
            ..template.clone()
        })
    }

    /// Stores several templates atomically.
    pub fn add_templates(&mut self, templates: &[StepTemplate]) -> Result<Vec<StepTemplate>> {
        templates.iter().try_for_each(Self::validate_template)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let now_str = Timestamp::now().to_string();

        let mut stored = Vec::with_capacity(templates.len());
        for template in templates {
            tx.execute(
                INSERT_TEMPLATE_SQL,
                params![
                    &template.category,
                    serde_json::to_string(&template.keywords)?,
                    serde_json::to_string(&template.template_steps)?,
                    template.priority,
                    &now_str
                ],
            )
            .db_context("Failed to insert template")?;

            stored.push(StepTemplate {
                id: tx.last_insert_rowid() as u64,
                ..template.clone()
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(stored)
    }

    /// Lists templates by descending priority; ties keep insertion order.
    pub fn list_templates(&self) -> Result<Vec<StepTemplate>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TEMPLATES_SQL)
            .db_context("Failed to prepare query")?;

        let templates = stmt
            .query_map([], Self::build_template_from_row)
            .db_context("Failed to query templates")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch templates")?;

        Ok(templates)
    }

    pub fn remove_template(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_TEMPLATE_SQL, params![id as i64])
            .db_context("Failed to delete template")?;

        if deleted == 0 {
            return Err(WaypointError::TemplateNotFound { id });
        }
        Ok(())
    }
}

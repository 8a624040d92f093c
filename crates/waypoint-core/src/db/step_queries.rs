//! Step CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::utils::{blank_to_none, optional_timestamp_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, WaypointError},
    models::{Step, StepDraft, UpdateStepRequest},
};

const STEP_COLUMNS: &str = "id, event_id, title, description, order_index, category, is_auto_generated, is_completed, completed_at, created_at, updated_at";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (event_id, title, description, order_index, category, is_auto_generated, is_completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8)";
const GET_NEXT_STEP_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(order_index), -1) + 1 FROM steps WHERE event_id = ?1";
const COUNT_STEPS_SQL: &str = "SELECT COUNT(*) FROM steps WHERE event_id = ?1";
const UPDATE_STEP_ORDERS_INCREMENT_SQL: &str =
    "UPDATE steps SET order_index = order_index + 1 WHERE event_id = ?1 AND order_index >= ?2";
const UPDATE_STEP_ORDERS_DECREMENT_SQL: &str =
    "UPDATE steps SET order_index = order_index - 1 WHERE event_id = ?1 AND order_index > ?2";
const UPDATE_STEP_ORDER_SQL: &str =
    "UPDATE steps SET order_index = ?1, updated_at = ?2 WHERE id = ?3 AND event_id = ?4";
const SELECT_STEP_DETAILS_SQL: &str = "SELECT title, description, category FROM steps WHERE id = ?1";
const UPDATE_STEP_SQL: &str = "UPDATE steps SET title = ?1, description = ?2, category = ?3, updated_at = ?4 WHERE id = ?5";
const UPDATE_STEP_COMPLETION_SQL: &str =
    "UPDATE steps SET is_completed = ?1, completed_at = ?2, updated_at = ?3 WHERE id = ?4";
const SELECT_STEP_ORDER_SQL: &str = "SELECT event_id, order_index FROM steps WHERE id = ?1";
const SELECT_STEP_IDS_SQL: &str = "SELECT id FROM steps WHERE event_id = ?1";
const DELETE_STEP_SQL: &str = "DELETE FROM steps WHERE id = ?1";
const DELETE_EVENT_STEPS_SQL: &str = "DELETE FROM steps WHERE event_id = ?1";
const TOUCH_EVENT_SQL: &str = "UPDATE events SET updated_at = ?1 WHERE id = ?2";

/// Fields for a step created directly by the user.
#[derive(Debug, Clone, Copy)]
pub struct NewStep<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl super::Database {
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        Ok(Step {
            id: row.get::<_, i64>(0)? as u64,
            event_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            description: row.get(3)?,
            order_index: row.get::<_, i64>(4)? as u32,
            category: row.get(5)?,
            is_auto_generated: row.get(6)?,
            is_completed: row.get(7)?,
            completed_at: optional_timestamp_column(row, 8)?,
            created_at: timestamp_column(row, 9)?,
            updated_at: timestamp_column(row, 10)?,
        })
    }

    fn check_event_in_tx(tx: &Transaction, event_id: u64) -> Result<()> {
        let exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM events WHERE id = ?1)",
                params![event_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check event existence")?;

        if exists {
            Ok(())
        } else {
            Err(WaypointError::EventNotFound { id: event_id })
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_step_row(
        tx: &Transaction,
        event_id: u64,
        title: &str,
        description: Option<&str>,
        order_index: u32,
        category: Option<&str>,
        is_auto_generated: bool,
        now: Timestamp,
    ) -> Result<Step> {
        if title.trim().is_empty() {
            return Err(
                WaypointError::invalid_input("title").with_reason("Step title cannot be empty")
            );
        }

        let description = blank_to_none(description);
        let category = blank_to_none(category);
        let now_str = now.to_string();

        tx.execute(
            INSERT_STEP_SQL,
            params![
                event_id as i64,
                title,
                description,
                order_index as i64,
                category,
                is_auto_generated,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert step")?;

        Ok(Step {
            id: tx.last_insert_rowid() as u64,
            event_id,
            title: title.to_string(),
            description: description.map(String::from),
            order_index,
            category: category.map(String::from),
            is_auto_generated,
            is_completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn touch_event(tx: &Transaction, event_id: u64, now: Timestamp) -> Result<()> {
        tx.execute(TOUCH_EVENT_SQL, params![now.to_string(), event_id as i64])
            .db_context("Failed to update event timestamp")?;
        Ok(())
    }

    fn insert_drafts_in_tx(
        tx: &Transaction,
        event_id: u64,
        drafts: &[StepDraft],
        now: Timestamp,
    ) -> Result<Vec<Step>> {
        drafts
            .iter()
            .map(|draft| {
                Self::insert_step_row(
                    tx,
                    event_id,
                    &draft.title,
                    draft.description.as_deref(),
                    draft.order_index,
                    draft.category.as_deref(),
                    draft.is_auto_generated,
                    now,
                )
            })
            .collect()
    }

    /// Stores drafts for an event, keeping each draft's `order_index`.
    ///
    /// The drafts' own `event_id` is ignored; they are attached to `event_id`.
    pub fn insert_drafts(&mut self, event_id: u64, drafts: &[StepDraft]) -> Result<Vec<Step>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::check_event_in_tx(&tx, event_id)?;
        let now = Timestamp::now();
        let steps = Self::insert_drafts_in_tx(&tx, event_id, drafts, now)?;

        Self::touch_event(&tx, event_id, now)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(steps)
    }

    /// Deletes every step of the event and stores `drafts` in their place.
    pub fn replace_steps(&mut self, event_id: u64, drafts: &[StepDraft]) -> Result<Vec<Step>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::check_event_in_tx(&tx, event_id)?;
        tx.execute(DELETE_EVENT_STEPS_SQL, params![event_id as i64])
            .db_context("Failed to delete existing steps")?;

        let now = Timestamp::now();
        let steps = Self::insert_drafts_in_tx(&tx, event_id, drafts, now)?;

        Self::touch_event(&tx, event_id, now)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(steps)
    }

    /// Appends a user-authored step after the last one.
    pub fn add_step(&mut self, event_id: u64, step: NewStep<'_>) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::check_event_in_tx(&tx, event_id)?;

        let next_order: i64 = tx
            .query_row(GET_NEXT_STEP_ORDER_SQL, params![event_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next step order")?;

        let now = Timestamp::now();
        let created = Self::insert_step_row(
            &tx,
            event_id,
            step.title,
            step.description,
            next_order as u32,
            step.category,
            false,
            now,
        )?;

        Self::touch_event(&tx, event_id, now)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(created)
    }

    /// Inserts a user-authored step at a 0-based position. Steps at or after
    /// the position move down by one.
    pub fn insert_step(&mut self, event_id: u64, position: u32, step: NewStep<'_>) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::check_event_in_tx(&tx, event_id)?;

        let step_count: i64 = tx
            .query_row(COUNT_STEPS_SQL, params![event_id as i64], |row| row.get(0))
            .db_context("Failed to count steps")?;

        // inserting at the end (position == count) is allowed
        if i64::from(position) > step_count {
            return Err(WaypointError::invalid_input("position").with_reason(format!(
                "Position {position} is out of range. Event has {step_count} steps"
            )));
        }

        tx.execute(
            UPDATE_STEP_ORDERS_INCREMENT_SQL,
            params![event_id as i64, position as i64],
        )
        .db_context("Failed to update step orders")?;

        let now = Timestamp::now();
        let created = Self::insert_step_row(
            &tx,
            event_id,
            step.title,
            step.description,
            position,
            step.category,
            false,
            now,
        )?;

        Self::touch_event(&tx, event_id, now)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(created)
    }

    /// Applies a partial update to a step's text fields.
    pub fn update_step(&mut self, step_id: u64, request: UpdateStepRequest) -> Result<()> {
        if request.is_empty() {
            return Ok(());
        }
        if matches!(&request.title, Some(title) if title.trim().is_empty()) {
            return Err(
                WaypointError::invalid_input("title").with_reason("Step title cannot be empty")
            );
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (current_title, current_description, current_category): (
            String,
            Option<String>,
            Option<String>,
        ) = tx
            .query_row(SELECT_STEP_DETAILS_SQL, params![step_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()
            .db_context("Failed to get current step")?
            .ok_or(WaypointError::StepNotFound { id: step_id })?;

        let title = request.title.unwrap_or(current_title);
        // an empty string clears the optional fields
        let description = match request.description {
            Some(d) => blank_to_none(Some(&d)).map(String::from),
            None => current_description,
        };
        let category = match request.category {
            Some(c) => blank_to_none(Some(&c)).map(String::from),
            None => current_category,
        };

        let now = Timestamp::now();
        tx.execute(
            UPDATE_STEP_SQL,
            params![
                &title,
                &description,
                &category,
                now.to_string(),
                step_id as i64
            ],
        )
        .db_context("Failed to update step")?;

        let (event_id, _) = Self::step_position(&tx, step_id)?;
        Self::touch_event(&tx, event_id, now)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Marks a step completed (stamping `completed_at`) or not completed.
    pub fn set_step_completed(&mut self, step_id: u64, completed: bool) -> Result<Step> {
        let now = Timestamp::now();
        let completed_at = completed.then(|| now.to_string());

        let updated = self
            .connection
            .execute(
                UPDATE_STEP_COMPLETION_SQL,
                params![completed, completed_at, now.to_string(), step_id as i64],
            )
            .db_context("Failed to update step completion")?;

        if updated == 0 {
            return Err(WaypointError::StepNotFound { id: step_id });
        }

        self.get_step(step_id)?
            .ok_or(WaypointError::StepNotFound { id: step_id })
    }

    fn step_position(tx: &Transaction, step_id: u64) -> Result<(u64, i64)> {
        tx.query_row(SELECT_STEP_ORDER_SQL, params![step_id as i64], |row| {
            Ok((row.get::<_, i64>(0)? as u64, row.get(1)?))
        })
        .optional()
        .db_context("Failed to query step")?
        .ok_or(WaypointError::StepNotFound { id: step_id })
    }

    /// Removes a step and closes the gap in the ordering. Returns the ID of
    /// the event the step belonged to.
    pub fn remove_step(&mut self, step_id: u64) -> Result<u64> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (event_id, order_index) = Self::step_position(&tx, step_id)?;

        tx.execute(DELETE_STEP_SQL, params![step_id as i64])
            .db_context("Failed to delete step")?;

        tx.execute(
            UPDATE_STEP_ORDERS_DECREMENT_SQL,
            params![event_id as i64, order_index],
        )
        .db_context("Failed to update step orders")?;

        Self::touch_event(&tx, event_id, Timestamp::now())?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(event_id)
    }

    /// Renumbers an event's steps so each ID's `order_index` is its position
    /// in `step_ids`. The list must contain every step of the event exactly
    /// once.
    pub fn reorder_steps(&mut self, event_id: u64, step_ids: &[u64]) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::check_event_in_tx(&tx, event_id)?;

        let mut existing: Vec<u64> = {
            let mut stmt = tx
                .prepare(SELECT_STEP_IDS_SQL)
                .db_context("Failed to prepare query")?;
            let ids = stmt
                .query_map(params![event_id as i64], |row| {
                    Ok(row.get::<_, i64>(0)? as u64)
                })
                .db_context("Failed to query step ids")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch step ids")?;
            ids
        };
        let mut requested = step_ids.to_vec();
        existing.sort_unstable();
        requested.sort_unstable();

        if existing != requested {
            return Err(WaypointError::invalid_input("step_ids").with_reason(format!(
                "Expected each of the event's {} step IDs exactly once",
                existing.len()
            )));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();
        for (position, step_id) in step_ids.iter().enumerate() {
            tx.execute(
                UPDATE_STEP_ORDER_SQL,
                params![position as i64, &now_str, *step_id as i64, event_id as i64],
            )
            .db_context("Failed to update step order")?;
        }

        Self::touch_event(&tx, event_id, now)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Retrieves all steps for an event in `order_index` order.
    pub fn get_steps(&self, event_id: u64) -> Result<Vec<Step>> {
        let sql = format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE event_id = ?1 ORDER BY order_index, id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let steps = stmt
            .query_map(params![event_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        Ok(steps)
    }

    /// Retrieves a single step by its ID.
    pub fn get_step(&self, step_id: u64) -> Result<Option<Step>> {
        let sql = format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = ?1");
        self.connection
            .query_row(&sql, params![step_id as i64], Self::build_step_from_row)
            .optional()
            .db_context("Failed to get step")
    }
}

//! Event CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use super::utils::{blank_to_none, optional_timestamp_column, timestamp_column};
use crate::{
    codec::{merge_description_with_steps, steps_to_description},
    error::{DatabaseResultExt, Result, WaypointError},
    models::{Event, EventStatus, UpdateEventRequest},
};

const INSERT_EVENT_SQL: &str = "INSERT INTO events (title, description, category, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_EVENT_SQL: &str = "SELECT id, title, description, category, status, completed_at, created_at, updated_at FROM events WHERE id = ?1";
const SELECT_EVENTS_SQL: &str = "SELECT id, title, description, category, status, completed_at, created_at, updated_at FROM events ORDER BY created_at DESC, id DESC";
const CHECK_EVENT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM events WHERE id = ?1)";
const UPDATE_EVENT_DESCRIPTION_SQL: &str =
    "UPDATE events SET description = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_EVENT_SQL: &str = "UPDATE events SET title = ?1, description = ?2, category = ?3, updated_at = ?4 WHERE id = ?5";
const UPDATE_EVENT_STATUS_SQL: &str =
    "UPDATE events SET status = ?1, completed_at = ?2, updated_at = ?3 WHERE id = ?4";
const DELETE_EVENT_STEPS_SQL: &str = "DELETE FROM steps WHERE event_id = ?1";
const DELETE_EVENT_SQL: &str = "DELETE FROM events WHERE id = ?1";

impl super::Database {
    fn build_event_from_row(row: &rusqlite::Row) -> rusqlite::Result<Event> {
        let status_str: String = row.get(4)?;
        let status = status_str.parse::<EventStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("Invalid status: {status_str}").into(),
            )
        })?;

        Ok(Event {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            status,
            completed_at: optional_timestamp_column(row, 5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
            steps: Vec::new(),
        })
    }

    /// Creates a new event. Blank description and category are stored as
    /// NULL.
    pub fn create_event(
        &mut self,
        title: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> Result<Event> {
        if title.trim().is_empty() {
            return Err(WaypointError::invalid_input("title").with_reason("Title cannot be empty"));
        }

        let description = blank_to_none(description);
        let category = blank_to_none(category);
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_EVENT_SQL,
                params![title, description, category, &now_str, &now_str],
            )
            .db_context("Failed to insert event")?;

        Ok(Event {
            id: self.connection.last_insert_rowid() as u64,
            title: title.to_string(),
            description: description.map(String::from),
            category: category.map(String::from),
            status: EventStatus::Pending,
            completed_at: None,
            created_at: now,
            updated_at: now,
            steps: Vec::new(),
        })
    }

    /// Retrieves an event by its ID, without steps.
    pub fn get_event(&self, id: u64) -> Result<Option<Event>> {
        self.connection
            .query_row(SELECT_EVENT_SQL, params![id as i64], Self::build_event_from_row)
            .optional()
            .db_context("Failed to get event")
    }

    /// Retrieves an event together with its steps in `order_index` order.
    pub fn get_event_with_steps(&self, id: u64) -> Result<Option<Event>> {
        let Some(mut event) = self.get_event(id)? else {
            return Ok(None);
        };
        event.steps = self.get_steps(id)?;
        Ok(Some(event))
    }

    /// Lists all events, newest first, without steps.
    pub fn list_events(&self) -> Result<Vec<Event>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_EVENTS_SQL)
            .db_context("Failed to prepare query")?;

        let events = stmt
            .query_map([], Self::build_event_from_row)
            .db_context("Failed to query events")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch events")?;

        Ok(events)
    }

    pub(crate) fn ensure_event_exists(&self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(CHECK_EVENT_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check event existence")?;

        if exists {
            Ok(())
        } else {
            Err(WaypointError::EventNotFound { id })
        }
    }

    /// Applies a partial update to the event's title, description and
    /// category. The steps are left as they are.
    pub fn update_event(&mut self, id: u64, request: UpdateEventRequest) -> Result<Event> {
        if matches!(&request.title, Some(title) if title.trim().is_empty()) {
            return Err(WaypointError::invalid_input("title").with_reason("Title cannot be empty"));
        }

        let current = self
            .get_event(id)?
            .ok_or(WaypointError::EventNotFound { id })?;
        if request.is_empty() {
            return Ok(current);
        }

        let title = request.title.unwrap_or(current.title);
        // an empty string clears the optional fields
        let description = match request.description {
            Some(d) => blank_to_none(Some(&d)).map(String::from),
            None => current.description,
        };
        let category = match request.category {
            Some(c) => blank_to_none(Some(&c)).map(String::from),
            None => current.category,
        };

        let now = Timestamp::now();
        self.connection
            .execute(
                UPDATE_EVENT_SQL,
                params![&title, &description, &category, now.to_string(), id as i64],
            )
            .db_context("Failed to update event")?;

        Ok(Event {
            title,
            description,
            category,
            updated_at: now,
            ..current
        })
    }

    /// Moves the event to `status`. Completing stamps `completed_at`; any
    /// other status clears it.
    pub fn set_event_status(&mut self, id: u64, status: EventStatus) -> Result<Event> {
        let current = self
            .get_event(id)?
            .ok_or(WaypointError::EventNotFound { id })?;

        let now = Timestamp::now();
        let completed_at = match status {
            // completing twice keeps the first completion time
            EventStatus::Completed => Some(current.completed_at.unwrap_or(now)),
            EventStatus::Pending | EventStatus::InProgress => None,
        };

        self.connection
            .execute(
                UPDATE_EVENT_STATUS_SQL,
                params![
                    status.as_str(),
                    completed_at.map(|ts| ts.to_string()),
                    now.to_string(),
                    id as i64
                ],
            )
            .db_context("Failed to update event status")?;

        Ok(Event {
            status,
            completed_at,
            updated_at: now,
            ..current
        })
    }

    /// Overwrites the event description.
    pub fn set_event_description(&mut self, id: u64, description: Option<&str>) -> Result<()> {
        let now_str = Timestamp::now().to_string();
        let updated = self
            .connection
            .execute(
                UPDATE_EVENT_DESCRIPTION_SQL,
                params![description, &now_str, id as i64],
            )
            .db_context("Failed to update event description")?;

        if updated == 0 {
            return Err(WaypointError::EventNotFound { id });
        }
        Ok(())
    }

    /// Rewrites the description as the numbered list of the event's steps.
    /// An event without steps is left untouched.
    pub fn sync_description(&mut self, id: u64) -> Result<String> {
        self.ensure_event_exists(id)?;
        let steps = self.get_steps(id)?;
        if steps.is_empty() {
            return Ok(self
                .get_event(id)?
                .and_then(|event| event.description)
                .unwrap_or_default());
        }

        let description = steps_to_description(&steps);
        self.set_event_description(id, Some(&description))?;
        Ok(description)
    }

    /// Merges the step list into the current description, replacing an
    /// existing list or appending after free text.
    pub fn merge_steps_into_description(&mut self, id: u64) -> Result<String> {
        let event = self
            .get_event(id)?
            .ok_or(WaypointError::EventNotFound { id })?;
        let steps = self.get_steps(id)?;
        let current = event.description.unwrap_or_default();

        let merged = merge_description_with_steps(&current, &steps);
        if merged != current {
            self.set_event_description(id, Some(&merged))?;
        }
        Ok(merged)
    }

    /// Deletes an event and all of its steps.
    pub fn delete_event(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_EVENT_STEPS_SQL, params![id as i64])
            .db_context("Failed to delete event steps")?;

        let deleted = tx
            .execute(DELETE_EVENT_SQL, params![id as i64])
            .db_context("Failed to delete event")?;

        if deleted == 0 {
            return Err(WaypointError::EventNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}

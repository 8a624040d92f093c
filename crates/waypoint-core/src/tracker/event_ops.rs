//! Event operations for the Tracker.

use log::info;

use super::Tracker;
use crate::{
    display::Events,
    error::{Result, WaypointError},
    generator::{Generation, StepGenerator},
    models::{Event, EventStatus},
    params::{CreateEvent, Id, PreviewSteps, SetEventStatus, StepCreate, UpdateEvent},
};

/// Event ID used for drafts that belong to no stored event.
pub const PREVIEW_EVENT_ID: &str = "preview";

impl Tracker {
    /// Creates an event and seeds it with generated steps.
    ///
    /// Steps come from the description, a matching template or the generic
    /// plan. Once stored, the description is rewritten as the numbered list
    /// of those steps.
    pub async fn create_event(&self, params: &CreateEvent) -> Result<Event> {
        let title = params.title.clone();
        let description = params.description.clone();
        let category = params.category.clone();

        let event = self
            .with_db(move |db| db.create_event(&title, description.as_deref(), category.as_deref()))
            .await?;

        let generation = StepGenerator::new(self)
            .generate(
                &event.id.to_string(),
                &event.title,
                params.description.as_deref(),
                params.category.as_deref(),
            )
            .await;
        info!(
            "Created event {} with {} step(s) from {}",
            event.id,
            generation.drafts.len(),
            generation.source
        );

        let event_id = event.id;
        self.with_db(move |db| {
            db.insert_drafts(event_id, &generation.drafts)?;
            db.sync_description(event_id)?;
            db.get_event_with_steps(event_id)?
                .ok_or(WaypointError::EventNotFound { id: event_id })
        })
        .await
    }

    /// Creates an event with user-supplied steps instead of generated ones.
    ///
    /// Steps are stored in the given order and are not marked
    /// auto-generated. With at least one step the description is synced to
    /// the step list.
    pub async fn create_event_with_steps(
        &self,
        params: &CreateEvent,
        steps: &[StepCreate],
    ) -> Result<Event> {
        let title = params.title.clone();
        let description = params.description.clone();
        let category = params.category.clone();
        let drafts: Vec<_> = steps
            .iter()
            .enumerate()
            .map(|(index, step)| step.to_draft(index as u32))
            .collect();

        self.with_db(move |db| {
            let event =
                db.create_event(&title, description.as_deref(), category.as_deref())?;
            if !drafts.is_empty() {
                db.insert_drafts(event.id, &drafts)?;
                db.sync_description(event.id)?;
            }
            db.get_event_with_steps(event.id)?
                .ok_or(WaypointError::EventNotFound { id: event.id })
        })
        .await
    }

    /// Retrieves an event with its steps.
    pub async fn get_event(&self, params: &Id) -> Result<Option<Event>> {
        let id = params.id;
        self.with_db(move |db| db.get_event_with_steps(id)).await
    }

    /// Lists all events, newest first.
    pub async fn list_events(&self) -> Result<Events> {
        self.with_db(|db| db.list_events()).await.map(Events)
    }

    /// Edits the title, description or category of an event.
    ///
    /// Steps are untouched and the new description is stored as given, so
    /// a later [`Tracker::regenerate_steps`] works from the edited text.
    pub async fn update_event(&self, params: &UpdateEvent) -> Result<Event> {
        let id = params.id;
        let request = params.to_request();
        self.with_db(move |db| {
            db.update_event(id, request)?;
            db.get_event_with_steps(id)?
                .ok_or(WaypointError::EventNotFound { id })
        })
        .await
    }

    /// Moves an event to a new lifecycle status.
    pub async fn set_event_status(&self, params: &SetEventStatus) -> Result<Event> {
        let id = params.id;
        let status = params.status;
        let event = self
            .with_db(move |db| {
                db.set_event_status(id, status)?;
                db.get_event_with_steps(id)?
                    .ok_or(WaypointError::EventNotFound { id })
            })
            .await?;
        info!("Event {id} is now {}", status.as_str());
        Ok(event)
    }

    /// Marks an event as completed.
    pub async fn complete_event(&self, params: &Id) -> Result<Event> {
        self.set_event_status(&SetEventStatus {
            id: params.id,
            status: EventStatus::Completed,
        })
        .await
    }

    /// Deletes an event and its steps.
    pub async fn delete_event(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_db(move |db| db.delete_event(id)).await
    }

    /// Generates steps for an event that does not exist yet. Nothing is
    /// stored; every draft carries the [`PREVIEW_EVENT_ID`].
    pub async fn preview_steps(&self, params: &PreviewSteps) -> Generation {
        StepGenerator::new(self)
            .generate(
                PREVIEW_EVENT_ID,
                &params.title,
                params.description.as_deref(),
                params.category.as_deref(),
            )
            .await
    }

    /// Replaces all steps of an event with freshly generated ones.
    ///
    /// Any title, description or category in `params` is saved first and
    /// the steps are generated from the edited event. The description is
    /// not rewritten afterwards, so the text the steps came from stays
    /// intact.
    pub async fn regenerate_steps(&self, params: &UpdateEvent) -> Result<(Event, Generation)> {
        let id = params.id;
        let request = params.to_request();
        let event = self.with_db(move |db| db.update_event(id, request)).await?;

        let generation = StepGenerator::new(self)
            .generate(
                &event.id.to_string(),
                &event.title,
                event.description.as_deref(),
                event.category.as_deref(),
            )
            .await;
        info!(
            "Regenerated {} step(s) for event {id} from {}",
            generation.drafts.len(),
            generation.source
        );

        let drafts = generation.drafts.clone();
        let event = self
            .with_db(move |db| {
                db.replace_steps(id, &drafts)?;
                db.get_event_with_steps(id)?
                    .ok_or(WaypointError::EventNotFound { id })
            })
            .await?;

        Ok((event, generation))
    }

    /// Rewrites the event description as the numbered list of its steps.
    pub async fn sync_description(&self, params: &Id) -> Result<String> {
        let id = params.id;
        self.with_db(move |db| db.sync_description(id)).await
    }

    /// Folds the step list into the description: an existing list is
    /// replaced, free text gets the list appended.
    pub async fn merge_steps_into_description(&self, params: &Id) -> Result<String> {
        let id = params.id;
        self.with_db(move |db| db.merge_steps_into_description(id))
            .await
    }
}

//! Step operations for the Tracker.
//!
//! Operations that change titles or ordering resync the event description
//! afterwards so it keeps matching the step list.

use super::Tracker;
use crate::{
    db::step_queries::NewStep,
    display::Steps,
    error::{Result, WaypointError},
    models::Step,
    params::{Id, InsertStep, ReorderSteps, StepCreate, ToggleStep, UpdateStep},
};

impl Tracker {
    /// Appends a step to the end of an event.
    pub async fn add_step(&self, params: &StepCreate) -> Result<Step> {
        let params = params.clone();
        self.with_db(move |db| {
            let step = db.add_step(
                params.event_id,
                NewStep {
                    title: &params.title,
                    description: params.description.as_deref(),
                    category: params.category.as_deref(),
                },
            )?;
            db.sync_description(params.event_id)?;
            Ok(step)
        })
        .await
    }

    /// Inserts a step at a 0-based position, shifting later steps down.
    pub async fn insert_step(&self, params: &InsertStep) -> Result<Step> {
        let params = params.clone();
        self.with_db(move |db| {
            let step = db.insert_step(
                params.step.event_id,
                params.position,
                NewStep {
                    title: &params.step.title,
                    description: params.step.description.as_deref(),
                    category: params.step.category.as_deref(),
                },
            )?;
            db.sync_description(params.step.event_id)?;
            Ok(step)
        })
        .await
    }

    /// Updates a step's title, description or category.
    pub async fn update_step(&self, params: &UpdateStep) -> Result<Step> {
        let id = params.id;
        let request = params.to_request();
        self.with_db(move |db| {
            db.update_step(id, request)?;
            let step = db.get_step(id)?.ok_or(WaypointError::StepNotFound { id })?;
            db.sync_description(step.event_id)?;
            Ok(step)
        })
        .await
    }

    /// Checks a step off or un-checks it.
    pub async fn toggle_step(&self, params: &ToggleStep) -> Result<Step> {
        let id = params.id;
        let completed = params.completed;
        self.with_db(move |db| db.set_step_completed(id, completed))
            .await
    }

    /// Removes a step and renumbers the remaining ones.
    pub async fn remove_step(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_db(move |db| {
            let event_id = db.remove_step(id)?;
            db.sync_description(event_id)?;
            Ok(())
        })
        .await
    }

    /// Puts an event's steps in the given order.
    pub async fn reorder_steps(&self, params: &ReorderSteps) -> Result<Steps> {
        let params = params.clone();
        self.with_db(move |db| {
            db.reorder_steps(params.event_id, &params.step_ids)?;
            db.sync_description(params.event_id)?;
            db.get_steps(params.event_id).map(Steps)
        })
        .await
    }

    /// Retrieves a single step by its ID.
    pub async fn get_step(&self, params: &Id) -> Result<Option<Step>> {
        let id = params.id;
        self.with_db(move |db| db.get_step(id)).await
    }

    /// Retrieves the steps of an event in order.
    pub async fn get_steps(&self, params: &Id) -> Result<Steps> {
        let id = params.id;
        self.with_db(move |db| {
            db.ensure_event_exists(id)?;
            db.get_steps(id).map(Steps)
        })
        .await
    }
}

//! High-level tracker API for events, steps and templates.
//!
//! [`Tracker`] coordinates the SQLite store, the text codec and the step
//! generator. Every method is async; database work runs on tokio's blocking
//! pool with a fresh connection per call.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Tracker ops   │    │  StepGenerator  │    │    Database     │
//! │ (event_ops,     │───▶│  + codec        │───▶│   (via db/)     │
//! │  step_ops, ...) │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! The tracker is also a [`TemplateCatalogue`] backed by the
//! `step_templates` table, which is what event creation generates from.
//!
//! # Usage
//!
//! ```rust,no_run
//! use waypoint_core::{params::CreateEvent, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/waypoint.db"))
//!     .build()
//!     .await?;
//!
//! let event = tracker
//!     .create_event(&CreateEvent {
//!         title: "Renew passport".to_string(),
//!         description: Some("1. Photos\n2. Fill form\n3. Book appointment".to_string()),
//!         category: None,
//!     })
//!     .await?;
//! assert_eq!(event.steps.len(), 3);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::task;

use crate::{
    catalogue::TemplateCatalogue,
    db::Database,
    error::{Result, WaypointError},
    models::StepTemplate,
};

pub mod builder;
pub mod event_ops;
pub mod step_ops;
pub mod template_ops;


pub use builder::TrackerBuilder;

/// Main tracker interface.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the SQLite database backing this tracker.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(WaypointError::join)?
    }
}

#[async_trait]
impl TemplateCatalogue for Tracker {
    async fn fetch_templates(&self) -> Result<Vec<StepTemplate>> {
        self.with_db(|db| db.list_templates()).await
    }
}

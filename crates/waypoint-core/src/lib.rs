//! Core library for the Waypoint event tracker.
//!
//! Waypoint keeps events (tasks a user tracks) with ordered steps, and
//! generates a starting step list for every new event from its description,
//! a matching step template or a generic plan. The event description and
//! the step list are kept in sync through a small numbered-list codec.
//!
//! # Layout
//!
//! - [`models`]: plain data for events, steps, drafts and templates
//! - [`codec`]: conversion between step lists and description text
//! - [`generator`]: the tiered step generator
//! - [`catalogue`]: sources of step templates
//! - [`db`]: SQLite storage
//! - [`tracker`]: the async application API used by the CLI
//! - [`display`]: Markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{params::CreateEvent, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let event = tracker
//!     .create_event(&CreateEvent {
//!         title: "Plan a trip".to_string(),
//!         description: None,
//!         category: None,
//!     })
//!     .await?;
//! println!("{event}");
//! # Ok(())
//! # }
//! ```

pub mod catalogue;
pub mod codec;
pub mod db;
pub mod display;
pub mod error;
pub mod generator;
pub mod models;
pub mod params;
pub mod tracker;

// Re-export commonly used types
pub use catalogue::{StaticCatalogue, TemplateCatalogue};
pub use codec::{
    description_to_step_titles, has_step_list_format, merge_description_with_steps,
    steps_to_description, Titled,
};
pub use db::Database;
pub use display::{CreateResult, DeleteResult, Events, Steps, Templates, UpdateResult};
pub use error::{Result, WaypointError};
pub use generator::{Generation, StepGenerator, StepSource};
pub use models::{
    Event, EventStatus, Step, StepDraft, StepTemplate, TemplateStep, UpdateEventRequest,
    UpdateStepRequest,
};
pub use tracker::{Tracker, TrackerBuilder};

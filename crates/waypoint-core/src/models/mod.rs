//! Data models for events, steps and step templates.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so the structures here stay plain data.
//!
//! - [`Event`]: a tracked task with its ordered [`Step`]s and an
//!   [`EventStatus`]
//! - [`Step`]: a persisted, orderable sub-task of an event
//! - [`StepDraft`]: an in-memory step produced by the generator, not yet stored
//! - [`StepTemplate`] / [`TemplateStep`]: keyword-tagged checklists used to
//!   seed steps for new events
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{StepDraft, TemplateStep};
//!
//! let step = TemplateStep::new("Book venue", "Call three places", "planning");
//! let draft = StepDraft::from_template_step("preview", 0, &step);
//! assert_eq!(draft.description.as_deref(), Some("Call three places"));
//! assert!(draft.is_auto_generated);
//! ```

pub mod draft;
pub mod event;
pub mod requests;
pub mod status;
pub mod step;
pub mod template;


pub use draft::StepDraft;
pub use event::Event;
pub use requests::{UpdateEventRequest, UpdateStepRequest};
pub use status::EventStatus;
pub use step::Step;
pub use template::{StepTemplate, TemplateStep};

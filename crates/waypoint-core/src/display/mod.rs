//! Markdown formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes are wrapped in newtypes so the same
//! data can be framed differently for lists, creations and deletions.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Markdown      │
//! │  (Event, Step)  │───▶│ & Result Types  │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use jiff::Timestamp;
//! use waypoint_core::{
//!     display::CreateResult,
//!     models::{Event, EventStatus},
//! };
//!
//! let event = Event {
//!     id: 1,
//!     title: "Plan birthday".to_string(),
//!     description: None,
//!     category: None,
//!     status: EventStatus::Pending,
//!     completed_at: None,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//!     steps: vec![],
//! };
//!
//! let output = CreateResult::new(event).to_string();
//! assert!(output.contains("Created event with ID: 1"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Events, Steps, Templates};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};

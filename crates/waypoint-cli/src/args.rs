//! Command-line argument definitions using clap's derive API.
//!
//! Every command has its own argument struct with a `From` conversion into
//! the matching core parameter type, so clap attributes never leak into
//! `waypoint-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use waypoint_core::{
    models::{EventStatus, TemplateStep},
    params::{
        AddTemplate, CreateEvent, Id, InsertStep, PreviewSteps, ReorderSteps, SetEventStatus,
        StepCreate, ToggleStep, UpdateEvent, UpdateStep,
    },
};

/// Track events and the steps needed to get them done.
///
/// New events get a starting checklist: numbered or bulleted lines of the
/// description become steps, otherwise the best matching step template is
/// used, otherwise a generic four-step plan.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage events
    #[command(alias = "e")]
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Manage the steps of an event
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage step templates
    #[command(alias = "t")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Show the steps an event would get, without storing anything
    #[command(alias = "p")]
    Preview(PreviewArgs),
    /// Convert between step lists and description text
    Text {
        #[command(subcommand)]
        command: TextCommands,
    },
}

// ============================================================================
// Events
// ============================================================================

fn field_changes(
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
) -> Vec<String> {
    let mut changes = Vec::new();
    if title.is_some() {
        changes.push("Updated title".to_string());
    }
    match description {
        Some("") => changes.push("Cleared description".to_string()),
        Some(_) => changes.push("Updated description".to_string()),
        None => {}
    }
    match category {
        Some("") => changes.push("Cleared category".to_string()),
        Some(_) => changes.push("Updated category".to_string()),
        None => {}
    }
    changes
}

/// Create a new event
///
/// Without `--step`, steps are generated from the description, a matching
/// template or the generic plan. With one or more `--step`, exactly those
/// steps are stored.
#[derive(ClapArgs)]
pub struct CreateEventArgs {
    /// Title of the event
    pub title: String,
    #[arg(short, long, help = "Free-text description; numbered or bulleted lines become steps")]
    pub description: Option<String>,
    #[arg(short, long, help = "Category, matched exactly against template categories")]
    pub category: Option<String>,
    #[arg(short, long = "step", help = "Step title to store instead of generated steps (repeatable)")]
    pub steps: Vec<String>,
}

impl From<&CreateEventArgs> for CreateEvent {
    fn from(val: &CreateEventArgs) -> Self {
        CreateEvent {
            title: val.title.clone(),
            description: val.description.clone(),
            category: val.category.clone(),
        }
    }
}

impl CreateEventArgs {
    /// User-supplied steps; the event ID is assigned on insert.
    pub fn step_params(&self) -> Vec<StepCreate> {
        self.steps
            .iter()
            .map(|title| StepCreate {
                event_id: 0,
                title: title.clone(),
                description: None,
                category: None,
            })
            .collect()
    }
}

#[derive(ClapArgs)]
pub struct EventIdArgs {
    #[arg(help = "Unique identifier of the event")]
    pub id: u64,
}

impl From<EventIdArgs> for Id {
    fn from(val: EventIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit an event's title, description or category
///
/// Pass an empty string to clear the description or category. Steps are
/// left alone; run `regenerate` to rebuild them from the edited text.
#[derive(ClapArgs)]
pub struct EditEventArgs {
    #[arg(help = "Unique identifier of the event")]
    pub id: u64,
    #[arg(short, long, help = "New title for the event")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description; empty clears it")]
    pub description: Option<String>,
    #[arg(short, long, help = "New category; empty clears it")]
    pub category: Option<String>,
}

impl EditEventArgs {
    /// Human-readable list of the fields this edit touches.
    pub fn changes(&self) -> Vec<String> {
        field_changes(
            self.title.as_deref(),
            self.description.as_deref(),
            self.category.as_deref(),
        )
    }
}

impl From<EditEventArgs> for UpdateEvent {
    fn from(val: EditEventArgs) -> Self {
        UpdateEvent {
            id: val.id,
            title: val.title,
            description: val.description,
            category: val.category,
        }
    }
}

/// Set the lifecycle status of an event
#[derive(ClapArgs)]
pub struct EventStatusArgs {
    #[arg(help = "Unique identifier of the event")]
    pub id: u64,
    #[arg(value_enum, help = "New status of the event")]
    pub status: EventStatusArg,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum EventStatusArg {
    /// Not started yet
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
}

impl From<EventStatusArg> for EventStatus {
    fn from(val: EventStatusArg) -> Self {
        match val {
            EventStatusArg::Pending => EventStatus::Pending,
            EventStatusArg::InProgress => EventStatus::InProgress,
            EventStatusArg::Completed => EventStatus::Completed,
        }
    }
}

impl From<EventStatusArgs> for SetEventStatus {
    fn from(val: EventStatusArgs) -> Self {
        SetEventStatus {
            id: val.id,
            status: val.status.into(),
        }
    }
}

/// Delete an event and all of its steps
#[derive(ClapArgs)]
pub struct DeleteEventArgs {
    #[arg(help = "Unique identifier of the event to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// Create a new event
    #[command(alias = "c")]
    Create(CreateEventArgs),
    /// List all events, newest first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show an event with its steps
    #[command(alias = "s")]
    Show(EventIdArgs),
    /// Edit an event's title, description or category
    #[command(alias = "u")]
    Update(EditEventArgs),
    /// Set the status of an event: pending, in-progress or completed
    Status(EventStatusArgs),
    /// Mark an event as completed
    Done(EventIdArgs),
    /// Delete an event permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteEventArgs),
    /// Replace the steps of an event with freshly generated ones, after
    /// applying any --title, --description or --category edits
    Regenerate(EditEventArgs),
    /// Rewrite the description as the numbered step list
    Sync(EventIdArgs),
    /// Fold the step list into the description, keeping free text
    Merge(EventIdArgs),
}

// ============================================================================
// Steps
// ============================================================================

/// Append a step to an event
#[derive(ClapArgs)]
pub struct AddStepArgs {
    #[arg(help = "Unique identifier of the event to add this step to")]
    pub event_id: u64,
    /// Title of the step
    pub title: String,
    #[arg(short, long, help = "Optional longer description of the step")]
    pub description: Option<String>,
    #[arg(short, long, help = "Optional free-text category of the step")]
    pub category: Option<String>,
}

impl From<AddStepArgs> for StepCreate {
    fn from(val: AddStepArgs) -> Self {
        StepCreate {
            event_id: val.event_id,
            title: val.title,
            description: val.description,
            category: val.category,
        }
    }
}

/// Insert a step at a 0-based position, shifting later steps down
#[derive(ClapArgs)]
pub struct InsertStepArgs {
    #[arg(help = "Unique identifier of the event to insert this step into")]
    pub event_id: u64,
    #[arg(help = "0-based position index where to insert the step (0 = first position)")]
    pub position: u32,
    /// Title of the step
    pub title: String,
    #[arg(short, long, help = "Optional longer description of the step")]
    pub description: Option<String>,
    #[arg(short, long, help = "Optional free-text category of the step")]
    pub category: Option<String>,
}

impl From<InsertStepArgs> for InsertStep {
    fn from(val: InsertStepArgs) -> Self {
        InsertStep {
            step: StepCreate {
                event_id: val.event_id,
                title: val.title,
                description: val.description,
                category: val.category,
            },
            position: val.position,
        }
    }
}

/// Update a step's title, description or category
///
/// Pass an empty string to clear the description or category.
#[derive(ClapArgs)]
pub struct UpdateStepArgs {
    #[arg(help = "Unique identifier of the step to update")]
    pub id: u64,
    #[arg(short, long, help = "Updated title for the step")]
    pub title: Option<String>,
    #[arg(short, long, help = "Updated description; empty clears it")]
    pub description: Option<String>,
    #[arg(short, long, help = "Updated category; empty clears it")]
    pub category: Option<String>,
}

impl UpdateStepArgs {
    /// Human-readable list of the fields this update touches.
    pub fn changes(&self) -> Vec<String> {
        field_changes(
            self.title.as_deref(),
            self.description.as_deref(),
            self.category.as_deref(),
        )
    }
}

impl From<UpdateStepArgs> for UpdateStep {
    fn from(val: UpdateStepArgs) -> Self {
        UpdateStep {
            id: val.id,
            title: val.title,
            description: val.description,
            category: val.category,
        }
    }
}

#[derive(ClapArgs)]
pub struct StepIdArgs {
    #[arg(help = "Unique identifier of the step")]
    pub id: u64,
}

impl From<StepIdArgs> for Id {
    fn from(val: StepIdArgs) -> Self {
        Id { id: val.id }
    }
}

impl StepIdArgs {
    pub fn toggle(&self, completed: bool) -> ToggleStep {
        ToggleStep {
            id: self.id,
            completed,
        }
    }
}

/// Put the steps of an event in a new order
#[derive(ClapArgs)]
pub struct ReorderStepsArgs {
    #[arg(help = "Unique identifier of the event")]
    pub event_id: u64,
    #[arg(
        required = true,
        help = "Every step ID of the event, in the new order"
    )]
    pub step_ids: Vec<u64>,
}

impl From<ReorderStepsArgs> for ReorderSteps {
    fn from(val: ReorderStepsArgs) -> Self {
        ReorderSteps {
            event_id: val.event_id,
            step_ids: val.step_ids,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a step to an event
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Insert a step at a specific position
    #[command(alias = "i")]
    Insert(InsertStepArgs),
    /// Update a step's details
    #[command(alias = "u")]
    Update(UpdateStepArgs),
    /// Check a step off
    Done(StepIdArgs),
    /// Un-check a step
    Undo(StepIdArgs),
    /// Remove a step
    #[command(alias = "rm")]
    Remove(StepIdArgs),
    /// Reorder the steps of an event
    Reorder(ReorderStepsArgs),
}

// ============================================================================
// Templates
// ============================================================================

/// Add a step template
#[derive(ClapArgs)]
pub struct AddTemplateArgs {
    /// Category an event must carry to match this template
    pub category: String,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Keywords searched case-insensitively in event text, comma-separated"
    )]
    pub keywords: Vec<String>,
    #[arg(
        short,
        long = "step",
        required = true,
        help = "Step title, in order (repeatable)"
    )]
    pub steps: Vec<String>,
    #[arg(short, long, default_value_t = 0, help = "Higher priorities are consulted first")]
    pub priority: i64,
}

impl From<AddTemplateArgs> for AddTemplate {
    fn from(val: AddTemplateArgs) -> Self {
        AddTemplate {
            steps: val
                .steps
                .into_iter()
                .map(|title| TemplateStep::new(title, "", ""))
                .collect(),
            category: val.category,
            keywords: val.keywords,
            priority: val.priority,
        }
    }
}

#[derive(ClapArgs)]
pub struct TemplateIdArgs {
    #[arg(help = "Unique identifier of the template")]
    pub id: u64,
}

impl From<TemplateIdArgs> for Id {
    fn from(val: TemplateIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct ImportTemplatesArgs {
    #[arg(help = "JSON file holding an array of templates")]
    pub path: PathBuf,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Add a step template
    #[command(alias = "a")]
    Add(AddTemplateArgs),
    /// List templates by priority
    #[command(aliases = ["l", "ls"])]
    List,
    /// Remove a template
    #[command(alias = "rm")]
    Remove(TemplateIdArgs),
    /// Import templates from a JSON file
    Import(ImportTemplatesArgs),
}

// ============================================================================
// Preview and text tools
// ============================================================================

#[derive(ClapArgs)]
pub struct PreviewArgs {
    /// Title of the prospective event
    pub title: String,
    #[arg(short, long, help = "Description to parse for steps")]
    pub description: Option<String>,
    #[arg(short, long, help = "Category to match against templates")]
    pub category: Option<String>,
}

impl From<PreviewArgs> for PreviewSteps {
    fn from(val: PreviewArgs) -> Self {
        PreviewSteps {
            title: val.title,
            description: val.description,
            category: val.category,
        }
    }
}

#[derive(Subcommand)]
pub enum TextCommands {
    /// Render step titles as a numbered list
    Describe {
        #[arg(required = true)]
        titles: Vec<String>,
    },
    /// Extract step titles from a description
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Report whether a description already holds a step list
    Check {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Merge step titles into a description
    Merge {
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

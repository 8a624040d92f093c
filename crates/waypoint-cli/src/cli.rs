//! Command handlers: run a parsed command against the tracker and render
//! the result.

use anyhow::{bail, Context, Result};
use log::debug;
use waypoint_core::{
    description_to_step_titles,
    display::{CreateResult, DeleteResult, Templates, UpdateResult},
    has_step_list_format, merge_description_with_steps,
    params::{CreateEvent, Id},
    steps_to_description, Tracker, WaypointError,
};

use crate::{
    args::{
        Commands, EventCommands, PreviewArgs, StepCommands, TemplateCommands, TextCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn run(&self, command: Option<Commands>) -> Result<()> {
        match command {
            Some(Commands::Event { command }) => self.handle_event_command(command).await,
            Some(Commands::Step { command }) => self.handle_step_command(command).await,
            Some(Commands::Template { command }) => self.handle_template_command(command).await,
            Some(Commands::Preview(args)) => self.preview(args).await,
            Some(Commands::Text { command }) => self.handle_text_command(command),
            None => self.list_events().await,
        }
    }

    pub async fn handle_event_command(&self, command: EventCommands) -> Result<()> {
        match command {
            EventCommands::Create(args) => {
                let params = CreateEvent::from(&args);
                let created = if args.steps.is_empty() {
                    self.tracker.create_event(&params).await
                } else {
                    self.tracker
                        .create_event_with_steps(&params, &args.step_params())
                        .await
                };
                let event = created.context("Failed to create event")?;
                self.renderer.render(&CreateResult::new(event).to_string())
            }
            EventCommands::List => self.list_events().await,
            EventCommands::Show(args) => {
                let id = args.id;
                let event = self
                    .tracker
                    .get_event(&args.into())
                    .await
                    .context("Failed to load event")?
                    .ok_or(WaypointError::EventNotFound { id })?;
                self.renderer.render(&event.to_string())
            }
            EventCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Refusing to delete event {} without --confirm",
                        args.id
                    );
                }
                let id = Id { id: args.id };
                let event = self
                    .tracker
                    .get_event(&id)
                    .await?
                    .ok_or(WaypointError::EventNotFound { id: args.id })?;
                self.tracker
                    .delete_event(&id)
                    .await
                    .context("Failed to delete event")?;
                self.renderer.render(&DeleteResult::new(event).to_string())
            }
            EventCommands::Update(args) => {
                let changes = args.changes();
                if changes.is_empty() {
                    bail!("Nothing to update: pass --title, --description or --category");
                }
                let event = self
                    .tracker
                    .update_event(&args.into())
                    .await
                    .context("Failed to update event")?;
                self.renderer
                    .render(&UpdateResult::with_changes(event, changes).to_string())
            }
            EventCommands::Status(args) => {
                let event = self
                    .tracker
                    .set_event_status(&args.into())
                    .await
                    .context("Failed to set event status")?;
                let change = format!("Status set to {}", event.status.as_str());
                self.renderer
                    .render(&UpdateResult::with_changes(event, vec![change]).to_string())
            }
            EventCommands::Done(args) => {
                let event = self
                    .tracker
                    .complete_event(&args.into())
                    .await
                    .context("Failed to complete event")?;
                self.renderer.render(&UpdateResult::new(event).to_string())
            }
            EventCommands::Regenerate(args) => {
                let mut changes = args.changes();
                let (event, generation) = self
                    .tracker
                    .regenerate_steps(&args.into())
                    .await
                    .context("Failed to regenerate steps")?;
                changes.push(format!(
                    "Regenerated {} step(s), {}",
                    generation.drafts.len(),
                    generation.source
                ));
                self.renderer
                    .render(&UpdateResult::with_changes(event, changes).to_string())
            }
            EventCommands::Sync(args) => {
                let id = args.id;
                let description = self
                    .tracker
                    .sync_description(&args.into())
                    .await
                    .context("Failed to sync description")?;
                self.render_description(id, &description)
            }
            EventCommands::Merge(args) => {
                let id = args.id;
                let description = self
                    .tracker
                    .merge_steps_into_description(&args.into())
                    .await
                    .context("Failed to merge steps into description")?;
                self.render_description(id, &description)
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Add(args) => {
                let step = self
                    .tracker
                    .add_step(&args.into())
                    .await
                    .context("Failed to add step")?;
                self.renderer.render(&CreateResult::new(step).to_string())
            }
            StepCommands::Insert(args) => {
                let step = self
                    .tracker
                    .insert_step(&args.into())
                    .await
                    .context("Failed to insert step")?;
                self.renderer.render(&CreateResult::new(step).to_string())
            }
            StepCommands::Update(args) => {
                let changes = args.changes();
                if changes.is_empty() {
                    bail!("Nothing to update: pass --title, --description or --category");
                }
                let step = self
                    .tracker
                    .update_step(&args.into())
                    .await
                    .context("Failed to update step")?;
                self.renderer
                    .render(&UpdateResult::with_changes(step, changes).to_string())
            }
            StepCommands::Done(args) => {
                let step = self
                    .tracker
                    .toggle_step(&args.toggle(true))
                    .await
                    .context("Failed to complete step")?;
                self.renderer.render(&UpdateResult::new(step).to_string())
            }
            StepCommands::Undo(args) => {
                let step = self
                    .tracker
                    .toggle_step(&args.toggle(false))
                    .await
                    .context("Failed to reopen step")?;
                self.renderer.render(&UpdateResult::new(step).to_string())
            }
            StepCommands::Remove(args) => {
                let id = Id::from(args);
                let step = self
                    .tracker
                    .get_step(&id)
                    .await?
                    .ok_or(WaypointError::StepNotFound { id: id.id })?;
                self.tracker
                    .remove_step(&id)
                    .await
                    .context("Failed to remove step")?;
                self.renderer.render(&DeleteResult::new(step).to_string())
            }
            StepCommands::Reorder(args) => {
                let steps = self
                    .tracker
                    .reorder_steps(&args.into())
                    .await
                    .context("Failed to reorder steps")?;
                self.renderer.render(&steps.to_string())
            }
        }
    }

    pub async fn handle_template_command(&self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::Add(args) => {
                let template = self
                    .tracker
                    .add_template(args.into())
                    .await
                    .context("Failed to add template")?;
                self.renderer.render(&CreateResult::new(template).to_string())
            }
            TemplateCommands::List => {
                let templates = self
                    .tracker
                    .list_templates()
                    .await
                    .context("Failed to list templates")?;
                self.renderer.render(&format!(
                    "# Templates\n\n{}",
                    Templates(templates)
                ))
            }
            TemplateCommands::Remove(args) => {
                let id = Id::from(args);
                let template = self
                    .tracker
                    .list_templates()
                    .await?
                    .into_iter()
                    .find(|t| t.id == id.id)
                    .ok_or(WaypointError::TemplateNotFound { id: id.id })?;
                self.tracker
                    .remove_template(&id)
                    .await
                    .context("Failed to remove template")?;
                self.renderer.render(&DeleteResult::new(template).to_string())
            }
            TemplateCommands::Import(args) => {
                let imported = self
                    .tracker
                    .import_templates(&args.path)
                    .await
                    .with_context(|| {
                        format!("Failed to import templates from {}", args.path.display())
                    })?;
                self.renderer.render(&format!(
                    "Imported {} template(s)\n\n{}",
                    imported.len(),
                    Templates(imported)
                ))
            }
        }
    }

    pub async fn list_events(&self) -> Result<()> {
        let events = self
            .tracker
            .list_events()
            .await
            .context("Failed to list events")?;
        self.renderer.render(&format!("# Events\n\n{events}"))
    }

    async fn preview(&self, args: PreviewArgs) -> Result<()> {
        let generation = self.tracker.preview_steps(&args.into()).await;
        debug!("Previewed {} step(s)", generation.drafts.len());
        self.renderer.render(&generation.to_string())
    }

    /// Text tools print raw text so their output can be piped.
    fn handle_text_command(&self, command: TextCommands) -> Result<()> {
        let output = match command {
            TextCommands::Describe { titles } => steps_to_description(&titles),
            TextCommands::Parse { text } => description_to_step_titles(&text).join("\n"),
            TextCommands::Check { text } => has_step_list_format(&text).to_string(),
            TextCommands::Merge { text, titles } => {
                merge_description_with_steps(&text, &titles)
            }
        };
        self.renderer.print_plain(&output);
        Ok(())
    }

    fn render_description(&self, id: u64, description: &str) -> Result<()> {
        self.renderer
            .render(&format!("Description of event {id}:\n\n{description}\n"))
    }
}

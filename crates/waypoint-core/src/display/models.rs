//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    generator::Generation,
    models::{Event, Step, StepDraft, StepTemplate},
};

fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.with_icon())?;
        if let Some(category) = &self.category {
            writeln!(f, "- Category: {category}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this event.")?;
        } else {
            writeln!(
                f,
                "\n## Steps ({}/{})",
                self.completed_steps(),
                self.steps.len()
            )?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} {}. {} (ID: {})",
            checkbox(self.is_completed),
            self.order_index + 1,
            self.title,
            self.id
        )?;
        if let Some(category) = &self.category {
            write!(f, " `{category}`")?;
        }
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "  {desc}")?;
        }
        if let Some(done) = &self.completed_at {
            writeln!(f, "  Completed: {}", LocalDateTime(done))?;
        }

        Ok(())
    }
}

impl fmt::Display for StepDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.order_index + 1, self.title)?;
        if let Some(category) = &self.category {
            write!(f, " `{category}`")?;
        }
        writeln!(f)?;
        if let Some(desc) = &self.description {
            writeln!(f, "   {desc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated {} step(s), {}", self.drafts.len(), self.source)?;
        writeln!(f)?;
        for draft in &self.drafts {
            write!(f, "{draft}")?;
        }
        Ok(())
    }
}

impl fmt::Display for StepTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}, priority {})",
            self.category, self.id, self.priority
        )?;
        writeln!(f)?;
        if !self.keywords.is_empty() {
            writeln!(f, "- **Keywords**: {}", self.keywords.join(", "))?;
            writeln!(f)?;
        }
        for (index, step) in self.template_steps.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, step.title)?;
        }
        writeln!(f)
    }
}

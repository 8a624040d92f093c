//! Newtype wrappers for displaying collections of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::{Event, Step, StepTemplate};

/// Implements the slice-like accessors shared by every collection wrapper.
macro_rules! collection_wrapper {
    ($name:ident, $item:ty) => {
        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// Events listed one heading each, without their steps.
#[derive(Debug, Clone)]
pub struct Events(pub Vec<Event>);

collection_wrapper!(Events, Event);

impl fmt::Display for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No events found.");
        }
        for event in &self.0 {
            writeln!(f, "## {} (ID: {})", event.title, event.id)?;
            writeln!(f)?;
            writeln!(f, "- **Status**: {}", event.status.with_icon())?;
            if let Some(category) = &event.category {
                writeln!(f, "- **Category**: {category}")?;
            }
            writeln!(f, "- **Created**: {}", LocalDateTime(&event.created_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Steps of one event, in order.
#[derive(Debug, Clone)]
pub struct Steps(pub Vec<Step>);

collection_wrapper!(Steps, Step);

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No steps found.")
        } else {
            for step in &self.0 {
                write!(f, "{step}")?;
            }
            Ok(())
        }
    }
}

/// Step templates by descending priority.
#[derive(Debug, Clone)]
pub struct Templates(pub Vec<StepTemplate>);

collection_wrapper!(Templates, StepTemplate);

impl fmt::Display for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No templates found.")
        } else {
            for template in &self.0 {
                write!(f, "{template}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::EventStatus;

    fn event(id: u64, title: &str) -> Event {
        Event {
            id,
            title: title.to_string(),
            description: Some("ignored in lists".to_string()),
            category: None,
            status: EventStatus::Pending,
            completed_at: None,
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
            steps: vec![],
        }
    }

    #[test]
    fn test_events_display() {
        let events = Events(vec![event(2, "Newer"), event(1, "Older")]);
        let output = events.to_string();
        assert!(output.contains("## Newer (ID: 2)"));
        assert!(output.contains("## Older (ID: 1)"));
        assert!(!output.contains("ignored in lists"));
        assert!(output.contains("- **Status**: ○ Pending"));
        assert!(output.find("Newer") < output.find("Older"));
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, 1);
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Events(vec![]).to_string(), "No events found.\n");
        assert_eq!(Steps(vec![]).to_string(), "No steps found.\n");
        assert_eq!(Templates(vec![]).to_string(), "No templates found.\n");
    }
}

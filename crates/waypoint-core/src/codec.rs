//! Conversion between an ordered step list and a numbered-list description.
//!
//! The mapping is lossy but stable: only titles survive the trip through
//! text, and a description that already looks like a step list is replaced
//! wholesale when merged with new steps. Every function here is total.
//!
//! ```rust
//! use waypoint_core::codec::{description_to_step_titles, steps_to_description};
//!
//! let text = steps_to_description(&["Pack bags", "Book taxi"]);
//! assert_eq!(text, "1. Pack bags\n2. Book taxi");
//! assert_eq!(description_to_step_titles(&text), vec!["Pack bags", "Book taxi"]);
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Step, StepDraft, TemplateStep};

/// Heading placed between free-form text and an appended step list.
pub const STEP_LIST_HEADING: &str = "Execution steps:";

/// Minimum number of marked lines for text to count as a step list.
const STEP_LIST_MIN_LINES: usize = 2;

/// Anything that carries a step title.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for str {
    fn title(&self) -> &str {
        self
    }
}

impl Titled for String {
    fn title(&self) -> &str {
        self
    }
}

impl Titled for Step {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for StepDraft {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for TemplateStep {
    fn title(&self) -> &str {
        &self.title
    }
}

impl<T: Titled + ?Sized> Titled for &T {
    fn title(&self) -> &str {
        (**self).title()
    }
}

fn marked_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[0-9一二三四五六七八九十]+[.)、．]|[-*•])\s*(.+)$")
            .expect("marked line pattern is valid")
    })
}

/// Returns the text after a leading enumerator or bullet, if the line has one.
fn strip_marker(line: &str) -> Option<&str> {
    marked_line_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|rest| !rest.is_empty())
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Formats steps as `"<n>. <title>"` lines, numbered by position from 1.
///
/// Steps must already be in display order; `order_index` is not consulted.
pub fn steps_to_description<T: Titled>(steps: &[T]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {}", index + 1, step.title()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts titles from every line that starts with an enumerator or bullet.
/// Unmarked lines are skipped.
pub fn description_to_step_titles(text: &str) -> Vec<String> {
    non_blank_lines(text)
        .filter_map(strip_marker)
        .map(String::from)
        .collect()
}

/// True if at least two non-blank lines carry an enumerator or bullet.
pub fn has_step_list_format(text: &str) -> bool {
    non_blank_lines(text)
        .filter(|line| strip_marker(line).is_some())
        .take(STEP_LIST_MIN_LINES)
        .count()
        >= STEP_LIST_MIN_LINES
}

/// Folds a step list into existing description text.
///
/// Empty steps leave the text alone, blank text or an existing step list is
/// replaced, and anything else gets the list appended under
/// [`STEP_LIST_HEADING`].
pub fn merge_description_with_steps<T: Titled>(current: &str, steps: &[T]) -> String {
    if steps.is_empty() {
        return current.to_string();
    }

    let steps_text = steps_to_description(steps);

    if current.trim().is_empty() || has_step_list_format(current) {
        return steps_text;
    }

    format!("{current}\n\n{STEP_LIST_HEADING}\n{steps_text}")
}

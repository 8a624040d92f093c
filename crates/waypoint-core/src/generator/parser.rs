//! Loose line parser that turns a free-text description into template steps.
//!
//! Unlike [`crate::codec::description_to_step_titles`], an unmarked line is
//! still taken as a step when it is longer than [`IMPLICIT_STEP_MIN_CHARS`].
//! This means ordinary prose paragraphs become steps too; callers that want
//! strict list detection should use the codec instead.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::TemplateStep;

/// Category given to every step parsed out of a description.
pub const CUSTOM_CATEGORY: &str = "custom";

/// Longest title kept before the rest moves into the description.
pub const MAX_TITLE_CHARS: usize = 20;

/// Unmarked lines longer than this many characters count as steps.
pub const IMPLICIT_STEP_MIN_CHARS: usize = 5;

fn enumerator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9一二三四五六七八九十]+[、.．。）)]\s*")
            .expect("enumerator pattern is valid")
    })
}

fn bullet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[-*•]\s*").expect("bullet pattern is valid"))
}

/// Parses every candidate line of `description` into a step.
pub fn parse_description_for_steps(description: &str) -> Vec<TemplateStep> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| is_candidate(line))
        .filter_map(parse_line)
        .collect()
}

fn is_candidate(line: &str) -> bool {
    enumerator_pattern().is_match(line)
        || bullet_pattern().is_match(line)
        || line.chars().count() > IMPLICIT_STEP_MIN_CHARS
}

fn parse_line(line: &str) -> Option<TemplateStep> {
    let without_enumerator = enumerator_pattern().replace(line, "");
    let cleaned = bullet_pattern().replace(&without_enumerator, "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return None;
    }

    let (title, description) = if cleaned.chars().count() > MAX_TITLE_CHARS {
        (
            cleaned.chars().take(MAX_TITLE_CHARS).collect::<String>(),
            cleaned.to_string(),
        )
    } else {
        (cleaned.to_string(), String::new())
    };

    Some(TemplateStep {
        title,
        description,
        category: CUSTOM_CATEGORY.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_lines_are_stripped() {
        let steps = parse_description_for_steps("1. Buy\n二、Cook\n- Eat\n* Wash\n• Dry\n3）Rest");
        let titles: Vec<&str> = steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy", "Cook", "Eat", "Wash", "Dry", "Rest"]);
        assert!(steps.iter().all(|s| s.category == CUSTOM_CATEGORY));
        assert!(steps.iter().all(|s| s.description.is_empty()));
    }

    #[test]
    fn test_short_unmarked_lines_are_dropped() {
        assert!(parse_description_for_steps("hi\nok\nfive!").is_empty());
    }

    #[test]
    fn test_long_unmarked_line_is_implicit_step() {
        let steps = parse_description_for_steps("call mom");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "call mom");
    }

    #[test]
    fn test_long_text_is_truncated_into_title() {
        let line = "Renew passport at the city office before June";
        let steps = parse_description_for_steps(line);
        assert_eq!(steps[0].title, "Renew passport at th");
        assert_eq!(steps[0].title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(steps[0].description, line);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let line = "一、准备材料并且提交申请表格给相关部门审核等待结果通知";
        let steps = parse_description_for_steps(line);
        assert_eq!(steps[0].title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(steps[0].description, "准备材料并且提交申请表格给相关部门审核等待结果通知");
    }

    #[test]
    fn test_marker_only_line_is_dropped() {
        assert!(parse_description_for_steps("1.\n-  \n*").is_empty());
    }

    #[test]
    fn test_enumerator_then_bullet_both_stripped() {
        let steps = parse_description_for_steps("1. - nested");
        assert_eq!(steps[0].title, "nested");
    }
}

//! Tests for step generation.

use async_trait::async_trait;

use super::*;
use crate::{
    catalogue::StaticCatalogue,
    error::{Result, WaypointError},
    models::TemplateStep,
};

struct FailingCatalogue;

#[async_trait]
impl TemplateCatalogue for FailingCatalogue {
    async fn fetch_templates(&self) -> Result<Vec<StepTemplate>> {
        Err(WaypointError::Configuration {
            message: "store offline".to_string(),
        })
    }
}

fn template(id: u64, category: &str, keywords: &[&str], priority: i64, titles: &[&str]) -> StepTemplate {
    StepTemplate {
        id,
        category: category.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        template_steps: titles
            .iter()
            .map(|t| TemplateStep::new(*t, format!("{t} details"), category))
            .collect(),
        priority,
    }
}

fn sample_catalogue() -> StaticCatalogue {
    StaticCatalogue::new(vec![
        template(1, "travel", &["trip", "flight"], 10, &["Book flight", "Pack"]),
        template(2, "study", &["exam", "Course"], 5, &["Review notes", "Mock test"]),
        template(3, "work", &["report"], 1, &["Outline", "Write", "Submit"]),
    ])
}

fn titles(drafts: &[StepDraft]) -> Vec<&str> {
    drafts.iter().map(|d| d.title.as_str()).collect()
}

#[tokio::test]
async fn test_parsed_description_wins_over_templates() {
    let generator = StepGenerator::new(sample_catalogue());
    let generation = generator
        .generate("7", "Flight to Oslo", Some("1. Renew visa\n2. Buy adapter"), Some("travel"))
        .await;

    assert_eq!(generation.source, StepSource::Parsed);
    assert_eq!(titles(&generation.drafts), vec!["Renew visa", "Buy adapter"]);
    assert!(generation
        .drafts
        .iter()
        .all(|d| d.category.as_deref() == Some("custom") && d.event_id == "7"));
}

#[tokio::test]
async fn test_parsed_steps_are_still_marked_auto_generated() {
    let generator = StepGenerator::new(StaticCatalogue::empty());
    let drafts = generator
        .generate_steps("1", "Errands", Some("- groceries"), None)
        .await;
    assert_eq!(drafts.len(), 1);
    assert!(drafts[0].is_auto_generated);
    assert_eq!(drafts[0].description, None);
}

#[tokio::test]
async fn test_category_match_beats_higher_priority_keyword_match() {
    let generator = StepGenerator::new(sample_catalogue());
    // "trip" hits the travel template (priority 10) by keyword, but the
    // category names the work template exactly
    let generation = generator
        .generate("9", "Write trip report", None, Some("work"))
        .await;

    assert_eq!(
        generation.source,
        StepSource::Template {
            template_id: 3,
            category: "work".to_string(),
            by_category: true,
        }
    );
    assert_eq!(titles(&generation.drafts), vec!["Outline", "Write", "Submit"]);
}

#[tokio::test]
async fn test_category_match_when_no_keyword_hits_earlier_template() {
    let generator = StepGenerator::new(sample_catalogue());
    let generation = generator
        .generate("9", "Quarterly numbers", None, Some("work"))
        .await;

    assert_eq!(titles(&generation.drafts), vec!["Outline", "Write", "Submit"]);
    assert!(matches!(
        generation.source,
        StepSource::Template {
            template_id: 3,
            by_category: true,
            ..
        }
    ));
}

#[tokio::test]
async fn test_keyword_match_is_case_insensitive() {
    let generator = StepGenerator::new(sample_catalogue());
    let drafts = generator
        .generate_steps("2", "Final EXAM prep", None, None)
        .await;
    assert_eq!(titles(&drafts), vec!["Review notes", "Mock test"]);
    assert_eq!(drafts[0].description.as_deref(), Some("Review notes details"));
    assert_eq!(drafts[0].category.as_deref(), Some("study"));
}

#[tokio::test]
async fn test_keyword_in_uppercase_template_matches_lowercase_text() {
    let generator = StepGenerator::new(sample_catalogue());
    let drafts = generator
        .generate_steps("2", "online course signup", None, None)
        .await;
    assert_eq!(titles(&drafts), vec!["Review notes", "Mock test"]);
}

#[tokio::test]
async fn test_highest_priority_keyword_template_wins() {
    let generator = StepGenerator::new(sample_catalogue());
    let drafts = generator
        .generate_steps("3", "exam trip", None, None)
        .await;
    assert_eq!(titles(&drafts), vec!["Book flight", "Pack"]);
}

#[tokio::test]
async fn test_keyword_found_in_category_text() {
    let generator = StepGenerator::new(sample_catalogue());
    let drafts = generator
        .generate_steps("3", "Something", None, Some("annual report"))
        .await;
    assert_eq!(titles(&drafts), vec!["Outline", "Write", "Submit"]);
}

#[tokio::test]
async fn test_fallback_plan_with_empty_catalogue() {
    let generator = StepGenerator::new(StaticCatalogue::empty());
    let generation = generator.generate("5", "Misc", None, None).await;

    assert_eq!(generation.source, StepSource::Fallback);
    assert_eq!(
        titles(&generation.drafts),
        vec!["Begin preparation", "Make a plan", "Execute", "Review and accept"]
    );
    let categories: Vec<_> = generation
        .drafts
        .iter()
        .map(|d| d.category.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(categories, vec!["preparation", "planning", "execution", "summary"]);
    for (index, draft) in generation.drafts.iter().enumerate() {
        assert_eq!(draft.order_index, index as u32);
        assert!(draft.is_auto_generated);
    }
}

#[tokio::test]
async fn test_catalogue_failure_degrades_to_fallback() {
    let generator = StepGenerator::new(FailingCatalogue);
    let generation = generator.generate("5", "exam trip", None, None).await;
    assert_eq!(generation.source, StepSource::Fallback);
    assert_eq!(generation.drafts.len(), 4);
}

#[tokio::test]
async fn test_unparseable_description_falls_through_to_templates() {
    let generator = StepGenerator::new(sample_catalogue());
    let generation = generator
        .generate("4", "flight", Some("ok\n\nhm"), None)
        .await;
    assert!(matches!(generation.source, StepSource::Template { template_id: 1, .. }));
}

#[tokio::test]
async fn test_empty_category_never_matches_by_category() {
    let catalogue = StaticCatalogue::new(vec![template(1, "", &[], 1, &["Should not appear"])]);
    let generator = StepGenerator::new(catalogue);
    let generation = generator.generate("4", "Misc", None, Some("")).await;
    assert_eq!(generation.source, StepSource::Fallback);
}

#[tokio::test]
async fn test_matched_template_without_steps_uses_fallback() {
    let catalogue = StaticCatalogue::new(vec![template(1, "chores", &["laundry"], 1, &[])]);
    let generator = StepGenerator::new(catalogue);
    let generation = generator.generate("4", "Laundry day", None, None).await;
    assert_eq!(generation.source, StepSource::Fallback);
}

#[tokio::test]
async fn test_order_index_is_contiguous_from_zero() {
    let generator = StepGenerator::new(StaticCatalogue::empty());
    let drafts = generator
        .generate_steps("8", "List", Some("- a\n- b\n- c\n- d\n- e"), None)
        .await;
    let orders: Vec<u32> = drafts.iter().map(|d| d.order_index).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_match_template_returns_none_without_hits() {
    let catalogue = sample_catalogue();
    assert!(match_template("garden", None, Some("home"), catalogue.templates()).is_none());
}

#[test]
fn test_step_source_display() {
    assert_eq!(StepSource::Fallback.to_string(), "generic plan");
    assert_eq!(
        StepSource::Template {
            template_id: 1,
            category: "travel".to_string(),
            by_category: true
        }
        .to_string(),
        "template 'travel' (category match)"
    );
}

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use waypoint_core::{StepTemplate, TemplateStep, Tracker, TrackerBuilder};

/// Creates a temporary directory and a database path inside it
pub fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test_events.db");
    (temp_dir, db_path)
}

/// Builds a tracker over a fresh temporary database
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    let (temp_dir, db_path) = create_test_environment();
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

pub fn template(category: &str, keywords: &[&str], steps: &[&str], priority: i64) -> StepTemplate {
    StepTemplate {
        id: 0,
        category: category.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        template_steps: steps
            .iter()
            .map(|title| TemplateStep::new(*title, "", category))
            .collect(),
        priority,
    }
}

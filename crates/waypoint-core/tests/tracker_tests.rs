mod common;

use waypoint_core::{
    params::{CreateEvent, Id, StepCreate, ToggleStep},
    TrackerBuilder, WaypointError,
};

use crate::common::{create_test_environment, create_test_tracker, template};

#[tokio::test]
async fn test_complete_event_workflow() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    for t in [
        template("wedding", &[], &["Book venue", "Send invites"], 1),
        template("fitness", &["gym", "marathon"], &["Buy shoes", "Train"], 2),
    ] {
        tracker
            .add_template(waypoint_core::params::AddTemplate {
                category: t.category,
                keywords: t.keywords,
                steps: t.template_steps,
                priority: t.priority,
            })
            .await
            .expect("Failed to add template");
    }

    // A category match beats the keyword match of a higher priority template
    let event = tracker
        .create_event(&CreateEvent {
            title: "Marathon after the wedding".to_string(),
            description: None,
            category: Some("wedding".to_string()),
        })
        .await
        .expect("Failed to create event");
    let titles: Vec<&str> = event.steps.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Book venue", "Send invites"]);

    let extra = tracker
        .add_step(&StepCreate {
            event_id: event.id,
            title: "Buy rings".to_string(),
            description: None,
            category: Some("shopping".to_string()),
        })
        .await
        .expect("Failed to add step");
    assert_eq!(extra.order_index, 2);
    assert!(!extra.is_auto_generated);

    for step in &event.steps {
        tracker
            .toggle_step(&ToggleStep {
                id: step.id,
                completed: true,
            })
            .await
            .expect("Failed to complete step");
    }

    let loaded = tracker
        .get_event(&Id { id: event.id })
        .await
        .expect("Failed to load event")
        .expect("Event should exist");
    assert_eq!(loaded.completed_steps(), 2);
    assert_eq!(
        loaded.description.as_deref(),
        Some("1. Book venue\n2. Send invites\n3. Buy rings")
    );

    let listed = tracker.list_events().await.expect("Failed to list events");
    assert_eq!(listed.len(), 1);

    tracker
        .delete_event(&Id { id: event.id })
        .await
        .expect("Failed to delete event");
    assert!(matches!(
        tracker.delete_event(&Id { id: event.id }).await,
        Err(WaypointError::EventNotFound { .. })
    ));
}

#[tokio::test]
async fn test_data_persists_across_trackers() {
    let (_temp_dir, db_path) = create_test_environment();

    let first = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    let event = first
        .create_event(&CreateEvent {
            title: "Persisted".to_string(),
            description: Some("1. Alpha\n2. Beta".to_string()),
            category: None,
        })
        .await
        .expect("Failed to create event");
    drop(first);

    let second = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to reopen tracker");
    let loaded = second
        .get_event(&Id { id: event.id })
        .await
        .expect("Failed to load event")
        .expect("Event should exist");
    assert_eq!(loaded.steps.len(), 2);
    assert_eq!(second.database_path(), db_path.as_path());
}

#[tokio::test]
async fn test_builder_creates_missing_directories() {
    let (temp_dir, _) = create_test_environment();
    let nested = temp_dir.path().join("a").join("b").join("events.db");

    TrackerBuilder::new()
        .with_database_path(Some(&nested))
        .build()
        .await
        .expect("Failed to create tracker");
    assert!(nested.exists());
}

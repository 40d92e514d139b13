//! StepService tests against a migrated SQLite database.

use std::collections::HashSet;

use entity::step;
use help_center::modules::knowledge_base::{
    NewStep, ProjectService, ServiceError, StepChanges, StepService, TutorialService,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use serde_json::json;

use crate::bootstrap::init::setup_test_db;

// ============================================================================
// Helpers
// ============================================================================

async fn tutorial(db: &DatabaseConnection, project: &str, name: &str) -> i32 {
    let project = ProjectService::new(db).create(project).await.unwrap();
    TutorialService::new(db)
        .create(project.id, name)
        .await
        .unwrap()
        .id
}

fn new_step(title: &str, order: i32) -> NewStep {
    NewStep {
        title: Some(title.to_string()),
        order: Some(order),
        content: Some(json!([{ "type": "paragraph", "children": [{ "text": title }] }])),
    }
}

async fn step_count(db: &DatabaseConnection, tutorial_id: i32) -> u64 {
    step::Entity::find()
        .filter(step::Column::TutorialId.eq(tutorial_id))
        .count(db)
        .await
        .unwrap()
}

// ============================================================================
// replace_all
// ============================================================================

#[tokio::test]
async fn test_replace_all_returns_inserted_steps_in_input_order() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);

    let inserted = service
        .replace_all(
            tutorial_id,
            vec![new_step("C", 3), new_step("A", 1), new_step("B", 2)],
        )
        .await
        .unwrap();

    let titles: Vec<_> = inserted.iter().map(|s| s.title.clone().unwrap()).collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
    assert!(inserted.iter().all(|s| s.tutorial_id == tutorial_id));
    assert!(inserted.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_replace_all_discards_previous_steps() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);

    let old = service.create(tutorial_id, new_step("Old", 1)).await.unwrap();

    service
        .replace_all(tutorial_id, vec![new_step("New", 1)])
        .await
        .unwrap();

    assert!(matches!(
        service.find(old.id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert_eq!(step_count(&db, tutorial_id).await, 1);
}

#[tokio::test]
async fn test_replace_all_is_idempotent_for_the_same_list() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);
    let steps = vec![new_step("A", 1), new_step("B", 2)];

    service.replace_all(tutorial_id, steps.clone()).await.unwrap();
    service.replace_all(tutorial_id, steps).await.unwrap();

    assert_eq!(step_count(&db, tutorial_id).await, 2);
}

#[tokio::test]
async fn test_replace_all_with_empty_list() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);
    service.create(tutorial_id, new_step("Old", 1)).await.unwrap();

    let inserted = service.replace_all(tutorial_id, Vec::new()).await.unwrap();

    assert!(inserted.is_empty());
    assert_eq!(step_count(&db, tutorial_id).await, 0);
}

#[tokio::test]
async fn test_replace_all_accepts_duplicate_and_missing_fields() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);

    let inserted = service
        .replace_all(
            tutorial_id,
            vec![new_step("Same", 1), new_step("Same", 1), NewStep::default()],
        )
        .await
        .unwrap();

    assert_eq!(inserted.len(), 3);
    assert_ne!(inserted[0].id, inserted[1].id);
    assert_eq!(inserted[2].title, None);
    assert_eq!(inserted[2].order, None);
    assert_eq!(inserted[2].content, None);
}

#[tokio::test]
async fn test_replace_all_validation_failure_keeps_existing_steps() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);
    service.create(tutorial_id, new_step("Keep", 1)).await.unwrap();

    let err = service
        .replace_all(
            tutorial_id,
            vec![new_step("Fine", 1), new_step(&"x".repeat(300), 2)],
        )
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation { field, .. } => assert_eq!(field, "1.title"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(step_count(&db, tutorial_id).await, 1);
}

#[tokio::test]
async fn test_replace_all_on_missing_tutorial() {
    let (db, _temp) = setup_test_db().await;

    let result = StepService::new(&db)
        .replace_all(12, vec![new_step("A", 1)])
        .await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert_eq!(step::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_replace_all_only_touches_target_tutorial() {
    let (db, _temp) = setup_test_db().await;
    let target = tutorial(&db, "Docs", "Target").await;
    let other = tutorial(&db, "Docs", "Other").await;
    let service = StepService::new(&db);
    service.create(other, new_step("Other", 1)).await.unwrap();

    service.replace_all(target, Vec::new()).await.unwrap();

    assert_eq!(step_count(&db, other).await, 1);
}

#[tokio::test]
async fn test_replace_all_rolls_back_when_an_insert_fails() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);
    service
        .replace_all(tutorial_id, vec![new_step("Keep1", 1), new_step("Keep2", 2)])
        .await
        .unwrap();

    db.execute_unprepared(
        "CREATE TRIGGER reject_boom BEFORE INSERT ON step WHEN NEW.title = 'boom' \
         BEGIN SELECT RAISE(ABORT, 'boom'); END",
    )
    .await
    .unwrap();

    let result = service
        .replace_all(
            tutorial_id,
            vec![new_step("New1", 1), new_step("boom", 2), new_step("New3", 3)],
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Database(_))));

    let titles: Vec<_> = service
        .list_for_tutorial(tutorial_id)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.step.title)
        .collect();
    assert_eq!(
        titles,
        vec![Some("Keep1".to_string()), Some("Keep2".to_string())]
    );
}

#[tokio::test]
async fn test_concurrent_replacements_run_one_after_another() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;

    let handles: Vec<_> = (0..8)
        .map(|caller| {
            let db = db.clone();
            tokio::spawn(async move {
                let steps = (1..=5)
                    .map(|i| new_step(&format!("c{caller}-{i}"), i))
                    .collect();
                StepService::new(&db)
                    .replace_all(tutorial_id, steps)
                    .await
                    .map(|inserted| inserted.len())
            })
        })
        .collect();

    for handle in handles {
        let inserted = handle.await.unwrap().expect("replacement should wait, not fail");
        assert_eq!(inserted, 5);
    }

    let steps = StepService::new(&db)
        .list_for_tutorial(tutorial_id)
        .await
        .unwrap();
    assert_eq!(steps.len(), 5);

    let callers: HashSet<String> = steps
        .iter()
        .filter_map(|d| d.step.title.as_deref())
        .filter_map(|title| title.split('-').next())
        .map(str::to_string)
        .collect();
    assert_eq!(callers.len(), 1, "steps from several callers: {callers:?}");
}

// ============================================================================
// Single step operations
// ============================================================================

#[tokio::test]
async fn test_create_matches_null_order_and_content() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);
    let bare = NewStep {
        title: Some("Bare".to_string()),
        ..Default::default()
    };

    let first = service.create(tutorial_id, bare.clone()).await.unwrap();
    let second = service.create(tutorial_id, bare).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(step_count(&db, tutorial_id).await, 1);
}

#[tokio::test]
async fn test_list_for_tutorial_sorts_by_order() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);
    service
        .replace_all(
            tutorial_id,
            vec![
                NewStep {
                    title: Some("None".to_string()),
                    ..Default::default()
                },
                new_step("Two", 2),
                new_step("One", 1),
            ],
        )
        .await
        .unwrap();

    let steps = service.list_for_tutorial(tutorial_id).await.unwrap();

    let titles: Vec<_> = steps.iter().map(|d| d.step.title.clone().unwrap()).collect();
    assert_eq!(titles, vec!["One", "Two", "None"]);
    assert!(steps.iter().all(|d| d.tutorial.id == tutorial_id));
    assert_eq!(steps[0].project.name, "Docs");
}

#[tokio::test]
async fn test_update_skips_blank_fields() {
    let (db, _temp) = setup_test_db().await;
    let tutorial_id = tutorial(&db, "Docs", "Intro").await;
    let service = StepService::new(&db);
    let step = service.create(tutorial_id, new_step("Title", 4)).await.unwrap();

    let updated = service
        .update(
            step.id,
            StepChanges {
                title: Some(String::new()),
                order: None,
                content: Some(json!([])),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, step.title);
    assert_eq!(updated.order, Some(4));
    assert_eq!(updated.content, step.content);

    let updated = service
        .update(
            step.id,
            StepChanges {
                order: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.order, Some(0));
}

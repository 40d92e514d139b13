//! ArticleService tests.

use help_center::modules::knowledge_base::{
    ArticleChanges, ArticleService, NewArticle, ProjectService, ServiceError,
};
use serde_json::json;

use crate::bootstrap::init::setup_test_db;

fn article(title: &str, text: &str) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        content: Some(json!([{ "type": "paragraph", "children": [{ "text": text }] }])),
    }
}

#[tokio::test]
async fn test_create_compares_title_and_content() {
    let (db, _temp) = setup_test_db().await;
    let project = ProjectService::new(&db).create("Docs").await.unwrap();
    let service = ArticleService::new(&db);

    let a = service.create(project.id, article("FAQ", "one")).await.unwrap();
    let b = service.create(project.id, article("FAQ", "one")).await.unwrap();
    let c = service.create(project.id, article("FAQ", "two")).await.unwrap();

    assert_eq!(a.id, b.id);
    assert_ne!(a.id, c.id);
    assert_eq!(service.list_for_project(project.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_rejects_long_title() {
    let (db, _temp) = setup_test_db().await;
    let project = ProjectService::new(&db).create("Docs").await.unwrap();

    let err = ArticleService::new(&db)
        .create(project.id, article(&"t".repeat(256), "body"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation { ref field, .. } if field == "title"));
}

#[tokio::test]
async fn test_update_keeps_blank_fields() {
    let (db, _temp) = setup_test_db().await;
    let project = ProjectService::new(&db).create("Docs").await.unwrap();
    let service = ArticleService::new(&db);
    let created = service.create(project.id, article("FAQ", "one")).await.unwrap();

    let updated = service
        .update(
            created.id,
            ArticleChanges {
                title: Some(String::new()),
                content: Some(json!(null)),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "FAQ");
    assert_eq!(updated.content, created.content);
}

#[tokio::test]
async fn test_get_and_delete() {
    let (db, _temp) = setup_test_db().await;
    let project = ProjectService::new(&db).create("Docs").await.unwrap();
    let service = ArticleService::new(&db);
    let created = service.create(project.id, article("FAQ", "one")).await.unwrap();

    let detail = service.get(created.id).await.unwrap();
    assert_eq!(detail.article, created);
    assert_eq!(detail.project, project);

    service.delete(created.id).await.unwrap();
    assert!(matches!(
        service.get(created.id).await,
        Err(ServiceError::NotFound(_))
    ));
}

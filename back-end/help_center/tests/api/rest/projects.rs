//! Project endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

use super::helpers::{
    create_article, create_project, create_step, create_tutorial, delete_request, get_request,
    patch_request, post_request, put_request,
};
use crate::bootstrap::init::setup_test_server;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_project_returns_bare_record() {
    let server = setup_test_server().await;

    let (status, body) =
        post_request(&server.router, "/api/projects", json!({ "name": "Docs" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Docs");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(body.get("tutorials").is_none());
    assert!(body.get("articles").is_none());
}

#[tokio::test]
async fn test_create_project_is_first_or_create_by_name() {
    let server = setup_test_server().await;

    let first = create_project(&server.router, "Docs").await;
    let second = create_project(&server.router, "Docs").await;
    let other = create_project(&server.router, "Guides").await;

    assert_eq!(first, second);
    assert_ne!(first, other);

    let (_, list) = get_request(&server.router, "/api/projects").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_project_requires_name() {
    let server = setup_test_server().await;

    for body in [json!({}), json!({ "name": "" }), json!({ "name": null })] {
        let (status, response) = post_request(&server.router, "/api/projects", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["message"], "The name field is required.");
        assert_eq!(response["errors"]["name"][0], "The name field is required.");
    }
}

#[tokio::test]
async fn test_create_project_rejects_long_name() {
    let server = setup_test_server().await;

    let (status, response) = post_request(
        &server.router,
        "/api/projects",
        json!({ "name": "x".repeat(256) }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["errors"]["name"].is_array());

    let (status, _) = post_request(
        &server.router,
        "/api/projects",
        json!({ "name": "x".repeat(255) }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_list_projects_embeds_tutorials_steps_and_articles() {
    let server = setup_test_server().await;
    let project_id = create_project(&server.router, "Docs").await;
    let tutorial_id = create_tutorial(&server.router, project_id, "Getting started").await;
    create_step(&server.router, tutorial_id, "Second", 2).await;
    create_step(&server.router, tutorial_id, "First", 1).await;
    create_article(&server.router, project_id, "FAQ").await;
    create_project(&server.router, "Empty").await;

    let (status, body) = get_request(&server.router, "/api/projects").await;

    assert_eq!(status, StatusCode::OK);
    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 2);

    let docs = &projects[0];
    assert_eq!(docs["name"], "Docs");
    assert_eq!(docs["tutorials"][0]["name"], "Getting started");
    assert_eq!(docs["tutorials"][0]["steps"][0]["title"], "First");
    assert_eq!(docs["tutorials"][0]["steps"][1]["title"], "Second");
    assert_eq!(docs["articles"][0]["title"], "FAQ");

    let empty = &projects[1];
    assert_eq!(empty["tutorials"], json!([]));
    assert_eq!(empty["articles"], json!([]));
}

#[tokio::test]
async fn test_get_project_embeds_relations() {
    let server = setup_test_server().await;
    let project_id = create_project(&server.router, "Docs").await;
    create_tutorial(&server.router, project_id, "Intro").await;

    let (status, body) = get_request(&server.router, &format!("/api/projects/{project_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], project_id);
    assert_eq!(body["tutorials"][0]["steps"], json!([]));
    assert_eq!(body["articles"], json!([]));
}

#[tokio::test]
async fn test_get_missing_project_returns_404() {
    let server = setup_test_server().await;

    let (status, body) = get_request(&server.router, "/api/projects/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project 999 not found");
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_project_name() {
    let server = setup_test_server().await;
    let project_id = create_project(&server.router, "Docs").await;

    let (status, body) = put_request(
        &server.router,
        &format!("/api/projects/{project_id}"),
        json!({ "name": "Handbook" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], project_id);
    assert_eq!(body["name"], "Handbook");

    let (status, body) = patch_request(
        &server.router,
        &format!("/api/projects/{project_id}"),
        json!({ "name": "Manual" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Manual");
}

#[tokio::test]
async fn test_update_project_accepts_empty_name() {
    let server = setup_test_server().await;
    let project_id = create_project(&server.router, "Docs").await;

    let (status, body) = put_request(
        &server.router,
        &format!("/api/projects/{project_id}"),
        json!({ "name": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "");

    let (_, body) = get_request(&server.router, &format!("/api/projects/{project_id}")).await;
    assert_eq!(body["name"], "");
}

#[tokio::test]
async fn test_update_project_without_name_is_rejected() {
    let server = setup_test_server().await;
    let project_id = create_project(&server.router, "Docs").await;

    let (status, body) =
        put_request(&server.router, &format!("/api/projects/{project_id}"), json!({})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["name"].is_array());

    let (_, body) = get_request(&server.router, &format!("/api/projects/{project_id}")).await;
    assert_eq!(body["name"], "Docs");
}

#[tokio::test]
async fn test_update_missing_project_returns_404() {
    let server = setup_test_server().await;

    let (status, _) =
        put_request(&server.router, "/api/projects/42", json!({ "name": "Nope" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_project_then_get_returns_404() {
    let server = setup_test_server().await;
    let project_id = create_project(&server.router, "Docs").await;
    let uri = format!("/api/projects/{project_id}");

    let (status, body) = delete_request(&server.router, &uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = get_request(&server.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_request(&server.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_cascades_to_children() {
    let server = setup_test_server().await;
    let project_id = create_project(&server.router, "Docs").await;
    let tutorial_id = create_tutorial(&server.router, project_id, "Intro").await;
    let step_id = create_step(&server.router, tutorial_id, "One", 1).await;
    let article_id = create_article(&server.router, project_id, "FAQ").await;

    let (status, _) = delete_request(&server.router, &format!("/api/projects/{project_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for uri in [
        format!("/api/tutorials/{tutorial_id}"),
        format!("/api/steps/{step_id}"),
        format!("/api/articles/{article_id}"),
    ] {
        let (status, _) = get_request(&server.router, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri} survived project deletion");
    }
}

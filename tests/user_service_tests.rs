/// User service behavior tests
///
/// Covers uniqueness rules, the get/find contract split, partial updates,
/// and the delete cascade.

mod common;

use common::TestContext;
use taskdeck::dto::user::{CreateUser, UpdateUser};
use taskdeck::error::ServiceError;
use uuid::Uuid;

#[tokio::test]
async fn test_create_then_get_returns_input_fields() {
    let ctx = TestContext::new();

    let created = ctx
        .users
        .create(CreateUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "opaque-credential".to_string(),
        })
        .await
        .unwrap();
    assert!(!created.id.is_nil());

    let fetched = ctx.users.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.email, "a@x.com");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_username_rejected_and_nothing_persisted() {
    let ctx = TestContext::new();
    ctx.user("alice", "a@x.com").await;

    let err = ctx
        .users
        .create(CreateUser {
            username: "alice".to_string(),
            email: "other@x.com".to_string(),
            password: "opaque-credential".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert_eq!(ctx.users.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_rejected_case_insensitively() {
    let ctx = TestContext::new();
    ctx.user("alice", "a@x.com").await;

    let err = ctx
        .users
        .create(CreateUser {
            username: "bob".to_string(),
            email: "A@X.COM".to_string(),
            password: "opaque-credential".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_get_vs_find_contract_on_miss() {
    let ctx = TestContext::new();
    let missing = Uuid::new_v4();

    let err = ctx.users.get_by_id(missing).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    assert!(ctx.users.find_by_id(missing).await.unwrap().is_none());

    let err = ctx.users.get_by_username("nobody").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    assert!(ctx
        .users
        .find_by_username("nobody")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_username_lookup_is_case_sensitive() {
    let ctx = TestContext::new();
    ctx.user("alice", "a@x.com").await;

    assert!(ctx.users.find_by_username("alice").await.unwrap().is_some());
    assert!(ctx.users.find_by_username("Alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_to_own_email_is_not_a_conflict() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;

    // Same address in a different case: no uniqueness re-check, it just
    // overwrites the casing.
    let updated = ctx
        .users
        .update(
            alice.id,
            UpdateUser {
                email: Some("A@x.com".to_string()),
                password: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "A@x.com");
}

#[tokio::test]
async fn test_update_to_taken_email_rejected() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    ctx.user("bob", "b@x.com").await;

    let err = ctx
        .users
        .update(
            alice.id,
            UpdateUser {
                email: Some("b@x.com".to_string()),
                password: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;

    let updated = ctx
        .users
        .update(
            alice.id,
            UpdateUser {
                email: None,
                password: Some("another-credential".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "a@x.com");
    assert_eq!(updated.username, "alice");
}

#[tokio::test]
async fn test_delete_cascades_to_projects_and_tasks() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let project = ctx.project(alice.id, "Launch").await;
    ctx.task_with(alice.id, "Write spec", Some(project.id), None)
        .await;

    ctx.users.delete(alice.id).await.unwrap();

    assert!(ctx
        .projects
        .find_by_owner_id(alice.id)
        .await
        .unwrap()
        .is_empty());
    assert!(ctx.tasks.find_all(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let ctx = TestContext::new();

    let err = ctx.users.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_nil_id_is_invalid_argument() {
    let ctx = TestContext::new();

    let err = ctx.users.get_by_id(Uuid::nil()).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_field_validation_runs_before_uniqueness() {
    let ctx = TestContext::new();

    let err = ctx
        .users
        .create(CreateUser {
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(ctx.users.find_all().await.unwrap().is_empty());
}

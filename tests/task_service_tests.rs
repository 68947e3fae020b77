/// Task service behavior tests
///
/// Covers ownership scoping on every operation, project-assignment
/// invariants, overdue queries, partial updates, and the end-to-end
/// alice/Launch scenario.

mod common;

use chrono::{Duration, Utc};
use common::TestContext;
use taskdeck::dto::task::{CreateTask, UpdateTask};
use taskdeck::error::ServiceError;
use taskdeck::models::TaskStatus;
use uuid::Uuid;

const OWNERSHIP_MISMATCH: &str = "task does not belong to authenticated user";

#[tokio::test]
async fn test_create_defaults_to_todo_and_round_trips_fields() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let due = Utc::now() + Duration::days(3);

    let created = ctx
        .tasks
        .create(
            CreateTask {
                title: "Write spec".to_string(),
                description: Some("First draft".to_string()),
                status: None,
                due_date: Some(due),
                project_id: None,
            },
            alice.id,
        )
        .await
        .unwrap();
    assert!(!created.id.is_nil());
    assert_eq!(created.status, TaskStatus::Todo);
    assert_eq!(created.owner_id, alice.id);

    let fetched = ctx.tasks.get_by_id(created.id, alice.id).await.unwrap();
    assert_eq!(fetched.title, "Write spec");
    assert_eq!(fetched.description.as_deref(), Some("First draft"));
    assert_eq!(fetched.due_date, Some(due));
}

#[tokio::test]
async fn test_create_requires_existing_owner() {
    let ctx = TestContext::new();

    let err = ctx
        .tasks
        .create(
            CreateTask {
                title: "Orphan".to_string(),
                description: None,
                status: None,
                due_date: None,
                project_id: None,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_create_into_foreign_project_rejected_and_nothing_persisted() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let bob = ctx.user("bob", "b@x.com").await;
    let bobs_project = ctx.project(bob.id, "Secret").await;

    let err = ctx
        .tasks
        .create(
            CreateTask {
                title: "Sneaky".to_string(),
                description: None,
                status: None,
                due_date: None,
                project_id: Some(bobs_project.id),
            },
            alice.id,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert!(ctx.tasks.find_all(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reads_enforce_ownership() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let bob = ctx.user("bob", "b@x.com").await;
    let task = ctx.task(alice.id, "Private").await;

    // Absence is NotFound.
    let err = ctx
        .tasks
        .get_by_id(Uuid::new_v4(), alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // Someone else's task is a Validation error with the exact message.
    let err = ctx.tasks.get_by_id(task.id, bob.id).await.unwrap_err();
    match err {
        ServiceError::Validation(msg) => assert_eq!(msg, OWNERSHIP_MISMATCH),
        other => panic!("expected Validation, got {:?}", other),
    }

    // find_by_id: miss is None, mismatch is still an error.
    assert!(ctx
        .tasks
        .find_by_id(Uuid::new_v4(), alice.id)
        .await
        .unwrap()
        .is_none());
    assert!(ctx.tasks.find_by_id(task.id, bob.id).await.is_err());
}

#[tokio::test]
async fn test_find_all_is_scoped_to_owner() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let bob = ctx.user("bob", "b@x.com").await;

    ctx.task(alice.id, "A1").await;
    ctx.task(alice.id, "A2").await;
    ctx.task(bob.id, "B1").await;

    assert_eq!(ctx.tasks.find_all(alice.id).await.unwrap().len(), 2);
    assert_eq!(ctx.tasks.find_all(bob.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_by_status_is_the_intersection() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let bob = ctx.user("bob", "b@x.com").await;

    // 2 owners x 2 statuses.
    ctx.task_with(alice.id, "A-todo", None, Some(TaskStatus::Todo))
        .await;
    ctx.task_with(alice.id, "A-done", None, Some(TaskStatus::Completed))
        .await;
    ctx.task_with(bob.id, "B-todo", None, Some(TaskStatus::Todo))
        .await;
    ctx.task_with(bob.id, "B-done", None, Some(TaskStatus::Completed))
        .await;

    let result = ctx
        .tasks
        .find_by_status(alice.id, TaskStatus::Todo)
        .await
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, "A-todo");
}

#[tokio::test]
async fn test_project_listings_validate_project_ownership_first() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let bob = ctx.user("bob", "b@x.com").await;
    let bobs_project = ctx.project(bob.id, "Secret").await;

    let err = ctx
        .tasks
        .find_by_project_id(bobs_project.id, alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = ctx
        .tasks
        .find_by_project_id_and_status(bobs_project.id, TaskStatus::Todo, alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_find_by_project_id_and_status() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let project = ctx.project(alice.id, "Launch").await;

    ctx.task_with(alice.id, "P-todo", Some(project.id), Some(TaskStatus::Todo))
        .await;
    ctx.task_with(
        alice.id,
        "P-done",
        Some(project.id),
        Some(TaskStatus::Completed),
    )
    .await;
    ctx.task_with(alice.id, "Loose-todo", None, Some(TaskStatus::Todo))
        .await;

    let all = ctx
        .tasks
        .find_by_project_id(project.id, alice.id)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let todos = ctx
        .tasks
        .find_by_project_id_and_status(project.id, TaskStatus::Todo, alice.id)
        .await
        .unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "P-todo");
}

#[tokio::test]
async fn test_overdue_excludes_terminal_and_future_tasks() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let past = Utc::now() - Duration::hours(1);
    let future = Utc::now() + Duration::days(1);

    let overdue = ctx
        .tasks
        .create(
            CreateTask {
                title: "Overdue".to_string(),
                description: None,
                status: Some(TaskStatus::Todo),
                due_date: Some(past),
                project_id: None,
            },
            alice.id,
        )
        .await
        .unwrap();
    for (title, status, due) in [
        ("Done late", TaskStatus::Completed, Some(past)),
        ("Cancelled late", TaskStatus::Cancelled, Some(past)),
        ("Future", TaskStatus::Todo, Some(future)),
        ("No due date", TaskStatus::Todo, None),
    ] {
        ctx.tasks
            .create(
                CreateTask {
                    title: title.to_string(),
                    description: None,
                    status: Some(status),
                    due_date: due,
                    project_id: None,
                },
                alice.id,
            )
            .await
            .unwrap();
    }

    let result = ctx.tasks.find_overdue(alice.id).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, overdue.id);

    // In-progress past-due tasks count as overdue too.
    ctx.tasks
        .update(
            overdue.id,
            UpdateTask {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
            alice.id,
        )
        .await
        .unwrap();
    assert_eq!(ctx.tasks.find_overdue(alice.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_partial_update_against_fully_populated_task() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let project = ctx.project(alice.id, "Launch").await;
    let due = Utc::now() + Duration::days(3);

    let task = ctx
        .tasks
        .create(
            CreateTask {
                title: "Write spec".to_string(),
                description: Some("First draft".to_string()),
                status: Some(TaskStatus::InProgress),
                due_date: Some(due),
                project_id: Some(project.id),
            },
            alice.id,
        )
        .await
        .unwrap();

    let updated = ctx
        .tasks
        .update(
            task.id,
            UpdateTask {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
            alice.id,
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.title, "Write spec");
    assert_eq!(updated.description.as_deref(), Some("First draft"));
    assert_eq!(updated.due_date, Some(due));
    assert_eq!(updated.project_id, Some(project.id));
}

#[tokio::test]
async fn test_assign_and_remove_project() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let project = ctx.project(alice.id, "Launch").await;
    let task = ctx.task(alice.id, "Write spec").await;

    let assigned = ctx
        .tasks
        .assign_to_project(task.id, project.id, alice.id)
        .await
        .unwrap();
    assert_eq!(assigned.project_id, Some(project.id));

    let removed = ctx
        .tasks
        .remove_from_project(task.id, alice.id)
        .await
        .unwrap();
    assert_eq!(removed.project_id, None);
}

#[tokio::test]
async fn test_delete_enforces_ownership() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice", "a@x.com").await;
    let bob = ctx.user("bob", "b@x.com").await;
    let task = ctx.task(alice.id, "Private").await;

    let err = ctx.tasks.delete(task.id, bob.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    ctx.tasks.delete(task.id, alice.id).await.unwrap();
    assert!(ctx.tasks.find_all(alice.id).await.unwrap().is_empty());
}

/// The end-to-end scenario: alice's project gains a task, and a cross-owner
/// assignment fails without touching the task.
#[tokio::test]
async fn test_alice_launch_scenario() {
    let ctx = TestContext::new();
    let u1 = ctx.user("alice", "a@x.com").await;
    let u2 = ctx.user("u2", "u2@x.com").await;

    let p1 = ctx.project(u1.id, "Launch").await;
    assert_eq!(p1.task_count, 0);

    let t1 = ctx
        .task_with(u1.id, "Write spec", Some(p1.id), None)
        .await;
    assert_eq!(
        ctx.projects.get_by_id(p1.id).await.unwrap().task_count,
        1
    );

    let foreign = ctx.project(u2.id, "Foreign").await;
    let err = ctx
        .tasks
        .assign_to_project(t1.id, foreign.id, u1.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // The failed assignment left the task untouched.
    let unchanged = ctx.tasks.get_by_id(t1.id, u1.id).await.unwrap();
    assert_eq!(unchanged.project_id, Some(p1.id));
}

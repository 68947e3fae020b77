//! # Taskdeck
//!
//! Ownership-scoped CRUD service core for users, projects, and tasks.
//!
//! Every task and project is owned by exactly one user. Task operations are
//! scoped to an acting owner supplied by the (external) authentication
//! layer; the services enforce that scoping on every read and write.
//!
//! ## Module Organization
//!
//! - `models`: persisted entities and status enums
//! - `dto`: wire-level input/response types with field validation
//! - `mappers`: entity <-> DTO conversion and partial-update application
//! - `repo`: repository traits plus Postgres and in-memory backends
//! - `services`: business invariants and per-operation orchestration
//! - `db`: connection pool and migration runner
//! - `error`: repository and service error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskdeck::repo::memory::MemoryStore;
//! use taskdeck::services::user::UserService;
//! use taskdeck::dto::user::CreateUser;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let users = UserService::new(store.clone());
//!
//! let alice = users
//!     .create(CreateUser {
//!         username: "alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!         password: "correct-horse-battery".to_string(),
//!     })
//!     .await?;
//! println!("created user {}", alice.id);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod dto;
pub mod error;
pub mod mappers;
pub mod models;
pub mod repo;
pub mod services;

/// Current version of the taskdeck library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

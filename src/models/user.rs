/// User model
///
/// Users own projects and tasks. Username is immutable after creation and
/// globally unique; email must stay unique case-insensitively across
/// updates. Deleting a user cascades to everything they own.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(50) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     password VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// CREATE UNIQUE INDEX users_username_key ON users (username);
/// CREATE UNIQUE INDEX users_email_lower_key ON users (lower(email));
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account owning projects and tasks
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Login name; unique, immutable after creation
    pub username: String,

    /// Email address; unique case-insensitively
    pub email: String,

    /// Opaque credential supplied by the authentication layer
    ///
    /// This core stores it verbatim; hashing happens outside.
    pub password: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Insert record for a new user
///
/// Built by `mappers::user::new_user` after the service has validated
/// username/email uniqueness.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User input and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Input for creating a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    /// Login name; unique and immutable after creation
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,

    /// Email address; unique case-insensitively
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    /// Opaque credential (hashing happens outside this core)
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
}

/// Input for updating an existing user
///
/// Username is immutable, so it is not representable here. `None` fields
/// are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    /// New email address; re-checked for uniqueness if it differs
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,

    /// New credential
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: Option<String>,
}

/// User as returned to callers
///
/// The credential is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

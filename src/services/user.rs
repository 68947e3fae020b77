/// User service
///
/// Creation enforces username and email uniqueness; updates keep the
/// username immutable (the update DTO cannot carry one) and re-check email
/// uniqueness only when the address actually changes. Deleting a user
/// cascades to everything they own via the storage layer.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user::{CreateUser, UpdateUser, UserResponse};
use crate::error::{ServiceError, ServiceResult};
use crate::mappers;
use crate::repo::UserRepository;
use crate::services::require_id;

/// Service for user accounts
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Creates a user
    ///
    /// # Errors
    ///
    /// `Validation` if the username or email is already taken or fails
    /// field validation.
    pub async fn create(&self, input: CreateUser) -> ServiceResult<UserResponse> {
        input.validate()?;

        if self.users.exists_by_username(&input.username).await? {
            return Err(ServiceError::Validation(format!(
                "username '{}' is already taken",
                input.username
            )));
        }
        if self.users.exists_by_email(&input.email).await? {
            return Err(ServiceError::Validation(format!(
                "email '{}' is already registered",
                input.email
            )));
        }

        let user = self.users.insert(mappers::user::new_user(input)).await?;
        info!(user_id = %user.id, username = %user.username, "Created user");

        Ok(mappers::user::to_response(&user))
    }

    /// Fetches a user by id, failing with `NotFound` on miss
    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<UserResponse> {
        require_id(id, "user id")?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;

        Ok(mappers::user::to_response(&user))
    }

    /// Fetches a user by id, returning `None` on miss
    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Option<UserResponse>> {
        require_id(id, "user id")?;

        let user = self.users.find_by_id(id).await?;
        Ok(user.as_ref().map(mappers::user::to_response))
    }

    /// Fetches a user by username (case-sensitive), failing on miss
    pub async fn get_by_username(&self, username: &str) -> ServiceResult<UserResponse> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", username))?;

        Ok(mappers::user::to_response(&user))
    }

    /// Fetches a user by username (case-sensitive), returning `None` on miss
    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<UserResponse>> {
        let user = self.users.find_by_username(username).await?;
        Ok(user.as_ref().map(mappers::user::to_response))
    }

    /// Lists all users
    pub async fn find_all(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.users.find_all().await?;
        Ok(mappers::user::to_responses(&users))
    }

    /// Applies a partial update to a user
    ///
    /// Email uniqueness is re-validated only when the new address differs
    /// case-insensitively from the current one, so updating a user with
    /// their own email is not a conflict.
    pub async fn update(&self, id: Uuid, input: UpdateUser) -> ServiceResult<UserResponse> {
        require_id(id, "user id")?;
        input.validate()?;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;

        if let Some(email) = &input.email {
            let changed = !email.eq_ignore_ascii_case(&user.email);
            if changed && self.users.exists_by_email(email).await? {
                return Err(ServiceError::Validation(format!(
                    "email '{}' is already registered",
                    email
                )));
            }
        }

        mappers::user::apply_update(&mut user, &input);
        let updated = self.users.update(&user).await?;
        info!(user_id = %updated.id, "Updated user");

        Ok(mappers::user::to_response(&updated))
    }

    /// Deletes a user and, through the storage layer, everything they own
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        require_id(id, "user id")?;

        if !self.users.delete(id).await? {
            return Err(ServiceError::not_found("user", id));
        }
        info!(user_id = %id, "Deleted user");

        Ok(())
    }
}

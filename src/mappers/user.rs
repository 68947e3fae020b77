/// User mapping

use crate::dto::user::{CreateUser, UpdateUser, UserResponse};
use crate::models::user::{NewUser, User};

/// Builds the insert record from a create input
pub fn new_user(input: CreateUser) -> NewUser {
    NewUser {
        username: input.username,
        email: input.email,
        password: input.password,
    }
}

/// Flattens a user for the wire; the credential is dropped here
pub fn to_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn to_responses(users: &[User]) -> Vec<UserResponse> {
    users.iter().map(to_response).collect()
}

/// Applies a partial update; `None` fields are left unchanged
///
/// Username is absent from `UpdateUser` by construction, so immutability
/// needs no check here.
pub fn apply_update(user: &mut User, input: &UpdateUser) {
    if let Some(email) = &input.email {
        user.email = email.clone();
    }
    if let Some(password) = &input.password {
        user.password = password.clone();
    }
}

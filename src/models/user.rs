// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'User' table in the database.
/// The password column is never loaded into this struct.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[sqlx(rename_all = "PascalCase")]
pub struct User {
    pub user_id: i64,

    /// Unique username; the key submissions are looked up by.
    pub username: String,

    pub firstname: String,
    pub lastname: String,
}

/// DTO for creating a user or replacing an existing user's details.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertUserRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Username length must be between 1 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(max = 100))]
    pub firstname: String,
    #[validate(length(max = 100))]
    pub lastname: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

impl UpsertUserRequest {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

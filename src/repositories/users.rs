// src/repositories/users.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{UpsertUserRequest, User},
    utils::hash::{hash_password, verify_password},
};

/// Adds a user, or updates the names and password of the user with the same username.
///
/// Returns the UserId in both cases.
pub async fn add_or_update_user(
    pool: &SqlitePool,
    payload: &UpsertUserRequest,
) -> Result<i64, AppError> {
    let payload = payload.trimmed();
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;

    let user_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO User (Username, Firstname, Lastname, Password)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (Username) DO UPDATE SET
            Firstname = excluded.Firstname,
            Lastname = excluded.Lastname,
            Password = excluded.Password
        RETURNING UserId
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.firstname)
    .bind(&payload.lastname)
    .bind(&hashed_password)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert user: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!(user_id, username = %payload.username, "User stored");
    Ok(user_id)
}

/// Creates the user only if the username is not taken yet.
///
/// An existing account is left untouched. Returns the new UserId, or `None`
/// when the user already existed.
pub async fn ensure_user(
    pool: &SqlitePool,
    payload: &UpsertUserRequest,
) -> Result<Option<i64>, AppError> {
    if find_by_username(pool, &payload.username).await?.is_some() {
        return Ok(None);
    }

    add_or_update_user(pool, payload).await.map(Some)
}

/// Checks a user's login credentials.
///
/// Unknown users and wrong passwords both yield `Ok(false)`.
pub async fn verify_login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<bool, AppError> {
    let stored = sqlx::query_scalar::<_, Option<String>>(
        "SELECT Password FROM User WHERE Username = ?1",
    )
    .bind(username.trim())
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    match stored.flatten() {
        Some(hash) => verify_password(password, &hash),
        None => Ok(false),
    }
}

/// Resolves a username into the `User` value submission retrieval works with.
pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT
            UserId,
            Username,
            COALESCE(Firstname, '') AS Firstname,
            COALESCE(Lastname, '') AS Lastname
        FROM User
        WHERE Username = ?1
        "#,
    )
    .bind(username.trim())
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch user: {:?}", e);
        AppError::from(e)
    })?;

    Ok(user)
}

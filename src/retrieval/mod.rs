// src/retrieval/mod.rs

//! Selecting one submission per (user, exercise) and materializing its grades.
//!
//! Each call has three outcomes besides storage failure: `Ok(Some(_))` for a
//! complete submission, `Ok(None)` when nothing was submitted, and
//! `Err(AppError::InconsistentSubmission { .. })` when the selected submission
//! does not carry one grade per question.

pub mod assembler;
pub mod policy;

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        exercise::Exercise,
        submission::{GradeRow, Submission},
        user::User,
    },
    utils::time::from_millis,
};

use self::{
    assembler::assemble,
    policy::{BestSubmission, LatestSubmission, SelectionPolicy},
};

/// Returns the submission chosen by `policy` for this user and exercise.
///
/// `exercise.questions` must be loaded; its length is the expected grade count.
pub async fn get_submission(
    pool: &SqlitePool,
    user: &User,
    exercise: &Exercise,
    policy: &dyn SelectionPolicy,
) -> Result<Option<Submission>, AppError> {
    let question_count = exercise.question_count();
    let limit = i64::try_from(question_count).map_err(|_| {
        AppError::BadRequest(format!("Exercise {} has too many questions", exercise.id))
    })?;

    tracing::debug!(
        policy = policy.name(),
        username = %user.username,
        exercise_id = exercise.id,
        "Selecting submission"
    );

    let rows = sqlx::query_as::<_, GradeRow>(policy.grade_rows_sql())
        .bind(&user.username)
        .bind(exercise.id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch {} submission grades: {:?}", policy.name(), e);
            AppError::from(e)
        })?;

    let Some(assembled) = assemble(rows, question_count)? else {
        return Ok(None);
    };

    Ok(Some(Submission {
        id: assembled.submission_id,
        user: user.clone(),
        exercise: exercise.clone(),
        submission_time: from_millis(assembled.submission_time)?,
        grades: assembled.grades,
    }))
}

/// The user's most recent submission of the exercise.
pub async fn get_last_submission(
    pool: &SqlitePool,
    user: &User,
    exercise: &Exercise,
) -> Result<Option<Submission>, AppError> {
    get_submission(pool, user, exercise, &LatestSubmission).await
}

/// The user's submission of the exercise with the highest total grade.
pub async fn get_best_submission(
    pool: &SqlitePool,
    user: &User,
    exercise: &Exercise,
) -> Result<Option<Submission>, AppError> {
    get_submission(pool, user, exercise, &BestSubmission).await
}

// src/repositories/submissions.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::submission::NewSubmission, utils::time::to_millis};

/// Stores a submission and its per-question grades as one unit.
///
/// The Submission row and every QuestionGrade row are written in a single
/// transaction, so retrieval never observes a half-written submission.
/// Returns the store-assigned SubmissionId.
pub async fn store_submission(
    pool: &SqlitePool,
    submission: &NewSubmission,
) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    let user_id = sqlx::query_scalar::<_, i64>("SELECT UserId FROM User WHERE Username = ?1")
        .bind(submission.username.trim())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}'", submission.username)))?;

    let question_count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(q.QuestionId)
        FROM Exercise e
        LEFT JOIN Question q ON q.ExerciseId = e.ExerciseId
        WHERE e.ExerciseId = ?1
        GROUP BY e.ExerciseId
        "#,
    )
    .bind(submission.exercise_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Exercise {}", submission.exercise_id)))?;

    if usize::try_from(question_count).ok() != Some(submission.grades.len()) {
        return Err(AppError::BadRequest(format!(
            "Exercise {} has {} questions but {} grades were submitted",
            submission.exercise_id,
            question_count,
            submission.grades.len()
        )));
    }

    let submission_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO Submission (UserId, ExerciseId, SubmissionTime)
        VALUES (?1, ?2, ?3)
        RETURNING SubmissionId
        "#,
    )
    .bind(user_id)
    .bind(submission.exercise_id)
    .bind(to_millis(&submission.submission_time))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert submission: {:?}", e);
        AppError::from(e)
    })?;

    for (question_id, grade) in (1_i64..).zip(&submission.grades) {
        sqlx::query("INSERT INTO QuestionGrade (SubmissionId, QuestionId, Grade) VALUES (?1, ?2, ?3)")
            .bind(submission_id)
            .bind(question_id)
            .bind(grade)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert question grade: {:?}", e);
                AppError::from(e)
            })?;
    }

    tx.commit().await?;

    tracing::info!(
        submission_id,
        user_id,
        exercise_id = submission.exercise_id,
        "Submission stored"
    );
    Ok(submission_id)
}

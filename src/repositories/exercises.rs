// src/repositories/exercises.rs

use std::collections::HashMap;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::exercise::{Exercise, ExerciseRow, Question, QuestionRow},
    utils::time::{from_millis, to_millis},
};

/// Stores an exercise and its questions.
///
/// Questions get QuestionId 1..=N in the order they appear in `exercise.questions`.
/// Fails with `AppError::Conflict` if the exercise id is already taken.
pub async fn add_exercise(pool: &SqlitePool, exercise: &Exercise) -> Result<i64, AppError> {
    exercise.validate()?;

    let mut tx = pool.begin().await?;

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT ExerciseId FROM Exercise WHERE ExerciseId = ?1")
            .bind(exercise.id)
            .fetch_optional(&mut *tx)
            .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Exercise {} already exists",
            exercise.id
        )));
    }

    sqlx::query("INSERT INTO Exercise (ExerciseId, Name, DueDate) VALUES (?1, ?2, ?3)")
        .bind(exercise.id)
        .bind(exercise.name.trim())
        .bind(to_millis(&exercise.due_date))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create exercise: {:?}", e);
            AppError::from(e)
        })?;

    for (question_id, question) in (1_i64..).zip(&exercise.questions) {
        sqlx::query(
            r#"
            INSERT INTO Question (ExerciseId, QuestionId, Name, "Desc", Points)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(exercise.id)
        .bind(question_id)
        .bind(question.name.trim())
        .bind(question.desc.trim())
        .bind(question.points)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create question: {:?}", e);
            AppError::from(e)
        })?;
    }

    tx.commit().await?;

    tracing::info!(
        exercise_id = exercise.id,
        questions = exercise.questions.len(),
        "Exercise stored"
    );
    Ok(exercise.id)
}

/// Returns every exercise, sorted by id, with its questions in QuestionId order.
pub async fn load_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>, AppError> {
    let exercise_rows = sqlx::query_as::<_, ExerciseRow>(
        r#"
        SELECT ExerciseId, COALESCE(Name, '') AS Name, COALESCE(DueDate, 0) AS DueDate
        FROM Exercise
        ORDER BY ExerciseId
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list exercises: {:?}", e);
        AppError::from(e)
    })?;

    let question_rows = sqlx::query_as::<_, QuestionRow>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM Question ORDER BY ExerciseId, QuestionId"
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::from(e)
    })?;

    let mut questions_by_exercise: HashMap<i64, Vec<QuestionRow>> = HashMap::new();
    for row in question_rows {
        questions_by_exercise
            .entry(row.exercise_id)
            .or_default()
            .push(row);
    }

    exercise_rows
        .into_iter()
        .map(|row| {
            let questions = questions_by_exercise
                .remove(&row.exercise_id)
                .unwrap_or_default();
            build_exercise(row, questions)
        })
        .collect()
}

/// Loads a single exercise with its questions.
pub async fn find_exercise(
    pool: &SqlitePool,
    exercise_id: i64,
) -> Result<Option<Exercise>, AppError> {
    let row = sqlx::query_as::<_, ExerciseRow>(
        r#"
        SELECT ExerciseId, COALESCE(Name, '') AS Name, COALESCE(DueDate, 0) AS DueDate
        FROM Exercise
        WHERE ExerciseId = ?1
        "#,
    )
    .bind(exercise_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let questions = sqlx::query_as::<_, QuestionRow>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM Question WHERE ExerciseId = ?1 ORDER BY QuestionId"
    ))
    .bind(exercise_id)
    .fetch_all(pool)
    .await?;

    build_exercise(row, questions).map(Some)
}

const QUESTION_COLUMNS: &str = r#"ExerciseId, QuestionId, COALESCE(Name, '') AS Name, COALESCE("Desc", '') AS "Desc", COALESCE(Points, 0) AS Points"#;

fn build_exercise(row: ExerciseRow, questions: Vec<QuestionRow>) -> Result<Exercise, AppError> {
    if let Some(gap) = (1_i64..)
        .zip(&questions)
        .find(|(expected, q)| q.question_id != *expected)
    {
        tracing::warn!(
            exercise_id = row.exercise_id,
            question_id = gap.1.question_id,
            "Question ids are not contiguous"
        );
    }

    Ok(Exercise {
        id: row.exercise_id,
        name: row.name,
        due_date: from_millis(row.due_date)?,
        questions: questions
            .into_iter()
            .map(|q| Question {
                name: q.name,
                desc: q.desc,
                points: q.points,
            })
            .collect(),
    })
}

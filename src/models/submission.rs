// src/models/submission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{exercise::Exercise, user::User};

/// A fully materialized submission: one grade per question of `exercise`,
/// indexed by question position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: i64,
    pub user: User,
    pub exercise: Exercise,
    pub submission_time: DateTime<Utc>,
    pub grades: Vec<f64>,
}

impl Submission {
    /// Sum of all question grades. Derived, never stored.
    pub fn total(&self) -> f64 {
        self.grades.iter().sum()
    }
}

/// DTO for storing a new submission.
/// `grades[i]` is the grade for question `i + 1` of the exercise.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubmission {
    pub username: String,
    pub exercise_id: i64,
    pub submission_time: DateTime<Utc>,
    pub grades: Vec<f64>,
}

/// One row produced by a selection policy.
///
/// `question_id` and `grade` are NULL only when the chosen submission has no
/// grade rows at all.
#[derive(Debug, Clone, PartialEq, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct GradeRow {
    pub submission_id: i64,
    pub question_id: Option<i64>,
    pub grade: Option<f64>,
    pub submission_time: i64,
}

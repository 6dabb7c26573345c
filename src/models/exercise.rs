// src/models/exercise.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An exercise together with its ordered questions.
///
/// Question `i` of `questions` (0-based) is stored with QuestionId `i + 1`, so
/// `questions.len()` is the number of grades every submission must carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Exercise {
    /// Caller-assigned; must be unique.
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub due_date: DateTime<Utc>,
    #[validate(nested)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Question {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub desc: String,
    #[validate(range(min = 0))]
    pub points: i64,
}

impl Exercise {
    pub fn new(id: i64, name: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            due_date,
            questions: Vec::new(),
        }
    }

    pub fn add_question(&mut self, name: impl Into<String>, desc: impl Into<String>, points: i64) {
        self.questions.push(Question {
            name: name.into(),
            desc: desc.into(),
            points,
        });
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Raw 'Exercise' row; `DueDate` is epoch milliseconds.
#[derive(Debug, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub(crate) struct ExerciseRow {
    pub exercise_id: i64,
    pub name: String,
    pub due_date: i64,
}

/// Raw 'Question' row.
#[derive(Debug, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub(crate) struct QuestionRow {
    pub exercise_id: i64,
    pub question_id: i64,
    pub name: String,
    pub desc: String,
    pub points: i64,
}

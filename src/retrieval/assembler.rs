// src/retrieval/assembler.rs

use crate::{error::AppError, models::submission::GradeRow};

/// Identity and dense grade vector of one selected submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledGrades {
    pub submission_id: i64,
    /// Epoch milliseconds, as stored.
    pub submission_time: i64,
    pub grades: Vec<f64>,
}

/// Turns policy rows into a grade vector.
///
/// Rows must already be in ascending QuestionId order; row `i` becomes
/// `grades[i]`. Identity comes from the first row. No rows means no submission.
/// A grade count different from `question_count` is never padded or truncated:
/// it fails with `AppError::InconsistentSubmission`.
pub fn assemble<I>(rows: I, question_count: usize) -> Result<Option<AssembledGrades>, AppError>
where
    I: IntoIterator<Item = GradeRow>,
{
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(None);
    };

    let submission_id = first.submission_id;
    let submission_time = first.submission_time;

    let mut grades = Vec::with_capacity(question_count);
    grades.extend(std::iter::once(first).chain(rows).filter_map(|row| row.grade));

    if grades.len() != question_count {
        tracing::warn!(
            submission_id,
            expected = question_count,
            found = grades.len(),
            "Submission does not cover every question"
        );
        return Err(AppError::InconsistentSubmission {
            submission_id,
            expected: question_count,
            found: grades.len(),
        });
    }

    Ok(Some(AssembledGrades {
        submission_id,
        submission_time,
        grades,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(question_id: i64, grade: f64) -> GradeRow {
        GradeRow {
            submission_id: 7,
            question_id: Some(question_id),
            grade: Some(grade),
            submission_time: 1_000,
        }
    }

    #[test]
    fn empty_rows_mean_no_submission() {
        assert_eq!(assemble(Vec::new(), 3).unwrap(), None);
    }

    #[test]
    fn grades_follow_row_order() {
        let assembled = assemble(vec![row(1, 10.0), row(2, 0.0), row(3, 7.5)], 3)
            .unwrap()
            .unwrap();

        assert_eq!(assembled.submission_id, 7);
        assert_eq!(assembled.submission_time, 1_000);
        assert_eq!(assembled.grades, vec![10.0, 0.0, 7.5]);
    }

    #[test]
    fn missing_grades_are_not_zero_filled() {
        let err = assemble(vec![row(1, 4.0), row(2, 5.0)], 3).unwrap_err();

        assert!(matches!(
            err,
            AppError::InconsistentSubmission {
                submission_id: 7,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn surplus_grades_are_not_truncated() {
        let err = assemble(vec![row(1, 1.0), row(2, 1.0), row(3, 1.0), row(4, 100.0)], 3)
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InconsistentSubmission { expected: 3, found: 4, .. }
        ));
    }

    #[test]
    fn ungraded_submission_is_inconsistent() {
        let rows = vec![GradeRow {
            submission_id: 9,
            question_id: None,
            grade: None,
            submission_time: 5,
        }];

        assert!(matches!(
            assemble(rows, 2),
            Err(AppError::InconsistentSubmission { found: 0, .. })
        ));
    }

    #[test]
    fn ungraded_submission_covers_exercise_without_questions() {
        let rows = vec![GradeRow {
            submission_id: 9,
            question_id: None,
            grade: None,
            submission_time: 5,
        }];

        let assembled = assemble(rows, 0).unwrap().unwrap();
        assert!(assembled.grades.is_empty());
    }
}

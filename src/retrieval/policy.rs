// src/retrieval/policy.rs

/// A rule for choosing one submission out of a user's history for an exercise.
///
/// The statement returned by `grade_rows_sql` binds, in order:
/// 1. the username,
/// 2. the exercise id,
/// 3. the number of questions in the exercise (row limit).
///
/// It yields `SubmissionId, QuestionId, Grade, SubmissionTime` rows for exactly
/// one submission, ordered by QuestionId, or no rows when the user never
/// submitted the exercise.
pub trait SelectionPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn grade_rows_sql(&self) -> &'static str;
}

// Grade rows of the submission picked by a `chosen` CTE.
// LEFT JOIN keeps a row for a chosen submission that has no grades, so it is
// reported as inconsistent instead of missing. One row past the question count
// is fetched so that surplus grade rows reach the assembler and are rejected.
macro_rules! chosen_grade_rows {
    () => {
        r#"
        SELECT s.SubmissionId, g.QuestionId, g.Grade, s.SubmissionTime
        FROM chosen c
        JOIN Submission s ON s.SubmissionId = c.SubmissionId
        LEFT JOIN QuestionGrade g ON g.SubmissionId = s.SubmissionId
        ORDER BY g.QuestionId
        LIMIT ?3 + 1
        "#
    };
}

/// Picks the most recent submission; equal times go to the higher SubmissionId.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestSubmission;

impl SelectionPolicy for LatestSubmission {
    fn name(&self) -> &'static str {
        "latest"
    }

    fn grade_rows_sql(&self) -> &'static str {
        concat!(
            r#"
            WITH chosen AS (
                SELECT s.SubmissionId
                FROM Submission s
                JOIN User u ON u.UserId = s.UserId
                WHERE u.Username = ?1 AND s.ExerciseId = ?2
                ORDER BY s.SubmissionTime DESC, s.SubmissionId DESC
                LIMIT 1
            )
            "#,
            chosen_grade_rows!()
        )
    }
}

/// Picks the submission with the highest total grade.
///
/// Totals are summed per submission first, over the exercise's questions only,
/// then the maximum is taken. Equal totals fall back to the latest-submission order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestSubmission;

impl SelectionPolicy for BestSubmission {
    fn name(&self) -> &'static str {
        "best"
    }

    fn grade_rows_sql(&self) -> &'static str {
        concat!(
            r#"
            WITH totals AS (
                SELECT s.SubmissionId, s.SubmissionTime, COALESCE(SUM(g.Grade), 0.0) AS Total
                FROM Submission s
                JOIN User u ON u.UserId = s.UserId
                LEFT JOIN QuestionGrade g
                    ON g.SubmissionId = s.SubmissionId AND g.QuestionId BETWEEN 1 AND ?3
                WHERE u.Username = ?1 AND s.ExerciseId = ?2
                GROUP BY s.SubmissionId, s.SubmissionTime
            ),
            chosen AS (
                SELECT SubmissionId
                FROM totals
                ORDER BY Total DESC, SubmissionTime DESC, SubmissionId DESC
                LIMIT 1
            )
            "#,
            chosen_grade_rows!()
        )
    }
}

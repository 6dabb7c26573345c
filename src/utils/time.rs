// src/utils/time.rs

use chrono::{DateTime, Utc};

use crate::error::AppError;

/// `DueDate` and `SubmissionTime` are stored as milliseconds since the Unix epoch.
pub fn to_millis(time: &DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

pub fn from_millis(millis: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        AppError::InternalServerError(format!("timestamp {} is out of range", millis))
    })
}

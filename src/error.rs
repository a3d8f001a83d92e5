use crate::course::CourseId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structurally invalid course data. Detected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("no courses to schedule")]
    NoCourses,

    #[error("course '{0}' has no offerings")]
    EmptyCourse(CourseId),

    #[error("course '{0}' is listed more than once")]
    DuplicateCourse(CourseId),

    #[error("invalid time slot: {0}")]
    InvalidSlot(String),

    #[error("unknown day '{0}'")]
    UnknownDay(String),

    #[error("invalid time '{0}'")]
    InvalidTime(String),

    #[error("time out of range: {0}")]
    TimeOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;

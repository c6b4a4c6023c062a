//! Error types for the homework bot

use std::fmt;

/// Errors that can occur while polling and notifying
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required tokens: {}", .0.join(", "))]
    MissingTokens(Vec<String>),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API request failed: {0}")]
    ApiRequest(String),

    #[error("API responded with status {0}")]
    ApiResponseStatus(u16),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected type in API response: {0}")]
    UnexpectedType(String),

    #[error("Missing key in API response: {0}")]
    MissingKey(String),

    #[error("API response contains an empty homeworks list")]
    EmptyHomeworks,

    #[error("Undocumented homework status: {0}")]
    UndocumentedStatus(String),

    #[error("Notifier error: {0}")]
    Notifier(String),
}

/// Broad classification of a failure, used for logging only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fatal,
    Transport,
    Protocol,
    Shape,
    Semantic,
    Delivery,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Fatal => write!(f, "fatal"),
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Protocol => write!(f, "protocol"),
            FailureKind::Shape => write!(f, "shape"),
            FailureKind::Semantic => write!(f, "semantic"),
            FailureKind::Delivery => write!(f, "delivery"),
        }
    }
}

impl HomeworkBotError {
    pub fn kind(&self) -> FailureKind {
        match self {
            HomeworkBotError::Config(_) | HomeworkBotError::MissingTokens(_) => {
                FailureKind::Fatal
            }
            HomeworkBotError::Http(_) | HomeworkBotError::ApiRequest(_) => FailureKind::Transport,
            HomeworkBotError::ApiResponseStatus(_) => FailureKind::Protocol,
            HomeworkBotError::Json(_)
            | HomeworkBotError::UnexpectedType(_)
            | HomeworkBotError::MissingKey(_)
            | HomeworkBotError::EmptyHomeworks => FailureKind::Shape,
            HomeworkBotError::UndocumentedStatus(_) => FailureKind::Semantic,
            HomeworkBotError::Notifier(_) => FailureKind::Delivery,
        }
    }
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;

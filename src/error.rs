use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("System is closed; no further commands are accepted")]
    SystemClosed,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Wrong category: {0}")]
    WrongCategory(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn wrong_category(message: impl Into<String>) -> Self {
        AppError::WrongCategory(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    /// Errors raised by the command executor itself rather than by a wrapped operation.
    pub fn is_executor_error(&self) -> bool {
        matches!(
            self,
            AppError::SystemClosed | AppError::NothingToUndo | AppError::NothingToRedo
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        log::error!("I/O error: {}", error);
        AppError::Io(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        log::error!("Serialization error: {}", error);
        AppError::Serialization(error)
    }
}

use std::fmt;

pub const INVALID_TITLE_MESSAGE: &str = "Title is required and must be a non-empty string.";
pub const INVALID_STATUS_MESSAGE: &str = "Status must be one of: pending, in-progress, completed.";
pub const TASK_NOT_FOUND_MESSAGE: &str = "Task not found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidTitle,
    InvalidStatus,
    InvalidBody(String),
    NotFound(String),
    StorageIo(String),
    CorruptStore(String),
    InvalidConfig(String),
}

impl AppError {
    pub fn invalid_body<M: Into<String>>(message: M) -> Self {
        Self::InvalidBody(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn task_not_found() -> Self {
        Self::not_found(TASK_NOT_FOUND_MESSAGE)
    }

    pub fn storage_io<M: Into<String>>(message: M) -> Self {
        Self::StorageIo(message.into())
    }

    pub fn corrupt_store<M: Into<String>>(message: M) -> Self {
        Self::CorruptStore(message.into())
    }

    pub fn invalid_config<M: Into<String>>(message: M) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTitle => "invalid_title",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidBody(_) => "invalid_body",
            Self::NotFound(_) => "not_found",
            Self::StorageIo(_) => "storage_io",
            Self::CorruptStore(_) => "corrupt_store",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidTitle => INVALID_TITLE_MESSAGE,
            Self::InvalidStatus => INVALID_STATUS_MESSAGE,
            Self::InvalidBody(message)
            | Self::NotFound(message)
            | Self::StorageIo(message)
            | Self::CorruptStore(message)
            | Self::InvalidConfig(message) => message,
        }
    }

    /// Errors caused by the request itself rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTitle | Self::InvalidStatus | Self::InvalidBody(_) | Self::NotFound(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

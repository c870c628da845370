//! Error handling for the poll store

use serde::{Deserialize, Serialize};

/// Result type alias for the poll store
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the poll store
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required input was missing, blank or out of bounds
    #[error("Invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// No poll exists for the identifier
    #[error("Poll not found: {poll_id}")]
    NotFound { poll_id: String },

    /// A poll with the identifier already exists
    #[error("Poll ID already exists: {poll_id}")]
    DuplicateId { poll_id: String },

    /// The vote option is not one of the poll's options
    #[error("Invalid option: {option}")]
    InvalidOption { option: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Stable error codes reported to callers over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    DuplicateId,
    InvalidOption,
    Internal,
}

impl Error {
    /// Create a new invalid argument error for a missing input
    pub fn invalid_argument(field: impl Into<String>) -> Self {
        Self::invalid_argument_with(field, "required")
    }

    /// Create a new invalid argument error with the rejection reason
    pub fn invalid_argument_with(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found(poll_id: impl Into<String>) -> Self {
        Self::NotFound {
            poll_id: poll_id.into(),
        }
    }

    /// Create a new duplicate id error
    pub fn duplicate_id(poll_id: impl Into<String>) -> Self {
        Self::DuplicateId {
            poll_id: poll_id.into(),
        }
    }

    /// Create a new invalid option error
    pub fn invalid_option(option: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wire code for this error. Undecodable payloads count as bad arguments.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument { .. } | Self::Serialization(_) => ErrorCode::InvalidArgument,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::DuplicateId { .. } => ErrorCode::DuplicateId,
            Self::InvalidOption { .. } => ErrorCode::InvalidOption,
            Self::Internal { .. } => ErrorCode::Internal,
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! invalid_argument {
    ($field:expr) => {
        $crate::Error::invalid_argument($field)
    };
    ($field:expr, $($arg:tt)+) => {
        $crate::Error::invalid_argument_with($field, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::Error::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::internal(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::invalid_argument("question");
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(err.to_string(), "Invalid argument question: required");

        let err = Error::not_found("p1");
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.to_string(), "Poll not found: p1");

        let err = Error::duplicate_id("p1");
        assert!(matches!(err, Error::DuplicateId { .. }));

        let err = Error::invalid_option("green");
        assert_eq!(err.to_string(), "Invalid option: green");
    }

    #[test]
    fn test_error_macros() {
        let err = invalid_argument!("options");
        assert!(matches!(err, Error::InvalidArgument { ref field, .. } if field == "options"));

        let err = invalid_argument!("id", "exceeds {} bytes", 44);
        match err {
            Error::InvalidArgument { field, reason } => {
                assert_eq!(field, "id");
                assert_eq!(reason, "exceeds 44 bytes");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = internal_error!("lock poisoned: {}", "polls");
        assert_eq!(err.to_string(), "Internal error: lock poisoned: polls");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::invalid_argument("id").code(), ErrorCode::InvalidArgument);
        assert_eq!(Error::not_found("x").code(), ErrorCode::NotFound);
        assert_eq!(Error::duplicate_id("x").code(), ErrorCode::DuplicateId);
        assert_eq!(Error::invalid_option("x").code(), ErrorCode::InvalidOption);
        assert_eq!(Error::internal("x").code(), ErrorCode::Internal);

        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(Error::from(decode).code(), ErrorCode::InvalidArgument);
    }
}

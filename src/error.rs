//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excel writer error
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Form input rejected before submission
    #[error("{0}")]
    Validation(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule blocked the operation
    #[error("{0}")]
    Rejected(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a business rule rejection with message
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Whether this error is a user-correctable rejection rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_bare_message() {
        let err = AppError::rejected("Cannot delete an approved bonus");
        assert_eq!(err.to_string(), "Cannot delete an approved bonus");
        assert!(err.is_warning());
    }

    #[test]
    fn test_not_found_is_not_warning() {
        let err = AppError::not_found("Product #7");
        assert_eq!(err.to_string(), "Not found: Product #7");
        assert!(!err.is_warning());
    }
}

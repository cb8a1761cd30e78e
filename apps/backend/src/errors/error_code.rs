//! Error codes for the memflip backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the memflip backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error (username length, negative counters, ...)
    ValidationError,
    /// General bad request error (malformed JSON body, wrong types)
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Game session not found
    SessionNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Username already registered
    UsernameTaken,
    /// Session already carries a completing update
    SessionAlreadyCompleted,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,

    // Database Constraint Violations
    /// Unique constraint violation (SQLSTATE 23505; generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503; generic 409)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514; generic 400)
    CheckViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::SessionAlreadyCompleted => "SESSION_ALREADY_COMPLETED",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::UserNotFound.as_str(), "USER_NOT_FOUND");
        assert_eq!(ErrorCode::SessionNotFound.as_str(), "SESSION_NOT_FOUND");
        assert_eq!(ErrorCode::UsernameTaken.as_str(), "USERNAME_TAKEN");
        assert_eq!(
            ErrorCode::SessionAlreadyCompleted.as_str(),
            "SESSION_ALREADY_COMPLETED"
        );
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ErrorCode::Conflict.to_string(), ErrorCode::Conflict.as_str());
    }
}

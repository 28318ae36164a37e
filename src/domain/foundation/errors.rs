//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// A category name outside one of the fixed category sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl From<UnknownCategory> for DomainError {
    fn from(err: UnknownCategory) -> Self {
        DomainError::new(ErrorCode::InvalidCategory, err.0.clone())
            .with_detail("category", err.0)
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidCategory,

    // Not found errors
    TripNotFound,
    BudgetNotFound,
    PackingListNotFound,
    PackingItemNotFound,
    ExpenseNotFound,
    ActivityNotFound,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Collaborator errors
    UpstreamUnavailable,

    // Integrity errors
    ConsistencyViolation,
    PartialCascadeFailure,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns true for the "referenced record is absent" family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::TripNotFound
                | ErrorCode::BudgetNotFound
                | ErrorCode::PackingListNotFound
                | ErrorCode::PackingItemNotFound
                | ErrorCode::ExpenseNotFound
                | ErrorCode::ActivityNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidCategory => "INVALID_CATEGORY",
            ErrorCode::TripNotFound => "TRIP_NOT_FOUND",
            ErrorCode::BudgetNotFound => "BUDGET_NOT_FOUND",
            ErrorCode::PackingListNotFound => "PACKING_LIST_NOT_FOUND",
            ErrorCode::PackingItemNotFound => "PACKING_ITEM_NOT_FOUND",
            ErrorCode::ExpenseNotFound => "EXPENSE_NOT_FOUND",
            ErrorCode::ActivityNotFound => "ACTIVITY_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorCode::ConsistencyViolation => "CONSISTENCY_VIOLATION",
            ErrorCode::PartialCascadeFailure => "PARTIAL_CASCADE_FAILURE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a not-found error carrying the missing id under `key`.
    pub fn not_found(code: ErrorCode, key: &str, id: impl fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(code, format!("No record for {} {}", key, id)).with_detail(key, id)
    }

    /// Creates a database error from any displayable driver error.
    pub fn database(context: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Parses a detail value, typically an id attached by `not_found`.
    pub fn detail_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.details.get(key).and_then(|value| value.parse().ok())
    }

    /// Returns the `field` detail, if any.
    pub fn field(&self) -> Option<&str> {
        self.details.get("field").map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::validation(err.field().to_string(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("eco_rating", 1, 5, 9);
        assert_eq!(
            format!("{}", err),
            "Field 'eco_rating' must be between 1 and 5, got 9"
        );
    }

    #[test]
    fn validation_error_converts_to_domain_error_with_field() {
        let err: DomainError = ValidationError::invalid_format("start_time", "use HH:mm").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("start_time"));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::TripNotFound, "Trip not found");
        assert_eq!(format!("{}", err), "[TRIP_NOT_FOUND] Trip not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "amount")
            .with_detail("reason", "must be positive");

        assert_eq!(err.details.get("field"), Some(&"amount".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"must be positive".to_string()));
    }

    #[test]
    fn not_found_carries_id_detail() {
        let err = DomainError::not_found(ErrorCode::ExpenseNotFound, "expense_id", "abc");
        assert_eq!(err.details.get("expense_id"), Some(&"abc".to_string()));
        assert!(err.message.contains("abc"));
    }

    #[test]
    fn not_found_family_is_recognised() {
        assert!(ErrorCode::TripNotFound.is_not_found());
        assert!(ErrorCode::PackingItemNotFound.is_not_found());
        assert!(!ErrorCode::Forbidden.is_not_found());
        assert!(!ErrorCode::DatabaseError.is_not_found());
    }
}

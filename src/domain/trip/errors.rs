//! Trip-specific error types.

use crate::domain::foundation::{ActivityId, DomainError, ErrorCode, TripId};

/// Trip lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripError {
    /// Trip was not found.
    NotFound(TripId),
    /// Trip exists but belongs to another user.
    Forbidden,
    /// Referenced activity is absent or belongs to another trip.
    ActivityNotFound(ActivityId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Cascade delete left dependents behind.
    PartialCascadeFailure { trip_id: TripId, remaining: Vec<String> },
    /// Infrastructure error.
    Infrastructure(String),
}

impl TripError {
    pub fn not_found(id: TripId) -> Self {
        TripError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        TripError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TripError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        TripError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            TripError::NotFound(_) => ErrorCode::TripNotFound,
            TripError::Forbidden => ErrorCode::Forbidden,
            TripError::ActivityNotFound(_) => ErrorCode::ActivityNotFound,
            TripError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TripError::PartialCascadeFailure { .. } => ErrorCode::PartialCascadeFailure,
            TripError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            TripError::NotFound(id) => format!("Trip not found: {}", id),
            TripError::Forbidden => "Permission denied".to_string(),
            TripError::ActivityNotFound(id) => format!("Activity not found: {}", id),
            TripError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TripError::PartialCascadeFailure { trip_id, remaining } => format!(
                "Trip {} deleted but dependents remain: {}",
                trip_id,
                remaining.join(", ")
            ),
            TripError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TripError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TripError {}

impl From<DomainError> for TripError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => TripError::Forbidden,
            ErrorCode::ValidationFailed => TripError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::TripNotFound => match err.detail_as("trip_id") {
                Some(id) => TripError::NotFound(id),
                None => TripError::Infrastructure(err.to_string()),
            },
            ErrorCode::ActivityNotFound => match err.detail_as("activity_id") {
                Some(id) => TripError::ActivityNotFound(id),
                None => TripError::Infrastructure(err.to_string()),
            },
            _ => TripError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: TripError = DomainError::validation("title", "Title is required").into();
        assert_eq!(
            err,
            TripError::ValidationFailed {
                field: "title".to_string(),
                message: "Title is required".to_string()
            }
        );
    }

    #[test]
    fn forbidden_domain_error_maps_to_forbidden() {
        let err: TripError = DomainError::new(ErrorCode::Forbidden, "nope").into();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn trip_not_found_with_id_detail_maps_to_not_found() {
        let id = TripId::new();
        let err: TripError = DomainError::new(ErrorCode::TripNotFound, "gone")
            .with_detail("trip_id", id.to_string())
            .into();
        assert_eq!(err, TripError::NotFound(id));
    }

    #[test]
    fn partial_cascade_lists_remaining_dependents() {
        let err = TripError::PartialCascadeFailure {
            trip_id: TripId::new(),
            remaining: vec!["budget".to_string(), "activities".to_string()],
        };
        assert_eq!(err.code(), ErrorCode::PartialCascadeFailure);
        assert!(err.message().contains("budget, activities"));
    }
}

//! Activity-specific error types.

use crate::domain::foundation::{ActivityId, DomainError, ErrorCode, TripId};

/// Activity manager errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    /// Trip was not found.
    TripNotFound(TripId),
    /// Activity is absent or belongs to another trip.
    NotFound(ActivityId),
    /// User is not the trip owner.
    Forbidden,
    /// Category name outside the fixed set.
    InvalidCategory(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Weather collaborator failed.
    UpstreamUnavailable(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ActivityError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ActivityError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn upstream(message: impl Into<String>) -> Self {
        ActivityError::UpstreamUnavailable(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ActivityError::TripNotFound(_) => ErrorCode::TripNotFound,
            ActivityError::NotFound(_) => ErrorCode::ActivityNotFound,
            ActivityError::Forbidden => ErrorCode::Forbidden,
            ActivityError::InvalidCategory(_) => ErrorCode::InvalidCategory,
            ActivityError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ActivityError::UpstreamUnavailable(_) => ErrorCode::UpstreamUnavailable,
            ActivityError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ActivityError::TripNotFound(id) => format!("Trip not found: {}", id),
            ActivityError::NotFound(id) => format!("Activity not found: {}", id),
            ActivityError::Forbidden => "Permission denied".to_string(),
            ActivityError::InvalidCategory(name) => format!("Invalid category: {}", name),
            ActivityError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ActivityError::UpstreamUnavailable(msg) => {
                format!("Weather service unavailable: {}", msg)
            }
            ActivityError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ActivityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ActivityError {}

impl From<DomainError> for ActivityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ActivityError::Forbidden,
            ErrorCode::ValidationFailed => ActivityError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message.clone(),
            },
            ErrorCode::InvalidCategory => ActivityError::InvalidCategory(err.message.clone()),
            ErrorCode::TripNotFound => match err.detail_as("trip_id") {
                Some(id) => ActivityError::TripNotFound(id),
                None => ActivityError::Infrastructure(err.to_string()),
            },
            ErrorCode::ActivityNotFound => match err.detail_as("activity_id") {
                Some(id) => ActivityError::NotFound(id),
                None => ActivityError::Infrastructure(err.to_string()),
            },
            _ => ActivityError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_not_found_keeps_id() {
        let id = ActivityId::new();
        let err: ActivityError =
            DomainError::not_found(ErrorCode::ActivityNotFound, "activity_id", id).into();
        assert_eq!(err, ActivityError::NotFound(id));
    }

    #[test]
    fn deleted_trip_surfaces_as_trip_not_found() {
        let id = TripId::new();
        let err: ActivityError =
            DomainError::not_found(ErrorCode::TripNotFound, "trip_id", id).into();
        assert_eq!(err.code(), ErrorCode::TripNotFound);
    }
}

//! Packing-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, PackingItemId, TripId};

/// Packing tracker errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackingError {
    /// Trip was not found.
    TripNotFound(TripId),
    /// Trip exists but has no packing list.
    NotFound(TripId),
    /// Item id is absent from the named category.
    ItemNotFound(PackingItemId),
    /// User is not the trip owner.
    Forbidden,
    /// Category name outside the fixed set.
    InvalidCategory(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl PackingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PackingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn invalid_category(name: impl Into<String>) -> Self {
        PackingError::InvalidCategory(name.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            PackingError::TripNotFound(_) => ErrorCode::TripNotFound,
            PackingError::NotFound(_) => ErrorCode::PackingListNotFound,
            PackingError::ItemNotFound(_) => ErrorCode::PackingItemNotFound,
            PackingError::Forbidden => ErrorCode::Forbidden,
            PackingError::InvalidCategory(_) => ErrorCode::InvalidCategory,
            PackingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PackingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            PackingError::TripNotFound(id) => format!("Trip not found: {}", id),
            PackingError::NotFound(id) => format!("Packing list not found for trip {}", id),
            PackingError::ItemNotFound(id) => format!("Packing item not found: {}", id),
            PackingError::Forbidden => "Permission denied".to_string(),
            PackingError::InvalidCategory(name) => format!("Invalid category: {}", name),
            PackingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PackingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PackingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PackingError {}

impl From<DomainError> for PackingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => PackingError::Forbidden,
            ErrorCode::ValidationFailed => PackingError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message.clone(),
            },
            ErrorCode::InvalidCategory => PackingError::InvalidCategory(err.message.clone()),
            ErrorCode::TripNotFound => match err.detail_as("trip_id") {
                Some(id) => PackingError::TripNotFound(id),
                None => PackingError::Infrastructure(err.to_string()),
            },
            ErrorCode::PackingListNotFound => match err.detail_as("trip_id") {
                Some(id) => PackingError::NotFound(id),
                None => PackingError::Infrastructure(err.to_string()),
            },
            ErrorCode::PackingItemNotFound => match err.detail_as("item_id") {
                Some(id) => PackingError::ItemNotFound(id),
                None => PackingError::Infrastructure(err.to_string()),
            },
            _ => PackingError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_not_found_keeps_id() {
        let id = PackingItemId::new();
        let err: PackingError =
            DomainError::not_found(ErrorCode::PackingItemNotFound, "item_id", id).into();
        assert_eq!(err, PackingError::ItemNotFound(id));
    }

    #[test]
    fn invalid_category_domain_error_maps_through() {
        let err: PackingError =
            DomainError::from(crate::domain::foundation::UnknownCategory("snacks".into())).into();
        assert_eq!(err, PackingError::InvalidCategory("snacks".to_string()));
    }
}

//! Budget-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ExpenseId, TripId};

/// Budget ledger errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    /// Trip was not found.
    TripNotFound(TripId),
    /// Trip exists but has no budget record.
    NotFound(TripId),
    /// Expense id is absent from the named category.
    ExpenseNotFound(ExpenseId),
    /// User is not the trip owner.
    Forbidden,
    /// Category name outside the fixed set.
    InvalidCategory(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Exchange-rate collaborator failed.
    UpstreamUnavailable(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl BudgetError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BudgetError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn invalid_category(name: impl Into<String>) -> Self {
        BudgetError::InvalidCategory(name.into())
    }
    pub fn upstream(message: impl Into<String>) -> Self {
        BudgetError::UpstreamUnavailable(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            BudgetError::TripNotFound(_) => ErrorCode::TripNotFound,
            BudgetError::NotFound(_) => ErrorCode::BudgetNotFound,
            BudgetError::ExpenseNotFound(_) => ErrorCode::ExpenseNotFound,
            BudgetError::Forbidden => ErrorCode::Forbidden,
            BudgetError::InvalidCategory(_) => ErrorCode::InvalidCategory,
            BudgetError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BudgetError::UpstreamUnavailable(_) => ErrorCode::UpstreamUnavailable,
            BudgetError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            BudgetError::TripNotFound(id) => format!("Trip not found: {}", id),
            BudgetError::NotFound(id) => format!("Budget not found for trip {}", id),
            BudgetError::ExpenseNotFound(id) => format!("Expense not found: {}", id),
            BudgetError::Forbidden => "Permission denied".to_string(),
            BudgetError::InvalidCategory(name) => format!("Invalid category: {}", name),
            BudgetError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BudgetError::UpstreamUnavailable(msg) => {
                format!("Exchange rate service unavailable: {}", msg)
            }
            BudgetError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BudgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BudgetError {}

impl From<DomainError> for BudgetError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => BudgetError::Forbidden,
            ErrorCode::ValidationFailed => BudgetError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message.clone(),
            },
            ErrorCode::InvalidCategory => BudgetError::InvalidCategory(err.message.clone()),
            ErrorCode::TripNotFound => match err.detail_as("trip_id") {
                Some(id) => BudgetError::TripNotFound(id),
                None => BudgetError::Infrastructure(err.to_string()),
            },
            ErrorCode::BudgetNotFound => match err.detail_as("trip_id") {
                Some(id) => BudgetError::NotFound(id),
                None => BudgetError::Infrastructure(err.to_string()),
            },
            ErrorCode::ExpenseNotFound => match err.detail_as("expense_id") {
                Some(id) => BudgetError::ExpenseNotFound(id),
                None => BudgetError::Infrastructure(err.to_string()),
            },
            _ => BudgetError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_not_found_domain_error_keeps_id() {
        let id = ExpenseId::new();
        let err: BudgetError =
            DomainError::not_found(ErrorCode::ExpenseNotFound, "expense_id", id).into();
        assert_eq!(err, BudgetError::ExpenseNotFound(id));
    }

    #[test]
    fn budget_not_found_is_keyed_by_trip() {
        let trip_id = TripId::new();
        let err: BudgetError =
            DomainError::not_found(ErrorCode::BudgetNotFound, "trip_id", trip_id).into();
        assert_eq!(err.code(), ErrorCode::BudgetNotFound);
    }

    #[test]
    fn upstream_failure_has_its_own_code() {
        assert_eq!(
            BudgetError::upstream("timeout").code(),
            ErrorCode::UpstreamUnavailable
        );
    }
}

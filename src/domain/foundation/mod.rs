//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types and the error
//! vocabulary shared by the trip, budget, packing and activity modules.

mod auth;
mod errors;
mod ids;
mod money;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, UnknownCategory, ValidationError};
pub use ids::{ActivityId, BudgetId, ExpenseId, PackingItemId, PackingListId, TripId, UserId};
pub use money::{percentage_of, saturating_sum, CurrencyCode, MAX_AMOUNT};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;

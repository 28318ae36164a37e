//! Budget ledger domain module.
//!
//! Each trip has exactly one budget with six fixed categories. A category's
//! `spent` is a running total kept equal to the sum of its expense items;
//! every append, amendment and removal adjusts it in the same step.

mod aggregate;
mod category;
mod errors;
mod expense;
mod summary;

pub use aggregate::{
    ensure_non_negative, Budget, BudgetSettings, CategoryLedger, ExchangeRateSnapshot,
};
pub use category::BudgetCategory;
pub use errors::BudgetError;
pub use expense::{ExpenseItem, ExpenseUpdate, NewExpense, PaymentMethod};
pub use summary::{detect_anomalies, BudgetSummary, CategorySummary, ConsistencyAnomaly};

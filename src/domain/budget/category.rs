//! The six fixed budget categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::UnknownCategory;

/// Fixed money bucket of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Accommodation,
    Transportation,
    Food,
    Activities,
    Shopping,
    Miscellaneous,
}

impl BudgetCategory {
    /// All categories in canonical order.
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Accommodation,
        BudgetCategory::Transportation,
        BudgetCategory::Food,
        BudgetCategory::Activities,
        BudgetCategory::Shopping,
        BudgetCategory::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Accommodation => "accommodation",
            BudgetCategory::Transportation => "transportation",
            BudgetCategory::Food => "food",
            BudgetCategory::Activities => "activities",
            BudgetCategory::Shopping => "shopping",
            BudgetCategory::Miscellaneous => "miscellaneous",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

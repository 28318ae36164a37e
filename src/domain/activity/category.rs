//! Activity categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::UnknownCategory;

/// Kind of activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Sightseeing,
    Adventure,
    Cultural,
    Food,
    Shopping,
    Relaxation,
    Transportation,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 7] = [
        ActivityCategory::Sightseeing,
        ActivityCategory::Adventure,
        ActivityCategory::Cultural,
        ActivityCategory::Food,
        ActivityCategory::Shopping,
        ActivityCategory::Relaxation,
        ActivityCategory::Transportation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Sightseeing => "sightseeing",
            ActivityCategory::Adventure => "adventure",
            ActivityCategory::Cultural => "cultural",
            ActivityCategory::Food => "food",
            ActivityCategory::Shopping => "shopping",
            ActivityCategory::Relaxation => "relaxation",
            ActivityCategory::Transportation => "transportation",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_all_names() {
        for category in ActivityCategory::ALL {
            assert_eq!(category.as_str().parse::<ActivityCategory>().unwrap(), category);
        }
        assert!("nightlife".parse::<ActivityCategory>().is_err());
    }
}

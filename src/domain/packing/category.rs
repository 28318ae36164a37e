//! Packing categories and weather tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{UnknownCategory, ValidationError};

/// Fixed category of a packing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingCategory {
    Clothing,
    Toiletries,
    Electronics,
    Documents,
    Medications,
    Miscellaneous,
}

impl PackingCategory {
    /// All categories in canonical order.
    pub const ALL: [PackingCategory; 6] = [
        PackingCategory::Clothing,
        PackingCategory::Toiletries,
        PackingCategory::Electronics,
        PackingCategory::Documents,
        PackingCategory::Medications,
        PackingCategory::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackingCategory::Clothing => "clothing",
            PackingCategory::Toiletries => "toiletries",
            PackingCategory::Electronics => "electronics",
            PackingCategory::Documents => "documents",
            PackingCategory::Medications => "medications",
            PackingCategory::Miscellaneous => "miscellaneous",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            PackingCategory::Clothing => 0,
            PackingCategory::Toiletries => 1,
            PackingCategory::Electronics => 2,
            PackingCategory::Documents => 3,
            PackingCategory::Medications => 4,
            PackingCategory::Miscellaneous => 5,
        }
    }
}

impl fmt::Display for PackingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackingCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackingCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Weather condition a packing list should account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Hot,
    Cold,
    Rainy,
    Sunny,
    Windy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 5] = [
        WeatherCondition::Hot,
        WeatherCondition::Cold,
        WeatherCondition::Rainy,
        WeatherCondition::Sunny,
        WeatherCondition::Windy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Hot => "hot",
            WeatherCondition::Cold => "cold",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Windy => "windy",
        }
    }
}

impl FromStr for WeatherCondition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherCondition::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("weather", format!("unknown weather tag '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_canonical_order() {
        for (i, category) in PackingCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("snacks".parse::<PackingCategory>().is_err());
        assert_eq!(
            "documents".parse::<PackingCategory>().unwrap(),
            PackingCategory::Documents
        );
    }

    #[test]
    fn weather_tags_parse() {
        assert_eq!("rainy".parse::<WeatherCondition>().unwrap(), WeatherCondition::Rainy);
        assert!("foggy".parse::<WeatherCondition>().is_err());
    }
}

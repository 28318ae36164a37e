//! HTTP DTOs for packing endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::packing::{
    CategoryProgress, CategorySuggestions, PackingItem, PackingList, PackingProgress,
    PackingSection,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST`/`PUT /packing/{tripId}`. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackingListRequest {
    #[serde(default)]
    pub weather_considerations: Option<Vec<String>>,
    #[serde(default)]
    pub special_requirements: Option<Vec<String>>,
}

fn default_quantity() -> u32 {
    1
}

/// Body of `POST /packing/{tripId}/items`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    pub category: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Body of `PUT /packing/{tripId}/items/{itemId}`. No `isPacked` toggles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPackedRequest {
    pub category: String,
    #[serde(default)]
    pub is_packed: Option<bool>,
}

/// Query of `DELETE /packing/{tripId}/items/{itemId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCategoryQuery {
    pub category: String,
}

/// Body of `POST /packing/{tripId}/suggestions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    /// Trip length in days; the trip's own length when absent.
    #[serde(default, alias = "duration")]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub weather: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingItemResponse {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub is_packed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub priority: String,
}

impl From<&PackingItem> for PackingItemResponse {
    fn from(item: &PackingItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            is_packed: item.is_packed,
            notes: item.notes.clone(),
            priority: item.priority.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingSectionResponse {
    pub name: String,
    pub items: Vec<PackingItemResponse>,
}

impl From<&PackingSection> for PackingSectionResponse {
    fn from(section: &PackingSection) -> Self {
        Self {
            name: section.name.as_str().to_string(),
            items: section.items.iter().map(PackingItemResponse::from).collect(),
        }
    }
}

/// Full packing list document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListResponse {
    pub id: String,
    pub trip_id: String,
    pub categories: Vec<PackingSectionResponse>,
    pub weather_considerations: Vec<String>,
    pub special_requirements: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl From<&PackingList> for PackingListResponse {
    fn from(list: &PackingList) -> Self {
        Self {
            id: list.id().to_string(),
            trip_id: list.trip_id().to_string(),
            categories: list
                .sections()
                .iter()
                .map(PackingSectionResponse::from)
                .collect(),
            weather_considerations: list
                .weather_considerations()
                .iter()
                .map(|w| w.as_str().to_string())
                .collect(),
            special_requirements: list.special_requirements().to_vec(),
            last_updated: *list.last_updated().as_datetime(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgressResponse {
    pub name: String,
    pub total_items: u64,
    pub packed_items: u64,
    pub progress_percentage: Decimal,
}

impl From<&CategoryProgress> for CategoryProgressResponse {
    fn from(progress: &CategoryProgress) -> Self {
        Self {
            name: progress.name.as_str().to_string(),
            total_items: progress.total_items,
            packed_items: progress.packed_items,
            progress_percentage: progress.progress_percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingProgressResponse {
    pub total_items: u64,
    pub packed_items: u64,
    pub progress_percentage: Decimal,
    pub per_category: Vec<CategoryProgressResponse>,
}

impl From<&PackingProgress> for PackingProgressResponse {
    fn from(progress: &PackingProgress) -> Self {
        Self {
            total_items: progress.total_items,
            packed_items: progress.packed_items,
            progress_percentage: progress.progress_percentage,
            per_category: progress
                .per_category
                .iter()
                .map(CategoryProgressResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestedItemResponse {
    pub name: String,
    pub quantity: u32,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySuggestionsResponse {
    pub category: String,
    pub items: Vec<SuggestedItemResponse>,
}

impl From<&CategorySuggestions> for CategorySuggestionsResponse {
    fn from(suggestions: &CategorySuggestions) -> Self {
        Self {
            category: suggestions.category.as_str().to_string(),
            items: suggestions
                .items
                .iter()
                .map(|item| SuggestedItemResponse {
                    name: item.name.to_string(),
                    quantity: item.quantity,
                    priority: item.priority.as_str().to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_item_request_defaults_quantity_to_one() {
        let req: AddItemRequest =
            serde_json::from_str(r#"{"category": "clothing", "name": "Socks"}"#).unwrap();
        assert_eq!(req.quantity, 1);
        assert!(req.priority.is_none());
    }

    #[test]
    fn set_packed_request_without_flag_means_toggle() {
        let req: SetPackedRequest = serde_json::from_str(r#"{"category": "documents"}"#).unwrap();
        assert!(req.is_packed.is_none());

        let req: SetPackedRequest =
            serde_json::from_str(r#"{"category": "documents", "isPacked": true}"#).unwrap();
        assert_eq!(req.is_packed, Some(true));
    }

    #[test]
    fn suggestions_request_accepts_duration_alias() {
        let req: SuggestionsRequest =
            serde_json::from_str(r#"{"duration": 4, "weather": ["cold"]}"#).unwrap();
        assert_eq!(req.duration_days, Some(4));
        assert!(req.activities.is_empty());
    }
}

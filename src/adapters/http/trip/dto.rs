//! HTTP DTOs for trip endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::activity::ActivityResponse;
use crate::adapters::http::budget::BudgetResponse;
use crate::adapters::http::packing::PackingListResponse;
use crate::application::handlers::trip::TripDetails;
use crate::domain::trip::{CascadeReport, Trip};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /trips`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, alias = "destinationTags")]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Body of `PUT /trips/{id}`. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, alias = "destinationTags")]
    pub destinations: Option<Vec<String>>,
}

/// Query of `GET /trips`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTripsParams {
    #[serde(default)]
    pub status: Option<String>,
    /// Keeps trips starting on or after this date.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Keeps trips ending on or before this date.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Body of `POST`/`DELETE /trips/{id}/itinerary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub day: u32,
    pub activity_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub destinations: Vec<String>,
    pub budget_id: String,
    pub packing_list_id: String,
    /// Day number to activity ids in itinerary order.
    pub itinerary: BTreeMap<u32, Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Trip> for TripResponse {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id().to_string(),
            user_id: trip.user_id().to_string(),
            title: trip.title().to_string(),
            description: trip.description().to_string(),
            start_date: trip.start_date(),
            end_date: trip.end_date(),
            status: trip.status().as_str().to_string(),
            is_public: trip.is_public(),
            tags: trip.tags().to_vec(),
            destinations: trip.destinations().to_vec(),
            budget_id: trip.budget_id().to_string(),
            packing_list_id: trip.packing_list_id().to_string(),
            itinerary: trip
                .itinerary()
                .days()
                .iter()
                .map(|(day, ids)| (*day, ids.iter().map(ToString::to_string).collect()))
                .collect(),
            created_at: *trip.created_at().as_datetime(),
            updated_at: *trip.updated_at().as_datetime(),
        }
    }
}

/// A trip with its budget, packing list and activities.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetailsResponse {
    #[serde(flatten)]
    pub trip: TripResponse,
    pub budget: BudgetResponse,
    pub packing_list: PackingListResponse,
    pub activities: Vec<ActivityResponse>,
}

impl From<&TripDetails> for TripDetailsResponse {
    fn from(details: &TripDetails) -> Self {
        Self {
            trip: TripResponse::from(&details.trip),
            budget: BudgetResponse::from(&details.budget),
            packing_list: PackingListResponse::from(&details.packing_list),
            activities: details.activities.iter().map(ActivityResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDeletedResponse {
    pub trip_id: String,
    pub budgets_removed: u64,
    pub packing_lists_removed: u64,
    pub activities_removed: u64,
}

impl TripDeletedResponse {
    pub fn new(trip_id: String, report: CascadeReport) -> Self {
        Self {
            trip_id,
            budgets_removed: report.budgets_removed,
            packing_lists_removed: report.packing_lists_removed,
            activities_removed: report.activities_removed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub changed: bool,
    pub trip: TripResponse,
}

//! HTTP DTOs for activity endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::activity::{
    Activity, ActivityCategory, ActivityError, ActivityFilter, ActivityUpdate, BookingInfo,
    Coordinates, Location, NewActivity, TimeOfDay, DEFAULT_ECO_RATING,
};
use crate::domain::foundation::DomainError;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CoordinatesRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRequest {
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<CoordinatesRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingInfoRequest {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Body of `POST /trips/{id}/activities`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub day: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: LocationRequest,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub cost: Decimal,
    pub category: String,
    #[serde(default)]
    pub eco_rating: Option<u8>,
    #[serde(default)]
    pub booking_required: bool,
    #[serde(default)]
    pub booking_info: Option<BookingInfoRequest>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `PUT /trips/{id}/activities/{activityId}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<LocationRequest>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub eco_rating: Option<u8>,
    #[serde(default)]
    pub booking_required: Option<bool>,
    #[serde(default)]
    pub booking_info: Option<BookingInfoRequest>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query of `GET /trips/{id}/activities`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivitiesParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_eco_rating: Option<u8>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub day: Option<u32>,
}

fn invalid(err: impl Into<DomainError>) -> ActivityError {
    ActivityError::from(err.into())
}

fn parse_category(name: &str) -> Result<ActivityCategory, ActivityError> {
    name.parse::<ActivityCategory>().map_err(invalid)
}

fn parse_time(field: &str, value: &str) -> Result<TimeOfDay, ActivityError> {
    TimeOfDay::parse_field(field, value).map_err(invalid)
}

impl LocationRequest {
    fn into_location(self) -> Result<Location, ActivityError> {
        let coordinates = self
            .coordinates
            .map(|c| Coordinates::new(c.latitude, c.longitude))
            .transpose()
            .map_err(invalid)?;
        Location::new(self.address, coordinates).map_err(invalid)
    }
}

impl From<BookingInfoRequest> for BookingInfo {
    fn from(req: BookingInfoRequest) -> Self {
        Self {
            provider: req.provider,
            url: req.url,
            reference: req.reference,
        }
    }
}

impl CreateActivityRequest {
    /// Parses the loosely typed body into domain input.
    pub fn into_new_activity(self) -> Result<NewActivity, ActivityError> {
        Ok(NewActivity {
            day: self.day,
            name: self.name,
            description: self.description,
            location: self.location.into_location()?,
            start_time: parse_time("start_time", &self.start_time)?,
            end_time: parse_time("end_time", &self.end_time)?,
            cost: self.cost,
            category: parse_category(&self.category)?,
            eco_rating: self.eco_rating.unwrap_or(DEFAULT_ECO_RATING),
            booking_required: self.booking_required,
            booking_info: self.booking_info.map(BookingInfo::from),
            notes: self.notes,
        })
    }
}

impl UpdateActivityRequest {
    pub fn into_update(self) -> Result<ActivityUpdate, ActivityError> {
        Ok(ActivityUpdate {
            day: self.day,
            name: self.name,
            description: self.description,
            location: self.location.map(LocationRequest::into_location).transpose()?,
            start_time: self
                .start_time
                .map(|t| parse_time("start_time", &t))
                .transpose()?,
            end_time: self.end_time.map(|t| parse_time("end_time", &t)).transpose()?,
            cost: self.cost,
            category: self.category.map(|c| parse_category(&c)).transpose()?,
            eco_rating: self.eco_rating,
            booking_required: self.booking_required,
            booking_info: self.booking_info.map(BookingInfo::from),
            notes: self.notes,
        })
    }
}

impl ListActivitiesParams {
    pub fn into_filter(self) -> Result<ActivityFilter, ActivityError> {
        Ok(ActivityFilter {
            category: self.category.map(|c| parse_category(&c)).transpose()?,
            min_eco_rating: self.min_eco_rating,
            starts_at_or_after: self
                .start_time
                .map(|t| parse_time("start_time", &t))
                .transpose()?,
            ends_at_or_before: self.end_time.map(|t| parse_time("end_time", &t)).transpose()?,
            day: self.day,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub trip_id: String,
    pub day: u32,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub start_time: String,
    pub end_time: String,
    pub cost: Decimal,
    pub category: String,
    pub eco_rating: u8,
    pub booking_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_info: Option<BookingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id().to_string(),
            trip_id: activity.trip_id().to_string(),
            day: activity.day(),
            name: activity.name().to_string(),
            description: activity.description().to_string(),
            location: activity.location().clone(),
            start_time: activity.start_time().to_string(),
            end_time: activity.end_time().to_string(),
            cost: activity.cost(),
            category: activity.category().as_str().to_string(),
            eco_rating: activity.eco_rating(),
            booking_required: activity.booking_required(),
            booking_info: activity.booking_info().cloned(),
            notes: activity.notes().map(str::to_string),
            created_at: *activity.created_at().as_datetime(),
            updated_at: *activity.updated_at().as_datetime(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_body(start: &str, category: &str) -> CreateActivityRequest {
        serde_json::from_value(serde_json::json!({
            "day": 2,
            "name": "Harbour kayak",
            "location": { "address": "Pier 4", "coordinates": { "latitude": 59.9, "longitude": 10.7 } },
            "startTime": start,
            "endTime": "11:30",
            "cost": 45,
            "category": category
        }))
        .unwrap()
    }

    #[test]
    fn create_request_parses_into_domain_input() {
        let input = create_body("9:00", "adventure").into_new_activity().unwrap();
        assert_eq!(input.start_time, TimeOfDay::new(9, 0).unwrap());
        assert_eq!(input.category, ActivityCategory::Adventure);
        assert_eq!(input.eco_rating, DEFAULT_ECO_RATING);
        assert!(input.location.coordinates.is_some());
    }

    #[test]
    fn malformed_time_is_a_validation_error() {
        let err = create_body("9am", "adventure").into_new_activity().unwrap_err();
        assert!(matches!(err, ActivityError::ValidationFailed { .. }));
    }

    #[test]
    fn unknown_category_is_reported_by_name() {
        let err = create_body("09:00", "nightlife").into_new_activity().unwrap_err();
        assert_eq!(err, ActivityError::InvalidCategory("nightlife".to_string()));
    }

    #[test]
    fn list_params_build_a_time_window_filter() {
        let params = ListActivitiesParams {
            start_time: Some("08:00".to_string()),
            end_time: Some("18:00".to_string()),
            ..Default::default()
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.starts_at_or_after, Some(TimeOfDay::new(8, 0).unwrap()));
        assert_eq!(filter.ends_at_or_before, Some(TimeOfDay::new(18, 0).unwrap()));
    }
}

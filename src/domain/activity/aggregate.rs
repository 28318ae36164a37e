//! Activity aggregate entity.
//!
//! Activities belong to one trip and are referenced from its itinerary.
//! The activity record owns its own lifecycle; the trip only indexes it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ActivityCategory, TimeOfDay};
use crate::domain::foundation::{
    ActivityId, DomainError, Timestamp, TripId, ValidationError, MAX_AMOUNT,
};
use crate::domain::trip::validate_day;

/// Default eco rating for new activities.
pub const DEFAULT_ECO_RATING: u8 = 3;

/// Geographic point, range checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::invalid_format(
                "location.latitude",
                "latitude must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::invalid_format(
                "location.longitude",
                "longitude must be between -180 and 180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

// Coordinates are validated finite, so equality is total.
impl Eq for Coordinates {}

/// Where an activity takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

impl Location {
    pub fn new(address: impl Into<String>, coordinates: Option<Coordinates>) -> Result<Self, ValidationError> {
        let address = address.into().trim().to_string();
        if address.is_empty() {
            return Err(ValidationError::empty_field("location"));
        }
        Ok(Self {
            address,
            coordinates,
        })
    }
}

/// Reservation details for activities that need booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub provider: Option<String>,
    pub url: Option<String>,
    pub reference: Option<String>,
}

/// Validation switches that vary by deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityRules {
    /// Require `end_time > start_time`.
    pub enforce_time_order: bool,
}

/// Input for creating an activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub day: u32,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub cost: Decimal,
    pub category: ActivityCategory,
    pub eco_rating: u8,
    pub booking_required: bool,
    pub booking_info: Option<BookingInfo>,
    pub notes: Option<String>,
}

/// Partial update of an activity. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ActivityUpdate {
    pub day: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub cost: Option<Decimal>,
    pub category: Option<ActivityCategory>,
    pub eco_rating: Option<u8>,
    pub booking_required: Option<bool>,
    pub booking_info: Option<BookingInfo>,
    pub notes: Option<String>,
}

/// Activity aggregate.
///
/// # Invariants
///
/// - `day >= 1`
/// - `name` is non-empty and `location.address` is non-empty
/// - `cost >= 0`
/// - `eco_rating` is 1-5
/// - when the time-order rule is on, `end_time > start_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    trip_id: TripId,
    day: u32,
    name: String,
    description: String,
    location: Location,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    cost: Decimal,
    category: ActivityCategory,
    eco_rating: u8,
    booking_required: bool,
    booking_info: Option<BookingInfo>,
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Activity {
    /// Creates a validated activity for a trip.
    pub fn create(trip_id: TripId, input: NewActivity, rules: ActivityRules) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        let activity = Self {
            id: ActivityId::new(),
            trip_id,
            day: input.day,
            name: input.name.trim().to_string(),
            description: input.description,
            location: input.location,
            start_time: input.start_time,
            end_time: input.end_time,
            cost: input.cost,
            category: input.category,
            eco_rating: input.eco_rating,
            booking_required: input.booking_required,
            booking_info: input.booking_info,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        activity.validate(rules)?;
        Ok(activity)
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ActivityId,
        trip_id: TripId,
        day: u32,
        name: String,
        description: String,
        location: Location,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        cost: Decimal,
        category: ActivityCategory,
        eco_rating: u8,
        booking_required: bool,
        booking_info: Option<BookingInfo>,
        notes: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            trip_id,
            day,
            name,
            description,
            location,
            start_time,
            end_time,
            cost,
            category,
            eco_rating,
            booking_required,
            booking_info,
            notes,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    pub fn end_time(&self) -> TimeOfDay {
        self.end_time
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn category(&self) -> ActivityCategory {
        self.category
    }

    pub fn eco_rating(&self) -> u8 {
        self.eco_rating
    }

    pub fn booking_required(&self) -> bool {
        self.booking_required
    }

    pub fn booking_info(&self) -> Option<&BookingInfo> {
        self.booking_info.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the updated copy, validated as a whole. `self` is untouched.
    pub fn updated(&self, update: ActivityUpdate, rules: ActivityRules) -> Result<Self, DomainError> {
        let mut next = self.clone();
        if let Some(day) = update.day {
            next.day = day;
        }
        if let Some(name) = update.name {
            next.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            next.description = description;
        }
        if let Some(location) = update.location {
            next.location = location;
        }
        if let Some(start_time) = update.start_time {
            next.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            next.end_time = end_time;
        }
        if let Some(cost) = update.cost {
            next.cost = cost;
        }
        if let Some(category) = update.category {
            next.category = category;
        }
        if let Some(eco_rating) = update.eco_rating {
            next.eco_rating = eco_rating;
        }
        if let Some(booking_required) = update.booking_required {
            next.booking_required = booking_required;
        }
        if update.booking_info.is_some() {
            next.booking_info = update.booking_info;
        }
        if update.notes.is_some() {
            next.notes = update.notes;
        }
        next.validate(rules)?;
        next.updated_at = Timestamp::now();
        Ok(next)
    }

    fn validate(&self, rules: ActivityRules) -> Result<(), DomainError> {
        validate_day(self.day)?;
        if self.name.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if self.location.address.trim().is_empty() {
            return Err(ValidationError::empty_field("location").into());
        }
        if self.cost < Decimal::ZERO {
            return Err(DomainError::validation("cost", "cost must not be negative"));
        }
        if self.cost > MAX_AMOUNT {
            return Err(DomainError::validation(
                "cost",
                format!("cost must not exceed {}", MAX_AMOUNT),
            ));
        }
        validate_eco_rating(self.eco_rating)?;
        if rules.enforce_time_order && self.end_time <= self.start_time {
            return Err(DomainError::validation(
                "end_time",
                format!(
                    "end time {} must be after start time {}",
                    self.end_time, self.start_time
                ),
            ));
        }
        Ok(())
    }
}

/// Eco ratings run from 1 to 5.
pub fn validate_eco_rating(rating: u8) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::out_of_range(
            "eco_rating",
            1,
            5,
            i64::from(rating),
        ));
    }
    Ok(())
}

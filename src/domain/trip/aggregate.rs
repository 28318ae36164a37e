//! Trip aggregate entity.
//!
//! A trip is the root of everything the planner stores. It references
//! exactly one budget and one packing list (created alongside it) and keeps
//! the itinerary index of its activities. The dependents themselves are
//! owned by their own modules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Itinerary, TripStatus};
use crate::domain::foundation::{
    ActivityId, BudgetId, DomainError, OwnedByUser, PackingListId, Timestamp, TripId, UserId,
    ValidationError,
};

/// Maximum length for a trip title, in characters.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum length for a trip description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Input for creating a trip.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destinations: Vec<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
}

/// Partial update of a trip's scalar fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct TripUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<TripStatus>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub destinations: Option<Vec<String>>,
}

impl TripUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
            && self.is_public.is_none()
            && self.tags.is_none()
            && self.destinations.is_none()
    }
}

/// Trip aggregate.
///
/// # Invariants
///
/// - `title` is 1-50 characters after trimming
/// - `description` is at most 500 characters
/// - `start_date <= end_date`
/// - `budget_id` and `packing_list_id` are fixed at creation
/// - each itinerary day holds no duplicate activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    id: TripId,
    user_id: UserId,
    title: String,
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: TripStatus,
    is_public: bool,
    tags: Vec<String>,
    destinations: Vec<String>,
    budget_id: BudgetId,
    packing_list_id: PackingListId,
    itinerary: Itinerary,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Trip {
    /// Creates a trip in `planning` status with fresh dependent ids.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty or too long, the description
    ///   is too long, or `end_date < start_date`
    pub fn create(user_id: UserId, input: NewTrip) -> Result<Self, DomainError> {
        let title = validate_title(&input.title)?;
        validate_description(&input.description)?;
        validate_dates(input.start_date, input.end_date)?;

        let now = Timestamp::now();
        Ok(Self {
            id: TripId::new(),
            user_id,
            title,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            status: TripStatus::Planning,
            is_public: input.is_public,
            tags: normalize_tags(input.tags),
            destinations: normalize_tags(input.destinations),
            budget_id: BudgetId::new(),
            packing_list_id: PackingListId::new(),
            itinerary: Itinerary::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a trip from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TripId,
        user_id: UserId,
        title: String,
        description: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: TripStatus,
        is_public: bool,
        tags: Vec<String>,
        destinations: Vec<String>,
        budget_id: BudgetId,
        packing_list_id: PackingListId,
        itinerary: Itinerary,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            description,
            start_date,
            end_date,
            status,
            is_public,
            tags,
            destinations,
            budget_id,
            packing_list_id,
            itinerary,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Inclusive length of the trip in days.
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days).unwrap_or(1)
    }

    pub fn status(&self) -> TripStatus {
        self.status
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    pub fn budget_id(&self) -> &BudgetId {
        &self.budget_id
    }

    pub fn packing_list_id(&self) -> &PackingListId {
        &self.packing_list_id
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
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

    /// Applies a partial update, validating the merged result.
    ///
    /// Nothing is changed when validation fails.
    pub fn apply_update(&mut self, update: TripUpdate) -> Result<(), DomainError> {
        let title = match update.title {
            Some(title) => validate_title(&title)?,
            None => self.title.clone(),
        };
        let description = update.description.unwrap_or_else(|| self.description.clone());
        validate_description(&description)?;
        let start_date = update.start_date.unwrap_or(self.start_date);
        let end_date = update.end_date.unwrap_or(self.end_date);
        validate_dates(start_date, end_date)?;

        self.title = title;
        self.description = description;
        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        if let Some(tags) = update.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(destinations) = update.destinations {
            self.destinations = normalize_tags(destinations);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Adds an activity reference to a day. Duplicate adds are no-ops.
    pub fn schedule_activity(&mut self, day: u32, activity_id: ActivityId) -> Result<bool, DomainError> {
        super::validate_day(day)?;
        let changed = self.itinerary.insert(day, activity_id);
        if changed {
            self.updated_at = Timestamp::now();
        }
        Ok(changed)
    }

    /// Removes an activity reference from a day. Absent references are no-ops.
    pub fn unschedule_activity(&mut self, day: u32, activity_id: &ActivityId) -> bool {
        let changed = self.itinerary.remove(day, activity_id);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    /// Drops an activity from every itinerary day.
    pub fn forget_activity(&mut self, activity_id: &ActivityId) -> bool {
        let changed = self.itinerary.remove_everywhere(activity_id);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    /// Moves an activity's references to another day.
    ///
    /// Activities that are not in the itinerary stay out of it.
    pub fn reschedule_activity(&mut self, activity_id: ActivityId, day: u32) -> bool {
        if !self.itinerary.contains(&activity_id) || self.itinerary.day(day).contains(&activity_id)
        {
            return false;
        }
        self.itinerary.relocate(activity_id, day);
        self.updated_at = Timestamp::now();
        true
    }
}

impl OwnedByUser for Trip {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

fn validate_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::out_of_range(
            "title",
            1,
            MAX_TITLE_LENGTH as i64,
            len as i64,
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::out_of_range(
            "description",
            0,
            MAX_DESCRIPTION_LENGTH as i64,
            len as i64,
        ));
    }
    Ok(())
}

fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::invalid_format(
            "end_date",
            "end date must not be before start date",
        ));
    }
    Ok(())
}

/// Trims tags, drops blanks and repeats, keeps first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn owner() -> UserId {
        UserId::new("traveler-1").unwrap()
    }

    fn kyoto() -> NewTrip {
        NewTrip {
            title: "Kyoto".to_string(),
            description: "Cherry blossoms".to_string(),
            start_date: date("2024-04-01"),
            end_date: date("2024-04-10"),
            destinations: vec!["Kyoto".to_string()],
            tags: vec!["spring".to_string()],
            is_public: false,
        }
    }

    #[test]
    fn create_starts_in_planning_with_empty_itinerary() {
        let trip = Trip::create(owner(), kyoto()).unwrap();
        assert_eq!(trip.status(), TripStatus::Planning);
        assert!(trip.itinerary().is_empty());
        assert_eq!(trip.duration_days(), 10);
    }

    #[test]
    fn create_rejects_blank_title() {
        let mut input = kyoto();
        input.title = "   ".to_string();
        let err = Trip::create(owner(), input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn create_rejects_overlong_title() {
        let mut input = kyoto();
        input.title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(Trip::create(owner(), input).is_err());
    }

    #[test]
    fn create_rejects_end_before_start() {
        let mut input = kyoto();
        input.end_date = date("2024-03-31");
        let err = Trip::create(owner(), input).unwrap_err();
        assert_eq!(err.field(), Some("end_date"));
    }

    #[test]
    fn single_day_trip_is_valid() {
        let mut input = kyoto();
        input.end_date = input.start_date;
        let trip = Trip::create(owner(), input).unwrap();
        assert_eq!(trip.duration_days(), 1);
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let mut input = kyoto();
        input.tags = vec![" food ".into(), "food".into(), "".into(), "temples".into()];
        let trip = Trip::create(owner(), input).unwrap();
        assert_eq!(trip.tags(), &["food".to_string(), "temples".to_string()]);
    }

    #[test]
    fn update_revalidates_merged_dates() {
        let mut trip = Trip::create(owner(), kyoto()).unwrap();
        let update = TripUpdate {
            start_date: Some(date("2024-04-20")),
            ..Default::default()
        };
        assert!(trip.apply_update(update).is_err());
        assert_eq!(trip.start_date(), date("2024-04-01"));
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut trip = Trip::create(owner(), kyoto()).unwrap();
        trip.apply_update(TripUpdate {
            status: Some(TripStatus::InProgress),
            is_public: Some(true),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(trip.status(), TripStatus::InProgress);
        assert!(trip.is_public());
        assert_eq!(trip.title(), "Kyoto");
    }

    #[test]
    fn scheduling_same_activity_twice_keeps_one_reference() {
        let mut trip = Trip::create(owner(), kyoto()).unwrap();
        let activity = ActivityId::new();

        assert!(trip.schedule_activity(1, activity).unwrap());
        assert!(!trip.schedule_activity(1, activity).unwrap());
        assert_eq!(trip.itinerary().day(1).len(), 1);
    }

    #[test]
    fn rescheduling_moves_only_scheduled_activities() {
        let mut trip = Trip::create(owner(), kyoto()).unwrap();
        let scheduled = ActivityId::new();
        let unscheduled = ActivityId::new();
        trip.schedule_activity(1, scheduled).unwrap();

        assert!(trip.reschedule_activity(scheduled, 2));
        assert!(!trip.reschedule_activity(unscheduled, 2));
        assert_eq!(trip.itinerary().day(2), &[scheduled]);
        assert!(trip.itinerary().day(1).is_empty());
    }

    #[test]
    fn scheduling_on_day_zero_fails() {
        let mut trip = Trip::create(owner(), kyoto()).unwrap();
        assert!(trip.schedule_activity(0, ActivityId::new()).is_err());
    }

    #[test]
    fn trip_is_owned_by_creator() {
        let trip = Trip::create(owner(), kyoto()).unwrap();
        assert!(trip.is_owner(&owner()));
        assert!(trip.check_ownership(&UserId::new("someone-else").unwrap()).is_err());
    }
}

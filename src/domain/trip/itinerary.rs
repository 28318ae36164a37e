//! Itinerary index: day number to ordered activity references.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{ActivityId, ValidationError};

/// Validates a 1-based day number.
pub fn validate_day(day: u32) -> Result<(), ValidationError> {
    if day == 0 {
        return Err(ValidationError::out_of_range(
            "day",
            1,
            i64::from(u32::MAX),
            0,
        ));
    }
    Ok(())
}

/// Maps each trip day to an ordered, duplicate-free list of activities.
///
/// Days with no activities are dropped from the map so that an emptied
/// day does not linger as an empty entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary(BTreeMap<u32, Vec<ActivityId>>);

impl Itinerary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an itinerary from stored `(day, activity)` rows in order.
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, ActivityId)>) -> Self {
        let mut itinerary = Self::new();
        for (day, activity_id) in entries {
            itinerary.insert(day, activity_id);
        }
        itinerary
    }

    /// Appends an activity to a day. Returns false if it was already there.
    pub fn insert(&mut self, day: u32, activity_id: ActivityId) -> bool {
        let entries = self.0.entry(day).or_default();
        if entries.contains(&activity_id) {
            return false;
        }
        entries.push(activity_id);
        true
    }

    /// Removes an activity from one day. Returns false if it was absent.
    pub fn remove(&mut self, day: u32, activity_id: &ActivityId) -> bool {
        let Some(entries) = self.0.get_mut(&day) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|id| id != activity_id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.0.remove(&day);
        }
        removed
    }

    /// Removes an activity from every day it appears in.
    pub fn remove_everywhere(&mut self, activity_id: &ActivityId) -> bool {
        let days: Vec<u32> = self.0.keys().copied().collect();
        let mut removed = false;
        for day in days {
            removed |= self.remove(day, activity_id);
        }
        removed
    }

    /// Moves every reference of an activity to `new_day`.
    pub fn relocate(&mut self, activity_id: ActivityId, new_day: u32) {
        self.remove_everywhere(&activity_id);
        self.insert(new_day, activity_id);
    }

    /// Activities scheduled on a day, in order.
    pub fn day(&self, day: u32) -> &[ActivityId] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, activity_id: &ActivityId) -> bool {
        self.0.values().any(|ids| ids.contains(activity_id))
    }

    /// Iterates `(day, activity)` pairs ordered by day then position.
    pub fn entries(&self) -> impl Iterator<Item = (u32, ActivityId)> + '_ {
        self.0
            .iter()
            .flat_map(|(day, ids)| ids.iter().map(move |id| (*day, *id)))
    }

    pub fn days(&self) -> &BTreeMap<u32, Vec<ActivityId>> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_zero_is_rejected() {
        assert!(validate_day(0).is_err());
        assert!(validate_day(1).is_ok());
    }

    #[test]
    fn duplicate_insert_keeps_single_reference() {
        let mut itinerary = Itinerary::new();
        let activity = ActivityId::new();

        assert!(itinerary.insert(2, activity));
        assert!(!itinerary.insert(2, activity));
        assert_eq!(itinerary.day(2), &[activity]);
    }

    #[test]
    fn removing_absent_reference_is_noop() {
        let mut itinerary = Itinerary::new();
        assert!(!itinerary.remove(1, &ActivityId::new()));
        assert!(itinerary.is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut itinerary = Itinerary::new();
        let first = ActivityId::new();
        let second = ActivityId::new();
        itinerary.insert(1, first);
        itinerary.insert(1, second);
        assert_eq!(itinerary.day(1), &[first, second]);
    }

    #[test]
    fn emptied_day_is_dropped() {
        let mut itinerary = Itinerary::new();
        let activity = ActivityId::new();
        itinerary.insert(3, activity);
        itinerary.remove(3, &activity);
        assert!(itinerary.days().get(&3).is_none());
    }

    #[test]
    fn relocate_moves_reference_between_days() {
        let mut itinerary = Itinerary::new();
        let activity = ActivityId::new();
        itinerary.insert(1, activity);
        itinerary.relocate(activity, 4);

        assert!(itinerary.day(1).is_empty());
        assert_eq!(itinerary.day(4), &[activity]);
    }

    #[test]
    fn entries_are_ordered_by_day() {
        let a = ActivityId::new();
        let b = ActivityId::new();
        let itinerary = Itinerary::from_entries(vec![(5, a), (2, b)]);
        let entries: Vec<_> = itinerary.entries().collect();
        assert_eq!(entries, vec![(2, b), (5, a)]);
    }
}

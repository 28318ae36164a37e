//! Filtering and ordering for activity listings.

use super::{Activity, ActivityCategory, TimeOfDay};

/// Filters applied by `listActivities`. All present criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub category: Option<ActivityCategory>,
    pub min_eco_rating: Option<u8>,
    /// Keeps activities starting at or after this time.
    pub starts_at_or_after: Option<TimeOfDay>,
    /// Keeps activities ending at or before this time.
    pub ends_at_or_before: Option<TimeOfDay>,
    pub day: Option<u32>,
}

impl ActivityFilter {
    pub fn matches(&self, activity: &Activity) -> bool {
        self.category.map_or(true, |c| activity.category() == c)
            && self.min_eco_rating.map_or(true, |r| activity.eco_rating() >= r)
            && self.starts_at_or_after.map_or(true, |t| activity.start_time() >= t)
            && self.ends_at_or_before.map_or(true, |t| activity.end_time() <= t)
            && self.day.map_or(true, |d| activity.day() == d)
    }

    /// Filters and orders by day, then start time, then name.
    pub fn apply(&self, activities: Vec<Activity>) -> Vec<Activity> {
        let mut selected: Vec<Activity> = activities.into_iter().filter(|a| self.matches(a)).collect();
        sort_chronologically(&mut selected);
        selected
    }
}

/// Orders activities by day, then start time, then name.
pub fn sort_chronologically(activities: &mut [Activity]) {
    activities.sort_by(|a, b| {
        a.day()
            .cmp(&b.day())
            .then(a.start_time().cmp(&b.start_time()))
            .then_with(|| a.name().cmp(b.name()))
    });
}

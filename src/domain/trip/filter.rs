//! Filtering for trip listings.

use chrono::NaiveDate;

use super::{Trip, TripStatus};

/// Filters applied by `listTrips`. All present criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripFilter {
    pub status: Option<TripStatus>,
    /// Keeps trips with `start_date >= starts_on_or_after`.
    pub starts_on_or_after: Option<NaiveDate>,
    /// Keeps trips with `end_date <= ends_on_or_before`.
    pub ends_on_or_before: Option<NaiveDate>,
}

impl TripFilter {
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(status) = self.status {
            if trip.status() != status {
                return false;
            }
        }
        if let Some(from) = self.starts_on_or_after {
            if trip.start_date() < from {
                return false;
            }
        }
        if let Some(to) = self.ends_on_or_before {
            if trip.end_date() > to {
                return false;
            }
        }
        true
    }
}

/// Summary of what a cascade delete removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub budgets_removed: u64,
    pub packing_lists_removed: u64,
    pub activities_removed: u64,
}

/// Dependents still present for a trip id, used to verify a cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependentCounts {
    pub budgets: u64,
    pub packing_lists: u64,
    pub activities: u64,
}

impl DependentCounts {
    /// Names of dependent kinds with leftover records.
    pub fn remaining(&self) -> Vec<String> {
        let mut remaining = Vec::new();
        if self.budgets > 0 {
            remaining.push(format!("budget ({})", self.budgets));
        }
        if self.packing_lists > 0 {
            remaining.push(format!("packing list ({})", self.packing_lists));
        }
        if self.activities > 0 {
            remaining.push(format!("activities ({})", self.activities));
        }
        remaining
    }

    pub fn is_empty(&self) -> bool {
        self.budgets == 0 && self.packing_lists == 0 && self.activities == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::trip::NewTrip;

    fn trip(start: &str, end: &str) -> Trip {
        Trip::create(
            UserId::new("u1").unwrap(),
            NewTrip {
                title: "Trip".to_string(),
                description: String::new(),
                start_date: start.parse().unwrap(),
                end_date: end.parse().unwrap(),
                destinations: vec![],
                tags: vec![],
                is_public: false,
            },
        )
        .unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(TripFilter::default().matches(&trip("2024-01-01", "2024-01-05")));
    }

    #[test]
    fn date_range_requires_trip_inside_window() {
        let filter = TripFilter {
            starts_on_or_after: Some("2024-04-01".parse().unwrap()),
            ends_on_or_before: Some("2024-04-30".parse().unwrap()),
            ..Default::default()
        };
        assert!(filter.matches(&trip("2024-04-01", "2024-04-10")));
        assert!(!filter.matches(&trip("2024-03-30", "2024-04-10")));
        assert!(!filter.matches(&trip("2024-04-20", "2024-05-02")));
    }

    #[test]
    fn status_filter_excludes_other_statuses() {
        let filter = TripFilter {
            status: Some(TripStatus::Completed),
            ..Default::default()
        };
        assert!(!filter.matches(&trip("2024-01-01", "2024-01-02")));
    }

    #[test]
    fn dependent_counts_name_leftovers() {
        let counts = DependentCounts {
            budgets: 0,
            packing_lists: 1,
            activities: 2,
        };
        assert!(!counts.is_empty());
        assert_eq!(
            counts.remaining(),
            vec!["packing list (1)".to_string(), "activities (2)".to_string()]
        );
    }
}

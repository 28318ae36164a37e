//! Fixtures shared by handler tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::adapters::memory::MemoryStore;
use crate::domain::activity::{ActivityCategory, Location, NewActivity, TimeOfDay};
use crate::domain::budget::Budget;
use crate::domain::foundation::UserId;
use crate::domain::packing::PackingList;
use crate::domain::trip::{NewTrip, Trip};
use crate::ports::TripRepository;

pub(crate) fn owner() -> UserId {
    UserId::new("traveller-1").unwrap()
}

pub(crate) fn intruder() -> UserId {
    UserId::new("someone-else").unwrap()
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn kyoto() -> NewTrip {
    NewTrip {
        title: "Kyoto".to_string(),
        description: "Temples and tea".to_string(),
        start_date: date(2024, 4, 1),
        end_date: date(2024, 4, 5),
        destinations: vec!["Kyoto".to_string()],
        tags: vec!["culture".to_string()],
        is_public: false,
    }
}

/// Stores a Kyoto trip owned by `owner()` with its empty dependents.
pub(crate) async fn seed_trip(store: &MemoryStore) -> Trip {
    let trip = Trip::create(owner(), kyoto()).unwrap();
    let budget = Budget::empty(*trip.budget_id(), *trip.id());
    let packing = PackingList::empty(*trip.packing_list_id(), *trip.id());
    store
        .create_with_dependents(&trip, &budget, &packing)
        .await
        .unwrap();
    trip
}

pub(crate) fn temple_visit(day: u32) -> NewActivity {
    NewActivity {
        day,
        name: "Kiyomizu-dera".to_string(),
        description: "Morning visit".to_string(),
        location: Location::new("1-294 Kiyomizu, Kyoto", None).unwrap(),
        start_time: TimeOfDay::new(9, 0).unwrap(),
        end_time: TimeOfDay::new(11, 30).unwrap(),
        cost: Decimal::new(400, 0),
        category: ActivityCategory::Cultural,
        eco_rating: 4,
        booking_required: false,
        booking_info: None,
        notes: None,
    }
}

//! In-memory implementation of every repository port.
//!
//! All four record families share one lock, so each port operation is a
//! single critical section: a trip and its dependents appear together, a
//! cascade delete removes them together, and read-modify-write updates on
//! one budget or packing list are serialized.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::activity::Activity;
use crate::domain::budget::{
    Budget, BudgetCategory, BudgetSettings, ExchangeRateSnapshot, ExpenseItem, ExpenseUpdate,
};
use crate::domain::foundation::{
    ActivityId, DomainError, ErrorCode, ExpenseId, PackingItemId, TripId, UserId,
};
use crate::domain::packing::{PackingCategory, PackingItem, PackingList, WeatherCondition};
use crate::domain::trip::{CascadeReport, DependentCounts, Trip, TripFilter, TripUpdate};
use crate::ports::{ActivityRepository, BudgetRepository, PackingRepository, TripRepository};

#[derive(Debug, Default)]
struct State {
    trips: HashMap<TripId, Trip>,
    budgets: HashMap<TripId, Budget>,
    packing_lists: HashMap<TripId, PackingList>,
    activities: HashMap<ActivityId, Activity>,
}

impl State {
    fn trip_mut(&mut self, id: &TripId) -> Result<&mut Trip, DomainError> {
        self.trips.get_mut(id).ok_or_else(|| trip_not_found(id))
    }

    fn budget_mut(&mut self, trip_id: &TripId) -> Result<&mut Budget, DomainError> {
        self.budgets
            .get_mut(trip_id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::BudgetNotFound, "trip_id", trip_id))
    }

    fn packing_mut(&mut self, trip_id: &TripId) -> Result<&mut PackingList, DomainError> {
        self.packing_lists.get_mut(trip_id).ok_or_else(|| {
            DomainError::not_found(ErrorCode::PackingListNotFound, "trip_id", trip_id)
        })
    }

    fn owns_activity(&self, trip_id: &TripId, id: &ActivityId) -> bool {
        self.activities
            .get(id)
            .map(|activity| activity.trip_id() == trip_id)
            .unwrap_or(false)
    }
}

fn trip_not_found(id: &TripId) -> DomainError {
    DomainError::not_found(ErrorCode::TripNotFound, "trip_id", id)
}

fn activity_not_found(id: &ActivityId) -> DomainError {
    DomainError::not_found(ErrorCode::ActivityNotFound, "activity_id", id)
}

/// In-memory store for trips and everything that hangs off them.
///
/// Used by tests and by deployments without a database URL. Cloning is
/// cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a trip's budget without touching the trip.
    ///
    /// Simulates records lost by an older, non-atomic writer.
    pub async fn detach_budget(&self, trip_id: &TripId) -> Option<Budget> {
        self.state.write().await.budgets.remove(trip_id)
    }

    /// Drops a trip's packing list without touching the trip.
    pub async fn detach_packing_list(&self, trip_id: &TripId) -> Option<PackingList> {
        self.state.write().await.packing_lists.remove(trip_id)
    }

    /// Number of trips held, across all owners.
    pub async fn trip_count(&self) -> usize {
        self.state.read().await.trips.len()
    }
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn create_with_dependents(
        &self,
        trip: &Trip,
        budget: &Budget,
        packing_list: &PackingList,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.trips.contains_key(trip.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Trip {} already exists", trip.id()),
            ));
        }
        state.trips.insert(*trip.id(), trip.clone());
        state.budgets.insert(*trip.id(), budget.clone());
        state.packing_lists.insert(*trip.id(), packing_list.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, DomainError> {
        Ok(self.state.read().await.trips.get(id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        filter: &TripFilter,
    ) -> Result<Vec<Trip>, DomainError> {
        let state = self.state.read().await;
        let mut trips: Vec<Trip> = state
            .trips
            .values()
            .filter(|trip| trip.user_id() == owner && filter.matches(trip))
            .cloned()
            .collect();
        trips.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| a.created_at().cmp(b.created_at()))
        });
        Ok(trips)
    }

    async fn apply_update(&self, id: &TripId, update: &TripUpdate) -> Result<Trip, DomainError> {
        let mut state = self.state.write().await;
        let stored = state.trip_mut(id)?;
        stored.apply_update(update.clone())?;
        Ok(stored.clone())
    }

    async fn delete_cascade(&self, id: &TripId) -> Result<CascadeReport, DomainError> {
        let mut state = self.state.write().await;
        if state.trips.remove(id).is_none() {
            return Err(trip_not_found(id));
        }

        let budgets_removed = u64::from(state.budgets.remove(id).is_some());
        let packing_lists_removed = u64::from(state.packing_lists.remove(id).is_some());
        let before = state.activities.len();
        state.activities.retain(|_, activity| activity.trip_id() != id);
        let activities_removed = (before - state.activities.len()) as u64;

        Ok(CascadeReport {
            budgets_removed,
            packing_lists_removed,
            activities_removed,
        })
    }

    async fn count_dependents(&self, id: &TripId) -> Result<DependentCounts, DomainError> {
        let state = self.state.read().await;
        Ok(DependentCounts {
            budgets: u64::from(state.budgets.contains_key(id)),
            packing_lists: u64::from(state.packing_lists.contains_key(id)),
            activities: state
                .activities
                .values()
                .filter(|activity| activity.trip_id() == id)
                .count() as u64,
        })
    }

    async fn add_itinerary_entry(
        &self,
        trip_id: &TripId,
        day: u32,
        activity_id: &ActivityId,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if !state.trips.contains_key(trip_id) {
            return Err(trip_not_found(trip_id));
        }
        if !state.owns_activity(trip_id, activity_id) {
            return Err(activity_not_found(activity_id));
        }
        state.trip_mut(trip_id)?.schedule_activity(day, *activity_id)
    }

    async fn remove_itinerary_entry(
        &self,
        trip_id: &TripId,
        day: u32,
        activity_id: &ActivityId,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.trip_mut(trip_id)?.unschedule_activity(day, activity_id))
    }
}

#[async_trait]
impl BudgetRepository for MemoryStore {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<Budget>, DomainError> {
        Ok(self.state.read().await.budgets.get(trip_id).cloned())
    }

    async fn insert_default(&self, budget: &Budget) -> Result<Budget, DomainError> {
        let mut state = self.state.write().await;
        if !state.trips.contains_key(budget.trip_id()) {
            return Err(trip_not_found(budget.trip_id()));
        }
        Ok(state
            .budgets
            .entry(*budget.trip_id())
            .or_insert_with(|| budget.clone())
            .clone())
    }

    async fn apply_settings(
        &self,
        trip_id: &TripId,
        settings: &BudgetSettings,
    ) -> Result<Budget, DomainError> {
        let mut state = self.state.write().await;
        let budget = state.budget_mut(trip_id)?;
        budget.apply_settings(settings)?;
        Ok(budget.clone())
    }

    async fn set_allocation(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        allocated: Decimal,
    ) -> Result<Budget, DomainError> {
        let mut state = self.state.write().await;
        let budget = state.budget_mut(trip_id)?;
        budget.set_allocation(category, allocated)?;
        Ok(budget.clone())
    }

    async fn append_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        item: &ExpenseItem,
    ) -> Result<Budget, DomainError> {
        let mut state = self.state.write().await;
        let budget = state.budget_mut(trip_id)?;
        budget.append_expense(category, item.clone())?;
        Ok(budget.clone())
    }

    async fn update_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        expense_id: &ExpenseId,
        update: &ExpenseUpdate,
    ) -> Result<Budget, DomainError> {
        let mut state = self.state.write().await;
        let budget = state.budget_mut(trip_id)?;
        budget.amend_expense(category, expense_id, update)?;
        Ok(budget.clone())
    }

    async fn delete_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        expense_id: &ExpenseId,
    ) -> Result<Budget, DomainError> {
        let mut state = self.state.write().await;
        let budget = state.budget_mut(trip_id)?;
        budget.remove_expense(category, expense_id)?;
        Ok(budget.clone())
    }

    async fn record_exchange_rate(
        &self,
        trip_id: &TripId,
        snapshot: &ExchangeRateSnapshot,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.budget_mut(trip_id)?.record_exchange_rate(snapshot.clone());
        Ok(())
    }
}

#[async_trait]
impl PackingRepository for MemoryStore {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<PackingList>, DomainError> {
        Ok(self.state.read().await.packing_lists.get(trip_id).cloned())
    }

    async fn insert_default(&self, list: &PackingList) -> Result<PackingList, DomainError> {
        let mut state = self.state.write().await;
        if !state.trips.contains_key(list.trip_id()) {
            return Err(trip_not_found(list.trip_id()));
        }
        Ok(state
            .packing_lists
            .entry(*list.trip_id())
            .or_insert_with(|| list.clone())
            .clone())
    }

    async fn update_settings(
        &self,
        trip_id: &TripId,
        weather_considerations: Option<Vec<WeatherCondition>>,
        special_requirements: Option<Vec<String>>,
    ) -> Result<PackingList, DomainError> {
        let mut state = self.state.write().await;
        let list = state.packing_mut(trip_id)?;
        list.update_settings(weather_considerations, special_requirements);
        Ok(list.clone())
    }

    async fn add_item(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item: &PackingItem,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.packing_mut(trip_id)?.add_item(category, item.clone());
        Ok(())
    }

    async fn set_item_packed(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item_id: &PackingItemId,
        packed: Option<bool>,
    ) -> Result<PackingItem, DomainError> {
        let mut state = self.state.write().await;
        state.packing_mut(trip_id)?.set_packed(category, item_id, packed)
    }

    async fn delete_item(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item_id: &PackingItemId,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.packing_mut(trip_id)?.remove_item(category, item_id)?;
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn create_scheduled(&self, activity: &Activity) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state
            .trip_mut(activity.trip_id())?
            .schedule_activity(activity.day(), *activity.id())?;
        state.activities.insert(*activity.id(), activity.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        trip_id: &TripId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .activities
            .get(id)
            .filter(|activity| activity.trip_id() == trip_id)
            .cloned())
    }

    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Activity>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .activities
            .values()
            .filter(|activity| activity.trip_id() == trip_id)
            .cloned()
            .collect())
    }

    async fn update(&self, activity: &Activity) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.owns_activity(activity.trip_id(), activity.id()) {
            return Err(activity_not_found(activity.id()));
        }
        let trip = state.trip_mut(activity.trip_id())?;
        trip.reschedule_activity(*activity.id(), activity.day());
        state.activities.insert(*activity.id(), activity.clone());
        Ok(())
    }

    async fn delete(&self, trip_id: &TripId, id: &ActivityId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.owns_activity(trip_id, id) {
            return Err(activity_not_found(id));
        }
        state.activities.remove(id);
        if let Some(trip) = state.trips.get_mut(trip_id) {
            trip.forget_activity(id);
        }
        Ok(())
    }
}

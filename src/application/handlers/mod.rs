//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler checks that the caller owns the trip before it reads or writes
//! anything attached to it.

mod access;
pub mod activity;
pub mod budget;
pub mod packing;
pub mod trip;

#[cfg(test)]
pub(crate) mod testing;

pub use activity::{
    CreateActivityCommand, CreateActivityHandler, DeleteActivityCommand, DeleteActivityHandler,
    GetActivityHandler, GetActivityQuery, GetActivityWeatherHandler, GetActivityWeatherQuery,
    ListActivitiesHandler, ListActivitiesQuery, UpdateActivityCommand, UpdateActivityHandler,
};
pub use budget::{
    AddExpenseCommand, AddExpenseHandler, AddExpenseResult, DeleteExpenseCommand,
    DeleteExpenseHandler, GetBudgetHandler, GetBudgetQuery, GetBudgetSummaryHandler,
    GetBudgetSummaryQuery, GetExchangeRateHandler, GetExchangeRateQuery, SetBudgetCommand,
    SetBudgetHandler, UpdateAllocationCommand, UpdateAllocationHandler, UpdateExpenseCommand,
    UpdateExpenseHandler,
};
pub use packing::{
    AddPackingItemCommand, AddPackingItemHandler, DeletePackingItemCommand,
    DeletePackingItemHandler, GenerateSuggestionsHandler, GenerateSuggestionsQuery,
    GetPackingListHandler, GetPackingListQuery, GetPackingProgressHandler,
    GetPackingProgressQuery, SetItemPackedCommand, SetItemPackedHandler,
    UpdatePackingListCommand, UpdatePackingListHandler,
};
pub use trip::{
    CreateTripCommand, CreateTripHandler, DeleteTripCommand, DeleteTripHandler, GetTripHandler,
    GetTripQuery, ItineraryCommand, ItineraryHandler, ItineraryResult, ListTripsHandler,
    ListTripsQuery, TripDetails, UpdateTripCommand, UpdateTripHandler,
};

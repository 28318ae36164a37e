//! Router assembly: handler wiring, authentication and tower-http layers.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::activity::{
    CreateActivityHandler, DeleteActivityHandler, GetActivityHandler, GetActivityWeatherHandler,
    ListActivitiesHandler, UpdateActivityHandler,
};
use crate::application::handlers::budget::{
    AddExpenseHandler, DeleteExpenseHandler, GetBudgetHandler, GetBudgetSummaryHandler,
    GetExchangeRateHandler, SetBudgetHandler, UpdateAllocationHandler, UpdateExpenseHandler,
};
use crate::application::handlers::packing::{
    AddPackingItemHandler, DeletePackingItemHandler, GenerateSuggestionsHandler,
    GetPackingListHandler, GetPackingProgressHandler, SetItemPackedHandler,
    UpdatePackingListHandler,
};
use crate::application::handlers::trip::{
    CreateTripHandler, DeleteTripHandler, GetTripHandler, ItineraryHandler, ListTripsHandler,
    UpdateTripHandler,
};
use crate::domain::activity::ActivityRules;
use crate::domain::foundation::CurrencyCode;
use crate::ports::{
    ActivityRepository, BudgetRepository, ExchangeRateProvider, PackingRepository,
    SessionValidator, TripRepository, WeatherProvider,
};

use super::activity::{activity_routes, ActivityHandlers};
use super::budget::{budget_routes, BudgetHandlers};
use super::health::health_routes;
use super::middleware::{auth_middleware, AuthState};
use super::packing::{packing_routes, PackingHandlers};
use super::trip::{trip_routes, TripHandlers};

/// Port implementations the API runs against.
#[derive(Clone)]
pub struct AppServices {
    pub trips: Arc<dyn TripRepository>,
    pub budgets: Arc<dyn BudgetRepository>,
    pub packing: Arc<dyn PackingRepository>,
    pub activities: Arc<dyn ActivityRepository>,
    pub exchange_rates: Arc<dyn ExchangeRateProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub sessions: Arc<dyn SessionValidator>,
}

/// Deployment settings that shape handlers and layers.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub activity_rules: ActivityRules,
    pub default_target_currency: CurrencyCode,
    pub request_timeout: Duration,
    /// Allowed CORS origins; any origin when empty.
    pub cors_origins: Vec<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            activity_rules: ActivityRules::default(),
            default_target_currency: CurrencyCode::usd(),
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

impl TripHandlers {
    pub fn new(services: &AppServices) -> Self {
        Self {
            create: Arc::new(CreateTripHandler::new(services.trips.clone())),
            get: Arc::new(GetTripHandler::new(
                services.trips.clone(),
                services.budgets.clone(),
                services.packing.clone(),
                services.activities.clone(),
            )),
            list: Arc::new(ListTripsHandler::new(services.trips.clone())),
            update: Arc::new(UpdateTripHandler::new(services.trips.clone())),
            delete: Arc::new(DeleteTripHandler::new(services.trips.clone())),
            itinerary: Arc::new(ItineraryHandler::new(services.trips.clone())),
        }
    }
}

impl BudgetHandlers {
    pub fn new(services: &AppServices, default_target: CurrencyCode) -> Self {
        let trips = &services.trips;
        let budgets = &services.budgets;
        Self {
            set_budget: Arc::new(SetBudgetHandler::new(trips.clone(), budgets.clone())),
            get_budget: Arc::new(GetBudgetHandler::new(trips.clone(), budgets.clone())),
            add_expense: Arc::new(AddExpenseHandler::new(trips.clone(), budgets.clone())),
            update_expense: Arc::new(UpdateExpenseHandler::new(trips.clone(), budgets.clone())),
            delete_expense: Arc::new(DeleteExpenseHandler::new(trips.clone(), budgets.clone())),
            update_allocation: Arc::new(UpdateAllocationHandler::new(
                trips.clone(),
                budgets.clone(),
            )),
            get_summary: Arc::new(GetBudgetSummaryHandler::new(trips.clone(), budgets.clone())),
            get_exchange_rate: Arc::new(GetExchangeRateHandler::new(
                trips.clone(),
                budgets.clone(),
                services.exchange_rates.clone(),
                default_target,
            )),
        }
    }
}

impl PackingHandlers {
    pub fn new(services: &AppServices) -> Self {
        let trips = &services.trips;
        let packing = &services.packing;
        Self {
            get_list: Arc::new(GetPackingListHandler::new(trips.clone(), packing.clone())),
            update_list: Arc::new(UpdatePackingListHandler::new(trips.clone(), packing.clone())),
            add_item: Arc::new(AddPackingItemHandler::new(trips.clone(), packing.clone())),
            set_item_packed: Arc::new(SetItemPackedHandler::new(trips.clone(), packing.clone())),
            delete_item: Arc::new(DeletePackingItemHandler::new(trips.clone(), packing.clone())),
            get_progress: Arc::new(GetPackingProgressHandler::new(trips.clone(), packing.clone())),
            suggestions: Arc::new(GenerateSuggestionsHandler::new(trips.clone())),
        }
    }
}

impl ActivityHandlers {
    pub fn new(services: &AppServices, rules: ActivityRules) -> Self {
        let trips = &services.trips;
        let activities = &services.activities;
        Self {
            create: Arc::new(CreateActivityHandler::new(
                trips.clone(),
                activities.clone(),
                rules,
            )),
            get: Arc::new(GetActivityHandler::new(trips.clone(), activities.clone())),
            list: Arc::new(ListActivitiesHandler::new(trips.clone(), activities.clone())),
            update: Arc::new(UpdateActivityHandler::new(
                trips.clone(),
                activities.clone(),
                rules,
            )),
            delete: Arc::new(DeleteActivityHandler::new(trips.clone(), activities.clone())),
            weather: Arc::new(GetActivityWeatherHandler::new(
                trips.clone(),
                activities.clone(),
                services.weather.clone(),
            )),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

/// Builds the full application: every endpoint under `/api`.
///
/// Component routes sit behind `auth_middleware`; `/api/health` does not
/// require a token.
pub fn build_router(services: AppServices, settings: ApiSettings) -> Router {
    let auth_state: AuthState = services.sessions.clone();

    let protected = Router::new()
        .merge(trip_routes(TripHandlers::new(&services)))
        .merge(activity_routes(ActivityHandlers::new(
            &services,
            settings.activity_rules,
        )))
        .merge(budget_routes(BudgetHandlers::new(
            &services,
            settings.default_target_currency.clone(),
        )))
        .merge(packing_routes(PackingHandlers::new(&services)))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let api = protected.merge(health_routes());

    Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(settings.request_timeout))
            .layer(cors_layer(&settings.cors_origins))
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_skips_invalid_origins() {
        let _ = cors_layer(&["https://trips.example".to_string(), "bad\norigin".to_string()]);
    }

    #[test]
    fn default_settings_target_usd() {
        let settings = ApiSettings::default();
        assert_eq!(settings.default_target_currency, CurrencyCode::usd());
        assert!(!settings.activity_rules.enforce_time_order);
    }
}

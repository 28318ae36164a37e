//! HTTP handlers for trip endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    response::Response,
    Json,
};

use crate::adapters::http::envelope::{created, json_body, ok, parse_id, query_params, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::trip::{
    CreateTripCommand, CreateTripHandler, DeleteTripCommand, DeleteTripHandler, GetTripHandler,
    GetTripQuery, ItineraryCommand, ItineraryHandler, ItineraryResult, ListTripsHandler,
    ListTripsQuery, UpdateTripCommand, UpdateTripHandler,
};
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::trip::{TripError, TripFilter, TripStatus, TripUpdate};

use super::dto::{
    CreateTripRequest, ItineraryRequest, ItineraryResponse, ListTripsParams, TripDeletedResponse,
    TripDetailsResponse, TripResponse, UpdateTripRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TripHandlers {
    pub create: Arc<CreateTripHandler>,
    pub get: Arc<GetTripHandler>,
    pub list: Arc<ListTripsHandler>,
    pub update: Arc<UpdateTripHandler>,
    pub delete: Arc<DeleteTripHandler>,
    pub itinerary: Arc<ItineraryHandler>,
}

fn parse_status(raw: Option<String>) -> Result<Option<TripStatus>, ApiError> {
    raw.map(|s| {
        s.parse::<TripStatus>()
            .map_err(|err| ApiError::from(TripError::from(DomainError::from(err))))
    })
    .transpose()
}

fn itinerary_command(
    trip_id: &str,
    user_id: UserId,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<ItineraryCommand, ApiError> {
    let trip_id: TripId = parse_id("tripId", trip_id)?;
    let req = json_body(payload)?;
    Ok(ItineraryCommand {
        trip_id,
        user_id,
        day: req.day,
        activity_id: parse_id("activityId", &req.activity_id)?,
    })
}

fn itinerary_response(result: ItineraryResult) -> Response {
    ok(ItineraryResponse {
        changed: result.changed,
        trip: TripResponse::from(&result.trip),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/trips - Create a trip with its empty budget and packing list
pub async fn create_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = json_body(payload)?;

    let cmd = CreateTripCommand {
        user_id: user.id,
        title: req.title,
        description: req.description,
        start_date: req.start_date,
        end_date: req.end_date,
        destinations: req.destinations,
        tags: req.tags,
        is_public: req.is_public,
    };

    let trip = handlers.create.handle(cmd).await?;
    Ok(created(TripResponse::from(&trip)))
}

/// GET /api/trips - List the caller's trips
pub async fn list_trips(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    params: Result<Query<ListTripsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let params = query_params(params)?;

    let query = ListTripsQuery {
        user_id: user.id,
        filter: TripFilter {
            status: parse_status(params.status)?,
            starts_on_or_after: params.from,
            ends_on_or_before: params.to,
        },
    };

    let trips = handlers.list.handle(query).await?;
    let response: Vec<TripResponse> = trips.iter().map(TripResponse::from).collect();
    Ok(ok(response))
}

/// GET /api/trips/:trip_id - Trip with budget, packing list and activities
pub async fn get_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Response, ApiError> {
    let query = GetTripQuery {
        trip_id: parse_id("tripId", &trip_id)?,
        user_id: user.id,
    };

    let details = handlers.get.handle(query).await?;
    Ok(ok(TripDetailsResponse::from(&details)))
}

/// PUT /api/trips/:trip_id
pub async fn update_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdateTripRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let req = json_body(payload)?;

    let cmd = UpdateTripCommand {
        trip_id,
        user_id: user.id,
        update: TripUpdate {
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            status: parse_status(req.status)?,
            is_public: req.is_public,
            tags: req.tags,
            destinations: req.destinations,
        },
    };

    let trip = handlers.update.handle(cmd).await?;
    Ok(ok(TripResponse::from(&trip)))
}

/// DELETE /api/trips/:trip_id - Cascade delete
pub async fn delete_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;

    let cmd = DeleteTripCommand {
        trip_id,
        user_id: user.id,
    };

    let report = handlers.delete.handle(cmd).await?;
    Ok(ok(TripDeletedResponse::new(trip_id.to_string(), report)))
}

/// POST /api/trips/:trip_id/itinerary
pub async fn add_itinerary_entry(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let cmd = itinerary_command(&trip_id, user.id, payload)?;
    let result = handlers.itinerary.add(cmd).await?;
    Ok(itinerary_response(result))
}

/// DELETE /api/trips/:trip_id/itinerary
pub async fn remove_itinerary_entry(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let cmd = itinerary_command(&trip_id, user.id, payload)?;
    let result = handlers.itinerary.remove(cmd).await?;
    Ok(itinerary_response(result))
}

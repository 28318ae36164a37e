//! HTTP handlers for activity endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    response::Response,
    Json,
};

use crate::adapters::http::envelope::{created, json_body, ok, parse_id, query_params, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::activity::{
    CreateActivityCommand, CreateActivityHandler, DeleteActivityCommand, DeleteActivityHandler,
    GetActivityHandler, GetActivityQuery, GetActivityWeatherHandler, GetActivityWeatherQuery,
    ListActivitiesHandler, ListActivitiesQuery, UpdateActivityCommand, UpdateActivityHandler,
};
use crate::domain::foundation::{ActivityId, TripId};

use super::dto::{
    ActivityResponse, CreateActivityRequest, ListActivitiesParams, UpdateActivityRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ActivityHandlers {
    pub create: Arc<CreateActivityHandler>,
    pub get: Arc<GetActivityHandler>,
    pub list: Arc<ListActivitiesHandler>,
    pub update: Arc<UpdateActivityHandler>,
    pub delete: Arc<DeleteActivityHandler>,
    pub weather: Arc<GetActivityWeatherHandler>,
}

fn ids(trip_id: &str, activity_id: &str) -> Result<(TripId, ActivityId), ApiError> {
    Ok((
        parse_id("tripId", trip_id)?,
        parse_id("activityId", activity_id)?,
    ))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/trips/:trip_id/activities
pub async fn list_activities(
    State(handlers): State<ActivityHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    params: Result<Query<ListActivitiesParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let filter = query_params(params)?.into_filter()?;

    let query = ListActivitiesQuery {
        trip_id,
        user_id: user.id,
        filter,
    };

    let activities = handlers.list.handle(query).await?;
    let response: Vec<ActivityResponse> = activities.iter().map(ActivityResponse::from).collect();
    Ok(ok(response))
}

/// POST /api/trips/:trip_id/activities
pub async fn create_activity(
    State(handlers): State<ActivityHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<CreateActivityRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let activity = json_body(payload)?.into_new_activity()?;

    let cmd = CreateActivityCommand {
        trip_id,
        user_id: user.id,
        activity,
    };

    let activity = handlers.create.handle(cmd).await?;
    Ok(created(ActivityResponse::from(&activity)))
}

/// GET /api/trips/:trip_id/activities/:activity_id
pub async fn get_activity(
    State(handlers): State<ActivityHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, activity_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let (trip_id, activity_id) = ids(&trip_id, &activity_id)?;

    let query = GetActivityQuery {
        trip_id,
        user_id: user.id,
        activity_id,
    };

    let activity = handlers.get.handle(query).await?;
    Ok(ok(ActivityResponse::from(&activity)))
}

/// PUT /api/trips/:trip_id/activities/:activity_id
pub async fn update_activity(
    State(handlers): State<ActivityHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, activity_id)): Path<(String, String)>,
    payload: Result<Json<UpdateActivityRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let (trip_id, activity_id) = ids(&trip_id, &activity_id)?;
    let update = json_body(payload)?.into_update()?;

    let cmd = UpdateActivityCommand {
        trip_id,
        user_id: user.id,
        activity_id,
        update,
    };

    let activity = handlers.update.handle(cmd).await?;
    Ok(ok(ActivityResponse::from(&activity)))
}

/// DELETE /api/trips/:trip_id/activities/:activity_id
pub async fn delete_activity(
    State(handlers): State<ActivityHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, activity_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let (trip_id, activity_id) = ids(&trip_id, &activity_id)?;

    let cmd = DeleteActivityCommand {
        trip_id,
        user_id: user.id,
        activity_id,
    };

    handlers.delete.handle(cmd).await?;
    Ok(ok(serde_json::json!({ "activityId": activity_id.to_string() })))
}

/// GET /api/trips/:trip_id/activities/:activity_id/weather
pub async fn get_activity_weather(
    State(handlers): State<ActivityHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, activity_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let (trip_id, activity_id) = ids(&trip_id, &activity_id)?;

    let query = GetActivityWeatherQuery {
        trip_id,
        user_id: user.id,
        activity_id,
    };

    let forecast = handlers.weather.handle(query).await?;
    Ok(ok(forecast))
}

//! HTTP handlers for packing endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    response::Response,
    Json,
};

use crate::adapters::http::envelope::{created, json_body, ok, parse_id, query_params, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::packing::{
    AddPackingItemCommand, AddPackingItemHandler, DeletePackingItemCommand,
    DeletePackingItemHandler, GenerateSuggestionsHandler, GenerateSuggestionsQuery,
    GetPackingListHandler, GetPackingListQuery, GetPackingProgressHandler,
    GetPackingProgressQuery, SetItemPackedCommand, SetItemPackedHandler,
    UpdatePackingListCommand, UpdatePackingListHandler,
};
use crate::domain::foundation::{DomainError, PackingItemId, TripId};
use crate::domain::packing::{PackingError, Priority};

use super::dto::{
    AddItemRequest, CategorySuggestionsResponse, ItemCategoryQuery, PackingItemResponse,
    PackingListResponse, PackingProgressResponse, SetPackedRequest, SuggestionsRequest,
    UpdatePackingListRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PackingHandlers {
    pub get_list: Arc<GetPackingListHandler>,
    pub update_list: Arc<UpdatePackingListHandler>,
    pub add_item: Arc<AddPackingItemHandler>,
    pub set_item_packed: Arc<SetItemPackedHandler>,
    pub delete_item: Arc<DeletePackingItemHandler>,
    pub get_progress: Arc<GetPackingProgressHandler>,
    pub suggestions: Arc<GenerateSuggestionsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/packing/:trip_id
pub async fn get_packing_list(
    State(handlers): State<PackingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Response, ApiError> {
    let query = GetPackingListQuery {
        trip_id: parse_id("tripId", &trip_id)?,
        user_id: user.id,
    };
    let list = handlers.get_list.handle(query).await?;
    Ok(ok(PackingListResponse::from(&list)))
}

/// POST|PUT /api/packing/:trip_id - Weather and special requirements
pub async fn update_packing_list(
    State(handlers): State<PackingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdatePackingListRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let req = json_body(payload)?;

    let cmd = UpdatePackingListCommand {
        trip_id,
        user_id: user.id,
        weather_considerations: req.weather_considerations,
        special_requirements: req.special_requirements,
    };

    let list = handlers.update_list.handle(cmd).await?;
    Ok(ok(PackingListResponse::from(&list)))
}

/// POST /api/packing/:trip_id/items
pub async fn add_item(
    State(handlers): State<PackingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let req = json_body(payload)?;

    let priority = match req.priority.as_deref() {
        Some(value) => Priority::parse(value)
            .map_err(|err| ApiError::from(PackingError::from(DomainError::from(err))))?,
        None => Priority::default(),
    };

    let cmd = AddPackingItemCommand {
        trip_id,
        user_id: user.id,
        category: req.category,
        name: req.name,
        quantity: req.quantity,
        notes: req.notes,
        priority,
    };

    let item = handlers.add_item.handle(cmd).await?;
    Ok(created(PackingItemResponse::from(&item)))
}

/// PUT /api/packing/:trip_id/items/:item_id - Set or toggle the packed flag
pub async fn set_item_packed(
    State(handlers): State<PackingHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, item_id)): Path<(String, String)>,
    payload: Result<Json<SetPackedRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let item_id: PackingItemId = parse_id("itemId", &item_id)?;
    let req = json_body(payload)?;

    let cmd = SetItemPackedCommand {
        trip_id,
        user_id: user.id,
        category: req.category,
        item_id,
        packed: req.is_packed,
    };

    let item = handlers.set_item_packed.handle(cmd).await?;
    Ok(ok(PackingItemResponse::from(&item)))
}

/// DELETE /api/packing/:trip_id/items/:item_id?category=
pub async fn delete_item(
    State(handlers): State<PackingHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, item_id)): Path<(String, String)>,
    params: Result<Query<ItemCategoryQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let item_id: PackingItemId = parse_id("itemId", &item_id)?;
    let params = query_params(params)?;

    let cmd = DeletePackingItemCommand {
        trip_id,
        user_id: user.id,
        category: params.category,
        item_id,
    };

    handlers.delete_item.handle(cmd).await?;
    Ok(ok(serde_json::json!({ "itemId": item_id.to_string() })))
}

/// GET /api/packing/:trip_id/progress
pub async fn get_progress(
    State(handlers): State<PackingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Response, ApiError> {
    let query = GetPackingProgressQuery {
        trip_id: parse_id("tripId", &trip_id)?,
        user_id: user.id,
    };
    let progress = handlers.get_progress.handle(query).await?;
    Ok(ok(PackingProgressResponse::from(&progress)))
}

/// POST /api/packing/:trip_id/suggestions
pub async fn generate_suggestions(
    State(handlers): State<PackingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<SuggestionsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let req = json_body(payload)?;

    let query = GenerateSuggestionsQuery {
        trip_id,
        user_id: user.id,
        duration_days: req.duration_days,
        weather: req.weather,
        activities: req.activities,
    };

    let suggestions = handlers.suggestions.handle(query).await?;
    let response: Vec<CategorySuggestionsResponse> =
        suggestions.iter().map(CategorySuggestionsResponse::from).collect();
    Ok(ok(response))
}

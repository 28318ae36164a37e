//! JSON envelope shared by every endpoint.
//!
//! Success: `{ "success": true, "data": ... }`.
//! Failure: `{ "success": false, "error": { "code", "message", "details"? } }`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

use crate::domain::activity::ActivityError;
use crate::domain::budget::BudgetError;
use crate::domain::foundation::ErrorCode;
use crate::domain::packing::PackingError;
use crate::domain::trip::TripError;

/// Response body wrapper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Error part of the envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// 200 with the data wrapped in the envelope.
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 201 with the data wrapped in the envelope.
pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::success(data))).into_response()
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidCategory => StatusCode::BAD_REQUEST,
        ErrorCode::TripNotFound
        | ErrorCode::BudgetNotFound
        | ErrorCode::PackingListNotFound
        | ErrorCode::PackingItemNotFound
        | ErrorCode::ExpenseNotFound
        | ErrorCode::ActivityNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorCode::ConsistencyViolation
        | ErrorCode::PartialCascadeFailure
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// An error response: status plus envelope body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: status_for(code),
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.body.details = Some(details);
        self
    }

    /// 400 naming the offending field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_details(json!({ "field": field }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Builds from a module error's code and message. Infrastructure
    /// messages are logged and replaced with a generic one.
    fn from_parts(code: ErrorCode, message: String, details: Option<Value>) -> Self {
        let status = status_for(code);
        let message = if matches!(code, ErrorCode::DatabaseError | ErrorCode::InternalError) {
            tracing::error!(code = %code, error = %message, "Request failed");
            "Internal server error".to_string()
        } else {
            message
        };
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope: ApiResponse<()> = ApiResponse {
            success: false,
            data: None,
            error: Some(self.body),
        };
        (self.status, Json(envelope)).into_response()
    }
}

fn validation_details(field: &str) -> Option<Value> {
    Some(json!({ "field": field }))
}

fn category_details(name: &str) -> Option<Value> {
    Some(json!({ "category": name }))
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        let details = match &err {
            TripError::ValidationFailed { field, .. } => validation_details(field),
            TripError::PartialCascadeFailure { remaining, .. } => {
                Some(json!({ "remaining": remaining }))
            }
            _ => None,
        };
        Self::from_parts(err.code(), err.message(), details)
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        let details = match &err {
            BudgetError::ValidationFailed { field, .. } => validation_details(field),
            BudgetError::InvalidCategory(name) => category_details(name),
            _ => None,
        };
        Self::from_parts(err.code(), err.message(), details)
    }
}

impl From<PackingError> for ApiError {
    fn from(err: PackingError) -> Self {
        let details = match &err {
            PackingError::ValidationFailed { field, .. } => validation_details(field),
            PackingError::InvalidCategory(name) => category_details(name),
            _ => None,
        };
        Self::from_parts(err.code(), err.message(), details)
    }
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        let details = match &err {
            ActivityError::ValidationFailed { field, .. } => validation_details(field),
            ActivityError::InvalidCategory(name) => category_details(name),
            _ => None,
        };
        Self::from_parts(err.code(), err.message(), details)
    }
}

/// Unwraps a JSON body, turning axum's plain-text rejection into the envelope.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::validation("body", rejection.body_text()))
}

/// Unwraps query parameters the same way as [`json_body`].
pub fn query_params<T>(
    params: Result<axum::extract::Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    params
        .map(|axum::extract::Query(query)| query)
        .map_err(|rejection| ApiError::validation("query", rejection.body_text()))
}

/// Parses a path or body identifier.
pub fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(field, format!("'{}' is not a valid id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TripId;

    #[test]
    fn not_found_family_maps_to_404() {
        for code in [
            ErrorCode::TripNotFound,
            ErrorCode::BudgetNotFound,
            ErrorCode::PackingItemNotFound,
            ErrorCode::ExpenseNotFound,
            ErrorCode::ActivityNotFound,
        ] {
            assert_eq!(status_for(code), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        assert_eq!(status_for(ErrorCode::UpstreamUnavailable), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_category_carries_the_name() {
        let err = ApiError::from(BudgetError::InvalidCategory("spa".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "INVALID_CATEGORY");
        assert_eq!(err.body.details, Some(json!({ "category": "spa" })));
    }

    #[test]
    fn infrastructure_message_is_not_exposed() {
        let err = ApiError::from(TripError::infrastructure("connection reset by peer"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.message, "Internal server error");
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = ApiError::from(TripError::forbidden());
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.body.code, "FORBIDDEN");
    }

    #[test]
    fn success_envelope_omits_error() {
        let value = serde_json::to_value(ApiResponse::success(json!({ "id": 1 }))).unwrap();
        assert_eq!(value["success"], json!(true));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id::<TripId>("tripId", "not-a-uuid").is_err());
        let id = TripId::new();
        assert_eq!(parse_id::<TripId>("tripId", &id.to_string()).unwrap(), id);
    }
}

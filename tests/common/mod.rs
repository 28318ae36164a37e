//! Shared harness: the full router over the in-memory store and mock
//! collaborators.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use trip_planner::adapters::auth::MockSessionValidator;
use trip_planner::adapters::exchange_rate::MockExchangeRateProvider;
use trip_planner::adapters::http::{build_router, ApiSettings, AppServices};
use trip_planner::adapters::weather::MockWeatherProvider;
use trip_planner::adapters::MemoryStore;
use trip_planner::domain::foundation::UserId;

pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub rates: MockExchangeRateProvider,
    pub weather: MockWeatherProvider,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_collaborators(
            MockExchangeRateProvider::new().with_rate("EUR", "USD", dec!(1.08)),
            MockWeatherProvider::new(),
        )
    }

    pub fn with_collaborators(rates: MockExchangeRateProvider, weather: MockWeatherProvider) -> Self {
        let store = MemoryStore::new();
        let sessions = MockSessionValidator::new()
            .with_test_user(ALICE, UserId::new("alice").unwrap())
            .with_test_user(BOB, UserId::new("bob").unwrap());

        let services = AppServices {
            trips: Arc::new(store.clone()),
            budgets: Arc::new(store.clone()),
            packing: Arc::new(store.clone()),
            activities: Arc::new(store.clone()),
            exchange_rates: Arc::new(rates.clone()),
            weather: Arc::new(weather.clone()),
            sessions: Arc::new(sessions),
        };

        Self {
            router: build_router(services, ApiSettings::default()),
            store,
            rates,
            weather,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Creates a four-day trip owned by `token` and returns its id.
    pub async fn create_trip(&self, token: &str, title: &str) -> String {
        let (status, body) = self
            .post(
                "/api/trips",
                token,
                json!({
                    "title": title,
                    "startDate": "2026-06-01",
                    "endDate": "2026-06-04",
                    "destinations": ["lisbon"],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Creates an activity on day 1 of the trip and returns its id.
    pub async fn create_activity(&self, token: &str, trip_id: &str, coordinates: bool) -> String {
        let mut location = json!({ "address": "Praça do Comércio" });
        if coordinates {
            location["coordinates"] = json!({ "latitude": 38.707, "longitude": -9.136 });
        }
        let (status, body) = self
            .post(
                &format!("/api/trips/{}/activities", trip_id),
                token,
                json!({
                    "day": 1,
                    "name": "Walking tour",
                    "location": location,
                    "startTime": "09:00",
                    "endTime": "11:00",
                    "cost": 25,
                    "category": "cultural",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

pub fn number(value: &Value) -> f64 {
    value.as_f64().unwrap()
}

//! GetActivityWeatherHandler - Forecast for an activity's location.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::activity::ActivityError;
use crate::domain::foundation::{ActivityId, TripId, UserId};
use crate::ports::{ActivityRepository, TripRepository, WeatherForecast, WeatherProvider};

/// Query for the weather at an activity.
#[derive(Debug, Clone)]
pub struct GetActivityWeatherQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub activity_id: ActivityId,
}

/// Handler for activity weather. The activity is only read.
pub struct GetActivityWeatherHandler {
    trips: Arc<dyn TripRepository>,
    activities: Arc<dyn ActivityRepository>,
    weather: Arc<dyn WeatherProvider>,
}

impl GetActivityWeatherHandler {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        activities: Arc<dyn ActivityRepository>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            trips,
            activities,
            weather,
        }
    }

    pub async fn handle(&self, query: GetActivityWeatherQuery) -> Result<WeatherForecast, ActivityError> {
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;
        let activity = self
            .activities
            .find_by_id(&query.trip_id, &query.activity_id)
            .await?
            .ok_or(ActivityError::NotFound(query.activity_id))?;

        let coordinates = activity.location().coordinates.ok_or_else(|| {
            ActivityError::validation(
                "location.coordinates",
                "Activity location has no coordinates",
            )
        })?;

        let forecast = self.weather.forecast(coordinates).await.map_err(|err| {
            tracing::error!(
                trip_id = %query.trip_id,
                activity_id = %query.activity_id,
                error = %err,
                "Weather lookup failed"
            );
            ActivityError::upstream(err.to_string())
        })?;

        tracing::debug!(
            activity_id = %query.activity_id,
            entries = forecast.entries.len(),
            "Weather fetched"
        );
        Ok(forecast)
    }
}

//! Activity manager command and query handlers.

mod create_activity;
mod delete_activity;
mod get_activity;
mod get_weather;
mod list_activities;
mod update_activity;

pub use create_activity::{CreateActivityCommand, CreateActivityHandler};
pub use delete_activity::{DeleteActivityCommand, DeleteActivityHandler};
pub use get_activity::{GetActivityHandler, GetActivityQuery};
pub use get_weather::{GetActivityWeatherHandler, GetActivityWeatherQuery};
pub use list_activities::{ListActivitiesHandler, ListActivitiesQuery};
pub use update_activity::{UpdateActivityCommand, UpdateActivityHandler};

//! Service entry point: configuration, tracing, adapter wiring and serve.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use trip_planner::adapters::auth::{JwtConfig, JwtSessionValidator};
use trip_planner::adapters::exchange_rate::{HttpExchangeRateConfig, HttpExchangeRateProvider};
use trip_planner::adapters::http::{build_router, ApiSettings, AppServices};
use trip_planner::adapters::memory::MemoryStore;
use trip_planner::adapters::postgres::{
    self, PostgresActivityRepository, PostgresBudgetRepository, PostgresPackingRepository,
    PostgresTripRepository,
};
use trip_planner::adapters::weather::{OpenWeatherConfig, OpenWeatherProvider};
use trip_planner::config::{AppConfig, LogFormat, ServerConfig};
use trip_planner::ports::{
    ActivityRepository, BudgetRepository, PackingRepository, SessionValidator, TripRepository,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

struct Repositories {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
    packing: Arc<dyn PackingRepository>,
    activities: Arc<dyn ActivityRepository>,
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match server.log_format() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(e) = result {
        tracing::warn!(error = %e, "tracing init failed");
    }
}

async fn repositories(config: &AppConfig) -> Result<Repositories, BoxError> {
    let Some(url) = config.database.url() else {
        tracing::warn!("No database URL configured, using the in-memory store");
        let store = Arc::new(MemoryStore::new());
        return Ok(Repositories {
            trips: store.clone(),
            budgets: store.clone(),
            packing: store.clone(),
            activities: store,
        });
    };

    let pool = postgres::connect(url, &config.database).await?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(Repositories {
        trips: Arc::new(PostgresTripRepository::new(pool.clone())),
        budgets: Arc::new(PostgresBudgetRepository::new(pool.clone())),
        packing: Arc::new(PostgresPackingRepository::new(pool.clone())),
        activities: Arc::new(PostgresActivityRepository::new(pool)),
    })
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);
    if config.is_production() && config.server.cors_origins().is_empty() {
        tracing::warn!("No CORS origins configured, any browser origin is allowed");
    }

    let repos = repositories(&config).await?;

    let collaborators = &config.collaborators;
    let exchange_rates = HttpExchangeRateProvider::new(
        HttpExchangeRateConfig::new(collaborators.exchange_rate_base_url.clone())
            .with_timeout(collaborators.timeout()),
    )?;
    let weather_key = match &collaborators.weather_api_key {
        Some(key) => key.clone(),
        None => {
            tracing::warn!("No weather API key configured, weather lookups will fail");
            String::new()
        }
    };
    let weather = OpenWeatherProvider::new(
        OpenWeatherConfig::new(weather_key)
            .with_base_url(collaborators.weather_base_url.clone())
            .with_timeout(collaborators.timeout()),
    )?;

    let mut jwt =
        JwtConfig::new(config.auth.jwt_secret.clone()).with_leeway(config.auth.leeway());
    if let Some(issuer) = &config.auth.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }
    let sessions: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(jwt));

    let services = AppServices {
        trips: repos.trips,
        budgets: repos.budgets,
        packing: repos.packing,
        activities: repos.activities,
        exchange_rates: Arc::new(exchange_rates),
        weather: Arc::new(weather),
        sessions,
    };
    let settings = ApiSettings {
        activity_rules: config.features.activity_rules(),
        default_target_currency: collaborators.default_target()?,
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins(),
    };
    let app = build_router(services, settings);

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Trip planner listening");
    axum::serve(listener, app).await?;

    Ok(())
}

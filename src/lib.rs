//! # sambokid: Sports School Management Backend
//!
//! Backend service for a sports-school management application: training
//! groups, student onboarding, attendance tracking with automatic balance
//! deduction, and a payment ledger.
//!
//! ## Overview
//!
//! The service exposes a small JSON API consumed by the school's dashboard.
//! Trainers submit attendance sheets per group and date; every student on
//! the roster gets an attendance row and every present student is charged
//! the group's session cost against their balance, with a matching entry on
//! an append-only transaction ledger. Administrators onboard students
//! (generating one-time credentials), manage groups, and record payments.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL (via SQLx) for all persistence.
//! Requests are handled statelessly over a shared connection pool; the
//! multi-statement write paths (attendance sweeps, payments, onboarding)
//! each run inside a single SQL transaction, so a mid-sequence failure
//! never leaves a roster partially charged or a balance without its ledger
//! row.
//!
//! The **API layer** ([`api`]) defines explicit request/response DTOs per
//! endpoint and the Axum handlers behind `/api/v1/*`. The **database
//! layer** ([`db`]) uses the repository pattern: each entity has a
//! repository wrapping a connection, which composes with transactions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use sambokid::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = sambokid::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     sambokid::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{auth::password, config::CorsOrigin, db::models::users::Role, openapi::ApiDoc, types::UserId};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the sambokid database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// Idempotent: creates the admin identity on first startup, or updates its
/// password when one is configured. Returns the admin's user id.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(admin: &config::AdminConfig, db: &PgPool) -> anyhow::Result<UserId> {
    let password_hash = match admin.password.as_deref() {
        Some(pwd) => Some(password::hash_string(pwd).map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?),
        None => None,
    };

    let mut tx = db.begin().await?;

    let existing: Option<UserId> = sqlx::query_scalar("SELECT id FROM users WHERE login = $1")
        .bind(&admin.login)
        .fetch_optional(&mut *tx)
        .await?;

    if let Some(id) = existing {
        // User exists - update password if provided
        if let Some(hash) = password_hash {
            sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
                .bind(&hash)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        return Ok(id);
    }

    let id: UserId = sqlx::query_scalar(
        r#"
        INSERT INTO users (login, password_hash, role, full_name)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&admin.login)
    .bind(&password_hash)
    .bind(Role::Admin)
    .bind(&admin.full_name)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(login = %admin.login, "Created initial admin user");
    Ok(id)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let wildcard = config.cors.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard));
    if wildcard {
        cors = cors.allow_origin(Any);
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        cors = cors.allow_origin(origins);
    }

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route(
            "/groups",
            get(api::handlers::groups::list_groups).post(api::handlers::groups::create_group),
        )
        .route(
            "/students",
            get(api::handlers::students::list_students).post(api::handlers::students::create_student),
        )
        .route(
            "/attendance",
            get(api::handlers::attendance::list_attendance).post(api::handlers::attendance::record_attendance),
        )
        .route(
            "/transactions",
            get(api::handlers::transactions::list_transactions).post(api::handlers::transactions::create_transaction),
        )
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // CORS first, tracing outermost
    let router = router.layer(create_cors_layer(&state.config)?).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the pool, runs migrations,
///    and ensures the initial admin user exists
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application reusing an existing pool (used by tests)
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        let pool = match pool {
            Some(pool) => pool,
            None => {
                let settings = &config.database.pool;
                let mut options = PgPoolOptions::new()
                    .max_connections(settings.max_connections)
                    .min_connections(settings.min_connections)
                    .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs));
                if settings.idle_timeout_secs > 0 {
                    options = options.idle_timeout(Duration::from_secs(settings.idle_timeout_secs));
                }
                if settings.max_lifetime_secs > 0 {
                    options = options.max_lifetime(Duration::from_secs(settings.max_lifetime_secs));
                }
                options.connect(&config.database.url).await?
            }
        };

        migrator().run(&pool).await?;

        create_initial_admin_user(&config.admin, &pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create initial admin user: {e}"))?;

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Listening on http://{bind_addr}");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

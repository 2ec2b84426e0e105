//! GameReady Backend
//!
//! A REST backend for daily athlete wellness tracking: readiness reports,
//! team schedules and coach dashboards over SQLite persistence.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod readiness;
mod upload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GameReady Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Media path: {:?}", config.media_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (GAMEREADY_API_PSK). Authentication is disabled!");
    }

    // Initialize database and media storage
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));
    tokio::fs::create_dir_all(&config.media_path).await?;

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Users & profiles
        .route("/users", get(api::list_users))
        .route("/users", post(api::create_user))
        .route("/users/{id}", get(api::get_user))
        .route("/users/{id}", put(api::update_user))
        .route("/users/{id}", delete(api::delete_user))
        .route("/users/{id}/status", put(api::set_user_status))
        .route("/users/{id}/reports", get(api::list_reports))
        .route("/users/{id}/overview", get(api::player_overview))
        .route("/users/{id}/labels", get(api::list_labels))
        .route("/users/{id}/labels", post(api::create_label))
        .route("/users/{id}/labels/{date}", put(api::update_label))
        .route("/users/{id}/labels/{date}", delete(api::delete_label))
        // Teams
        .route("/teams", get(api::list_teams))
        .route("/teams", post(api::create_team))
        .route("/teams/join", post(api::join_team))
        .route("/teams/{id}", get(api::get_team))
        .route("/teams/{id}", put(api::update_team))
        .route("/teams/{id}", delete(api::delete_team))
        .route("/teams/{id}/join-code", post(api::regenerate_join_code))
        .route("/teams/{id}/athletes", get(api::list_team_athletes))
        .route("/teams/{id}/logo", post(api::upload_team_logo))
        // Tags
        .route("/teams/{id}/tags", get(api::list_tags))
        .route("/teams/{id}/tags", post(api::create_tag))
        .route("/teams/{id}/tags/{tag_id}", put(api::update_tag))
        .route("/teams/{id}/tags/{tag_id}", delete(api::delete_tag))
        // Schedule & calendar
        .route("/teams/{id}/schedule", get(api::get_schedule))
        .route("/teams/{id}/schedule/day", put(api::set_day_tag))
        .route("/teams/{id}/schedule/resolve", get(api::resolve_day))
        .route("/teams/{id}/calendar", get(api::get_calendar))
        .route("/teams/{id}/dashboard", get(api::coach_dashboard))
        // Reports
        .route("/reports", post(api::create_report))
        .route("/reports/{id}", get(api::get_report))
        .route("/reports/{id}", put(api::update_report))
        .route("/reports/{id}", delete(api::delete_report))
        // Feature requests
        .route("/feature-requests", get(api::list_feature_requests))
        .route("/feature-requests", post(api::create_feature_request))
        .route("/feature-requests/{id}", get(api::get_feature_request))
        .route(
            "/feature-requests/{id}/status",
            put(api::update_feature_status),
        )
        .route("/feature-requests/{id}/upvote", post(api::toggle_upvote))
        .route("/feature-requests/{id}/comments", get(api::list_comments))
        .route("/feature-requests/{id}/comments", post(api::create_comment))
        // Logo uploads exceed the default body limit
        .layer(DefaultBodyLimit::max(upload::MAX_FILE_SIZE + 64 * 1024))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;

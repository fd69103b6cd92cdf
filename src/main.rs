use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use axum::Router;
use axum::routing::{get, post};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::auth::SessionService;
use crate::config::Config;

mod api;
mod auth;
mod config;
mod db;
mod middleware;
mod models;
#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: SessionService,
    pub platform: String,
    pub hits: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            sessions: SessionService::new(pool.clone(), &config.signing_key, &config.polka_key),
            platform: config.platform.clone(),
            hits: Arc::new(AtomicU64::new(0)),
            pool,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    // Create a CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public API plus the static fileserver, both behind the hit counter
    let api = Router::new()
        .route(
            "/api/chirps",
            post(api::chirps::create_chirp).get(api::chirps::get_chirps),
        )
        .route(
            "/api/chirps/:chirp_id",
            get(api::chirps::get_chirp).delete(api::chirps::delete_chirp),
        )
        .route(
            "/api/users",
            post(api::users::create_user).put(api::users::update_user),
        )
        .route("/api/login", post(api::auth::login))
        .route("/api/refresh", post(api::auth::refresh))
        .route("/api/revoke", post(api::auth::revoke))
        .route("/api/polka/webhooks", post(api::webhooks::polka_webhook))
        .route("/api/healthz", get(api::admin::readiness))
        .nest_service("/app", ServeDir::new("."))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::metrics::track_hits,
        ));

    let admin = Router::new()
        .route("/admin/metrics", get(api::admin::metrics))
        .route("/admin/reset", post(api::admin::reset));

    api.merge(admin).layer(cors).with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    // Initialize database
    let pool = db::create_db_pool(&config.database_url).await;

    // Create the router
    let state = AppState::new(pool, &config);
    let app = create_router(state);

    // run it with hyper
    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request handling goes through
//! `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;

use auth::{AuthAppState, PgUserRepository, attach_identity, auth_router};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use kernel::error::{app_error::AppResult, app_error::ResultExt, kind::ErrorKind};
use music::{MusicAppState, MusicConfig, PgMusicRepository, S3Presigner, music_router};
use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,music=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_state = AuthAppState::new(PgUserRepository::new(pool.clone()), config.auth_config())?;
    let identity_state = auth_state.identity_state();

    let mut api = Router::new()
        .route("/health", get(health))
        .with_state(pool.clone())
        .nest("/auth", auth_router(auth_state));

    match config.storage.clone() {
        Some(storage) => {
            let presigner = S3Presigner::connect(storage.bucket).await;
            let music_state = MusicAppState::new(
                PgMusicRepository::new(pool.clone()),
                presigner,
                MusicConfig::new(storage.cdn_base_url),
            );
            api = api.nest("/music", music_router(music_state));
        }
        None => {
            tracing::warn!("Upload storage not configured, music routes disabled");
        }
    }

    let app = Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(identity_state, attach_identity))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health(State(pool): State<PgPool>) -> AppResult<Json<HealthResponse>> {
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_app_err(ErrorKind::ServiceUnavailable, "Database unavailable")?;

    Ok(Json(HealthResponse { status: "ok" }))
}

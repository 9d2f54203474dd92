//! Router and handlers for the mock API surface

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use deskmate_common::api::{ApiError, CommandAck, CommandRequest, HealthReminder, Schedule};

use crate::static_files::StaticAssets;

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the SPA bundle served at `/`.
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("client"),
        }
    }
}

/// Build the application router.
///
/// Every handler is a pure function of its request; the only state threaded
/// through the router is the static asset directory.
pub fn router(cfg: AppConfig) -> Router {
    let assets = Arc::new(StaticAssets::new(cfg.static_dir));

    Router::new()
        .route("/api/schedule", get(schedule_handler))
        .route("/api/health", get(health_handler))
        .route("/api/tuya/command", post(tuya_command_handler))
        .route("/", get(index_handler))
        // SPA routing: unmatched paths fall back to the entry file
        .fallback(spa_fallback_handler)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(assets)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, cfg: AppConfig) -> anyhow::Result<()> {
    info!("Deskmate mock server starting on http://{}", addr);
    info!("  GET  /api/schedule      calendar events (mock)");
    info!("  GET  /api/health        health reminders (mock)");
    info!("  POST /api/tuya/command  device control (mock)");
    info!("  Static UI: http://{}/", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(cfg)).await?;

    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

async fn schedule_handler() -> impl IntoResponse {
    debug!("GET /api/schedule");
    Json(Schedule::mock())
}

async fn health_handler() -> impl IntoResponse {
    debug!("GET /api/health");
    Json(HealthReminder::mock())
}

/// Command dispatch. A missing body, a body that is not valid JSON for
/// [`CommandRequest`] and a body without a usable command all produce the
/// same fixed 400 response.
async fn tuya_command_handler(body: Option<Json<CommandRequest>>) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    match dispatch_command(req) {
        Ok(ack) => {
            info!(
                "POST /api/tuya/command - Command: {}, Device: {}",
                ack.command, ack.device_id
            );
            (StatusCode::OK, Json(ack)).into_response()
        }
        Err(err) => {
            debug!("POST /api/tuya/command rejected: {}", err.message);
            (StatusCode::BAD_REQUEST, Json(err)).into_response()
        }
    }
}

/// Validate and echo a device command. The mock tracks no device state, so
/// the only failure is an absent or empty command.
fn dispatch_command(req: CommandRequest) -> Result<CommandAck, ApiError> {
    match req.command {
        Some(command) if !command.is_empty() => Ok(CommandAck::echo(command, req.device_id)),
        _ => Err(ApiError::command_required()),
    }
}

async fn index_handler(State(assets): State<Arc<StaticAssets>>) -> Response {
    assets.index().await
}

async fn spa_fallback_handler(State(assets): State<Arc<StaticAssets>>, uri: Uri) -> Response {
    assets.serve(uri.path()).await
}

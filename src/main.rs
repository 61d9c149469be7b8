use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use netdisk_bot::{config::Config, handler, AppState};

#[derive(Debug, Deserialize)]
struct MessageRequest {
    message: String,
    user_id: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    /// `None` when the message is not addressed to the bot.
    reply: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Starting netdisk search bot");
    info!("API base URL: {}", config.api_base_url);
    info!("Database: {}", config.db_path.display());

    let state = Arc::new(AppState::new(config)?);

    // Build router
    let app = Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/message", post(message_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
    info!("netdisk-bot listening on http://0.0.0.0:5000");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "netdisk-bot",
        "version": "0.1.0"
    }))
}

/// Host-framework adapter: one chat message event in, one optional reply out.
async fn message_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let reply = handler::handle(&state, &request.message, &request.user_id).await;
    Json(MessageResponse { reply })
}

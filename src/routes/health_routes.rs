use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Estado del servicio y del almacenamiento
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.repository.ping().await?;

    Ok(Json(json!({
        "status": "ok",
        "store": state.repository.backend(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

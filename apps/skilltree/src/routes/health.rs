use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which extraction paths are live.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skilltree",
        "ai_enabled": state.config.xai_api_key.is_some(),
        "lexicon_skills": state.lexicon.len(),
    }))
}

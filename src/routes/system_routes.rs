use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::config::AppConfig;
use crate::state::store::SharedStore;

#[derive(Clone)]
struct SystemState {
    version: String,
    store: SharedStore,
}

pub fn routes(config: &AppConfig, store: SharedStore) -> Router {
    Router::new()
        .route("/alive", get(is_alive))
        .route("/version", get(version))
        .route("/status", get(status))
        .with_state(SystemState {
            version: config.server_version.clone(),
            store,
        })
}

/// GET /system/alive
async fn is_alive() -> &'static str {
    "OK"
}

/// GET /system/version
async fn version(State(state): State<SystemState>) -> Json<serde_json::Value> {
    Json(json!({
        "version": state.version
    }))
}

/// GET /system/status
async fn status(State(state): State<SystemState>) -> Json<serde_json::Value> {
    Json(json!({
        "records": state.store.len(),
        "data_file": state.store.path().display().to_string(),
    }))
}

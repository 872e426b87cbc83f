use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{data_routes, system_routes};
use crate::state::store::SharedStore;

/// Build the complete Axum application:
/// - /create-data, /get-data, /update-data, /delete-data (record CRUD)
/// - /system   (alive, version, record count)
pub fn build_app(store: SharedStore, cfg: &AppConfig) -> Router {
    Router::new()
        .merge(data_routes::routes(store.clone()))

        // /system/*
        .nest("/system", system_routes::routes(cfg, store))

        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

// src/routes/mod.rs
pub mod chat;

use crate::config::Config;
use crate::state::SharedState;
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use chat::{chat_handler, status_handler};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(config: &Config) -> Router<SharedState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/", get(status_handler))
        .route("/health", get(|| async { "OK" }));

    for path in &config.chat_routes {
        router = router.route(path, post(chat_handler));
    }

    if let Some(dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

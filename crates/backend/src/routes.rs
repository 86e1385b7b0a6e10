use axum::{routing::get, Router};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A002 Recycling items
        .route("/api/items", get(handlers::a002_recycling_item::list_all))
        // A001 Collection points
        .route(
            "/api/points",
            get(handlers::a001_collection_point::list).post(handlers::a001_collection_point::create),
        )
        .route(
            "/api/points/:id",
            get(handlers::a001_collection_point::get_by_id),
        )
}

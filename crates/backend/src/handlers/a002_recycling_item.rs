use axum::Json;

use crate::domain::a002_recycling_item;
use crate::shared::{config, data::db::get_connection};

/// GET /api/items
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a002_recycling_item::aggregate::RecyclingItem>>,
    axum::http::StatusCode,
> {
    let public_url = &config::current().server.public_url;
    match a002_recycling_item::service::list_all(get_connection(), public_url).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list recycling items: {:#}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

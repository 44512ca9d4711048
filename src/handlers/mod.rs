pub mod products;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::{db, error::AppResult, AppState};

/// Static description of the service and the endpoints it serves.
pub async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "message": "ERP System API",
        "version": "1.0",
        "endpoints": {
            "GET /api/products": "Get all products",
            "POST /api/products": "Create a product",
            "GET /api/health": "Health check",
        },
    }))
}

pub async fn health(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    db::ping(&state.connect_options).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "status": "healthy", "database": "connected" })),
    ))
}

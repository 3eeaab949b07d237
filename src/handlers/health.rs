use axum::Json;
use serde_json::{Value, json};

use crate::types::envelope::ApiSuccess;

/// GET /health
pub async fn health_handler() -> Json<ApiSuccess<Value>> {
    Json(ApiSuccess::new(json!({ "status": "ok" })))
}

pub mod inventories;

use axum::{
    extract::rejection::PathRejection,
    extract::Path,
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::error::{AppError, AppResult};

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": "inventory-service" })))
}

pub fn path_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

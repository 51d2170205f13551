pub mod products;

use axum::{
    extract::rejection::PathRejection,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde_json::json;

use crate::error::{AppError, AppResult};

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": "product-service" })))
}

/// `http://<host>` taken from the request, empty when no `Host` header was sent
/// so links degrade to absolute paths.
pub fn request_origin(headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_default()
}

pub fn path_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

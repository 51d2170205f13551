use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{IntoResponse, Response},
};
use jsonapi_envelope::{Document, JsonApi, JsonApiBody, RequestDocument};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    handlers::path_id,
    models::QuantityPayload,
    AppState,
};

// ── Details ───────────────────────────────────────────────────────────────────

pub async fn get_inventory_details(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Response> {
    let product_id = path_id(path)?;
    let details = state
        .inventory
        .get_inventory_details(product_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Product not found with id {product_id}"))
        })?;

    Ok(JsonApi(Document::single(&details)).into_response())
}

// ── Quantity ──────────────────────────────────────────────────────────────────

pub async fn update_inventory_quantity(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    JsonApiBody(body): JsonApiBody<RequestDocument<QuantityPayload>>,
) -> AppResult<Response> {
    let product_id = path_id(path)?;
    let quantity = body
        .into_attributes()
        .and_then(|payload| payload.quantity)
        .ok_or_else(|| {
            AppError::BadRequest(
                "Quantity attribute is missing or invalid in request body.".to_string(),
            )
        })?;

    let row = state
        .inventory
        .update_inventory_quantity(product_id, quantity)
        .await?;

    info!(id = row.id, product_id, quantity = row.quantity, "Updated inventory quantity");

    Ok(JsonApi(Document::single(&row)).into_response())
}

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use jsonapi_envelope::{Document, JsonApi, JsonApiBody, RequestDocument};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    handlers::{path_id, request_origin},
    models::{CreateProduct, PageParams, PageRequest, ProductPayload, UpdateProduct},
    AppState,
};

pub const COLLECTION_PATH: &str = "/api/v1/products";

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Product not found with id {id}"))
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = PageRequest::try_from(params)?;

    let page = state.products.list(request).await?;

    info!(
        page = request.page,
        size = request.size,
        total_elements = page.total_elements,
        "Listed products"
    );

    let base = format!("{}{}", request_origin(&headers), COLLECTION_PATH);
    let doc = Document::collection(&page.items)
        .with_links(page.links(&base))
        .with_meta(page.meta());

    Ok(JsonApi(doc).into_response())
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonApiBody(body): JsonApiBody<RequestDocument<ProductPayload>>,
) -> AppResult<Response> {
    let payload = body.into_attributes().ok_or_else(|| {
        AppError::BadRequest("Product data is missing from request body.".to_string())
    })?;
    let new_product = CreateProduct::try_from(payload)?;

    let product = state.products.insert(&new_product).await?;

    info!(id = product.id, name = %product.name, "Created product");

    let location = format!("{}{}/{}", request_origin(&headers), COLLECTION_PATH, product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        JsonApi(Document::single(&product)),
    )
        .into_response())
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Response> {
    let id = path_id(path)?;
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(id, "Fetched product");

    Ok(JsonApi(Document::single(&product)).into_response())
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    JsonApiBody(body): JsonApiBody<RequestDocument<ProductPayload>>,
) -> AppResult<Response> {
    let id = path_id(path)?;

    if body.id_text().as_deref() != Some(id.to_string().as_str()) {
        return Err(AppError::BadRequest(
            "Resource ID in payload must match path ID or be present and valid.".to_string(),
        ));
    }
    let payload = body.into_attributes().ok_or_else(|| {
        AppError::BadRequest("Product data is missing from request body.".to_string())
    })?;
    let changes = UpdateProduct::try_from(payload)?;

    let product = state
        .products
        .update(id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(id, "Updated product");

    Ok(JsonApi(Document::single(&product)).into_response())
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = path_id(path)?;
    if !state.products.delete(id).await? {
        return Err(not_found(id));
    }

    info!(id, "Deleted product");

    Ok(StatusCode::NO_CONTENT)
}

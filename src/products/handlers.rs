use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    products::{
        dto::{CreateProductRequest, ProductListResponse, UpdateProductRequest},
        query::{parse_sort, ListQuery, Pagination},
        repo::Product,
    },
    state::AppState,
};

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let pg = Pagination::from_query(query.page, query.limit);
    let sort = parse_sort(query.sort_by.as_deref());
    let data = Product::list(&state.db, &query, sort, pg).await?;
    let total = Product::count(&state.db).await?;
    Ok(Json(ProductListResponse {
        total,
        page: pg.page,
        pages: pg.pages(total),
        data,
    }))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = Product::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    Ok(Json(product))
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    payload.validate()?;
    let product = Product::create(&state.db, &payload).await?;
    info!(product_id = %product.id, name = %product.name, "product created");
    Ok(Json(product))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    payload.validate()?;
    let product = Product::update(&state.db, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    info!(product_id = %product.id, "product updated");
    Ok(Json(product))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !Product::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Product"));
    }
    info!(product_id = %id, "product deleted");
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

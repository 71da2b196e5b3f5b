// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use crate::dtos::product::{
    CreateProductRequest, ProductQuery, ProductResponse, UpdateProductRequest,
};
use crate::state::AppState;
use crate::error::AppError;
use tracing::{error, instrument};

// GET /products - List products with optional price bounds
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match state.usecase.query(query.price_min, query.price_max).await {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e)
        }
    }
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.usecase.get(id).await?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state.usecase.create(payload).await.map_err(|e| {
        error!(?e, "Failed to insert product");
        e
    })?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PATCH /products/:id - Partial update
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.usecase.update(id, payload).await?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.usecase.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub status: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub status: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Convert from Model to Response DTO
impl From<crate::models::product::ProductModel> for ProductResponse {
    fn from(product: crate::models::product::ProductModel) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
            price: product.price,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

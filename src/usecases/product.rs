// src/usecases/product.rs
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::dtos::product::{CreateProductRequest, UpdateProductRequest};
use crate::error::AppError;
use crate::models::product::ProductModel;

/// Data-access layer for the `products` collection.
///
/// The collection handle is injected at construction, so tests and callers
/// decide which database the usecase talks to.
#[derive(Clone)]
pub struct ProductUsecase {
    collection: Collection<ProductModel>,
}

impl ProductUsecase {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<ProductModel>("products");
        Self { collection }
    }

    /// Ensure collection indexes exist. Called once at startup.
    pub async fn init_indexes(&self) -> Result<(), AppError> {
        let indexes = vec![
            // The application-level key must stay unique
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_id_unique".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(IndexOptions::builder().name("idx_price".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created");
        Ok(())
    }

    #[instrument(skip(self, body), fields(product_name = %body.name))]
    pub async fn create(&self, body: CreateProductRequest) -> Result<ProductModel, AppError> {
        let product = ProductModel::new(body.name, body.quantity, body.price, body.status);

        self.collection
            .insert_one(&product)
            .await
            .map_err(|e| AppError::insertion(e.to_string()))?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<ProductModel, AppError> {
        let filter = doc! { "id": to_bson(&id).unwrap_or(Bson::Null) };

        self.collection
            .find_one(filter)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product not found with filter: {id}")))
    }

    #[instrument(skip(self))]
    pub async fn query(
        &self,
        price_min: Option<f64>,
        price_max: Option<f64>,
    ) -> Result<Vec<ProductModel>, AppError> {
        let filter = Self::build_price_filter(price_min, price_max);

        let cursor = self.collection.find(filter).await?;
        let products: Vec<ProductModel> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, body))]
    pub async fn update(
        &self,
        id: Uuid,
        body: UpdateProductRequest,
    ) -> Result<ProductModel, AppError> {
        let filter = doc! { "id": to_bson(&id).unwrap_or(Bson::Null) };
        let update = doc! { "$set": Self::build_update(&body, Utc::now()) };

        let updated = self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product not found with filter: {id}")))?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let filter = doc! { "id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Err(AppError::not_found(format!(
                "Product not found with filter: {id}"
            )));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(true)
    }

    /// Build the list filter. Both bounds are optional and exclusive.
    fn build_price_filter(price_min: Option<f64>, price_max: Option<f64>) -> Document {
        let mut filter = doc! {};
        let mut price = doc! {};

        if let Some(min) = price_min {
            price.insert("$gt", min);
        }
        if let Some(max) = price_max {
            price.insert("$lt", max);
        }
        if !price.is_empty() {
            filter.insert("price", price);
        }

        filter
    }

    /// Build the `$set` document from the supplied fields. `updated_at`
    /// is always refreshed.
    fn build_update(body: &UpdateProductRequest, updated_at: DateTime<Utc>) -> Document {
        let mut set = doc! {};

        if let Some(ref name) = body.name {
            set.insert("name", name.clone());
        }
        if let Some(quantity) = body.quantity {
            set.insert("quantity", quantity);
        }
        if let Some(price) = body.price {
            set.insert("price", price);
        }
        if let Some(status) = body.status {
            set.insert("status", status);
        }
        set.insert("updated_at", to_bson(&updated_at).unwrap_or(Bson::Null));

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_filter_empty_without_bounds() {
        let filter = ProductUsecase::build_price_filter(None, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn price_filter_uses_exclusive_bounds() {
        let filter = ProductUsecase::build_price_filter(Some(10.0), Some(50.0));
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gt").unwrap(), 10.0);
        assert_eq!(price.get_f64("$lt").unwrap(), 50.0);
    }

    #[test]
    fn price_filter_lower_bound_only() {
        let filter = ProductUsecase::build_price_filter(Some(10.0), None);
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gt").unwrap(), 10.0);
        assert!(!price.contains_key("$lt"));
    }

    #[test]
    fn price_filter_upper_bound_only() {
        let filter = ProductUsecase::build_price_filter(None, Some(50.0));
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$lt").unwrap(), 50.0);
        assert!(!price.contains_key("$gt"));
    }

    #[test]
    fn update_always_refreshes_updated_at() {
        let body = UpdateProductRequest {
            name: None,
            quantity: None,
            price: None,
            status: None,
        };
        let set = ProductUsecase::build_update(&body, Utc::now());
        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn update_contains_only_supplied_fields() {
        let body = UpdateProductRequest {
            name: None,
            quantity: Some(7),
            price: None,
            status: None,
        };
        let set = ProductUsecase::build_update(&body, Utc::now());
        assert_eq!(set.get_i64("quantity").unwrap(), 7);
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("price"));
        assert!(!set.contains_key("status"));
    }

    #[test]
    fn update_keeps_supplied_values() {
        let body = UpdateProductRequest {
            name: Some("Pencil".to_string()),
            quantity: None,
            price: Some(2.25),
            status: Some(false),
        };
        let set = ProductUsecase::build_update(&body, Utc::now());
        assert_eq!(set.get_str("name").unwrap(), "Pencil");
        assert_eq!(set.get_f64("price").unwrap(), 2.25);
        assert!(!set.get_bool("status").unwrap());
        assert!(!set.contains_key("quantity"));
    }

    #[test]
    fn update_timestamp_round_trips_through_bson() {
        let now = Utc::now();
        let body = UpdateProductRequest {
            name: None,
            quantity: None,
            price: None,
            status: None,
        };
        let set = ProductUsecase::build_update(&body, now);
        let stored: DateTime<Utc> = set.get_str("updated_at").unwrap().parse().unwrap();
        assert_eq!(stored, now);
    }
}

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persisted product document. The `id` field is the application-level
/// key, kept separate from the storage engine's native `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductModel {
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductModel {
    pub fn new(name: String, quantity: i64, price: f64, status: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            quantity,
            price,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

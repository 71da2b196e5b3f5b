// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(mongodb::error::Error),
    NotFound(String),
    Insertion(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn insertion(msg: impl Into<String>) -> Self {
        AppError::Insertion(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error occurred".to_string(),
            ),
            // Empty messages fall back to the generic text
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                if msg.is_empty() { "Not Found".to_string() } else { msg },
            ),
            AppError::Insertion(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                if msg.is_empty() { "Error while inserting data".to_string() } else { msg },
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::not_found("Product not found with filter: abc").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn insertion_maps_to_422() {
        let response = AppError::insertion("duplicate key").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn not_found_defaults_message_when_empty() {
        let response = AppError::not_found("").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Not Found");
    }

    #[tokio::test]
    async fn insertion_defaults_message_when_empty() {
        let response = AppError::insertion("").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Error while inserting data");
    }

    #[tokio::test]
    async fn error_body_carries_the_message() {
        let response = AppError::not_found("Product not found with filter: 42").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Product not found with filter: 42");
    }
}

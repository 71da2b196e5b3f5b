// src/state.rs
use mongodb::Database;
use crate::usecases::product::ProductUsecase;

/// Shared application state, cloned per request. The usecase is injected
/// here once at startup instead of living in a process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    pub usecase: ProductUsecase,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self {
            usecase: ProductUsecase::new(db),
        }
    }
}

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{CreateProduct, Page, PageRequest, Product, UpdateProduct};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgProductStore;

/// Persistence for the `products` table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: &CreateProduct) -> AppResult<Product>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// Overwrites the fields present in `changes`. `None` when the row does not exist.
    async fn update(&self, id: i64, changes: &UpdateProduct) -> AppResult<Option<Product>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Products ordered by id.
    async fn list(&self, request: PageRequest) -> AppResult<Page<Product>>;
}

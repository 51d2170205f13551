use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Inventory, InventoryDraft};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgInventoryStore;

/// Persistence for the `inventories` table, keyed by product id.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn find_by_product_id(&self, product_id: i64) -> AppResult<Option<Inventory>>;

    /// Insert-or-update. A draft without an id that collides on `product_id`
    /// overwrites the existing row, so concurrent writers end last-writer-wins.
    async fn save(&self, draft: &InventoryDraft) -> AppResult<Inventory>;
}

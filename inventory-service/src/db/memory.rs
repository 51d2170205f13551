use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InventoryStore;
use crate::error::AppResult;
use crate::models::{Inventory, InventoryDraft};

/// Map-backed store keyed by product id, for service and router tests.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    rows: RwLock<HashMap<i64, Inventory>>,
    next_id: AtomicI64,
    saves: AtomicUsize,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing `save`.
    pub async fn with_row(self, product_id: i64, quantity: i32) -> Self {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows.write().await.insert(
            product_id,
            Inventory {
                id,
                product_id,
                quantity,
            },
        );
        self
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn find_by_product_id(&self, product_id: i64) -> AppResult<Option<Inventory>> {
        Ok(self.rows.read().await.get(&product_id).cloned())
    }

    async fn save(&self, draft: &InventoryDraft) -> AppResult<Inventory> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.write().await;
        let row = rows.entry(draft.product_id).or_insert_with(|| Inventory {
            id: draft
                .id
                .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            product_id: draft.product_id,
            quantity: draft.quantity,
        });
        row.quantity = draft.quantity;
        Ok(row.clone())
    }
}

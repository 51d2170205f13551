use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ProductStore;
use crate::error::AppResult;
use crate::models::{CreateProduct, Page, PageRequest, Product, UpdateProduct};

/// Map-backed store for router tests. Ids start at 1 like a `BIGSERIAL`.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    rows: RwLock<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &CreateProduct) -> AppResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = Product {
            id,
            name: product.name.clone(),
            price: product.price,
        };
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &UpdateProduct) -> AppResult<Option<Product>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(price) = changes.price {
            row.price = price;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn list(&self, request: PageRequest) -> AppResult<Page<Product>> {
        let rows = self.rows.read().await;
        let items = rows
            .values()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .cloned()
            .collect();
        Ok(Page {
            items,
            request,
            total_elements: rows.len() as i64,
        })
    }
}

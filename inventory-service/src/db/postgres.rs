use async_trait::async_trait;
use sqlx::PgPool;

use super::InventoryStore;
use crate::error::AppResult;
use crate::models::{Inventory, InventoryDraft};

#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn find_by_product_id(&self, product_id: i64) -> AppResult<Option<Inventory>> {
        let row = sqlx::query_as::<_, Inventory>(
            "SELECT id, product_id, quantity FROM inventories WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn save(&self, draft: &InventoryDraft) -> AppResult<Inventory> {
        let mut tx = self.pool.begin().await?;

        let updated = match draft.id {
            Some(id) => {
                sqlx::query_as::<_, Inventory>(
                    r#"
                    UPDATE inventories
                    SET quantity = $1
                    WHERE id = $2
                    RETURNING id, product_id, quantity
                    "#,
                )
                .bind(draft.quantity)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        // Either a first insert or the row vanished since it was read.
        let row = match updated {
            Some(row) => row,
            None => {
                sqlx::query_as::<_, Inventory>(
                    r#"
                    INSERT INTO inventories (product_id, quantity)
                    VALUES ($1, $2)
                    ON CONFLICT (product_id) DO UPDATE SET quantity = EXCLUDED.quantity
                    RETURNING id, product_id, quantity
                    "#,
                )
                .bind(draft.product_id)
                .bind(draft.quantity)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(row)
    }
}

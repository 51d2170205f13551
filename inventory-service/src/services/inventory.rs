use std::sync::Arc;

use tracing::{info, warn};

use crate::client::ProductCatalog;
use crate::db::InventoryStore;
use crate::error::{AppError, AppResult};
use crate::models::{Inventory, InventoryDetails, InventoryDraft};

/// Target of the change notifications emitted after every quantity write.
pub const EVENT_TARGET: &str = "inventory_events";

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Remote product merged with local stock, `None` when the product service
    /// does not know the product (whatever is stored locally).
    pub async fn get_inventory_details(&self, product_id: i64) -> AppResult<Option<InventoryDetails>> {
        let Some(product) = self.catalog.fetch_product(product_id).await else {
            warn!(product_id, "Product unknown to product service; no inventory details");
            return Ok(None);
        };

        let stock = self.store.find_by_product_id(product_id).await?;
        if stock.is_none() {
            info!(product_id, "No local inventory row; reporting quantity 0");
        }

        let details = InventoryDetails::merge(product, stock.as_ref());
        info!(
            product_id,
            quantity = details.quantity_available,
            product_name = %details.product_name,
            "Resolved inventory details"
        );
        Ok(Some(details))
    }

    /// Sets the absolute quantity for a product, creating its row on first write.
    pub async fn update_inventory_quantity(
        &self,
        product_id: i64,
        new_quantity: i32,
    ) -> AppResult<Inventory> {
        if new_quantity < 0 {
            return Err(AppError::BadRequest("quantity must not be negative".to_string()));
        }

        let draft = match self.store.find_by_product_id(product_id).await? {
            Some(existing) => {
                info!(
                    product_id,
                    previous = existing.quantity,
                    quantity = new_quantity,
                    "Updating inventory"
                );
                InventoryDraft {
                    quantity: new_quantity,
                    ..existing.into()
                }
            }
            None => {
                info!(product_id, quantity = new_quantity, "Creating inventory row");
                InventoryDraft {
                    id: None,
                    product_id,
                    quantity: new_quantity,
                }
            }
        };

        let saved = self.store.save(&draft).await?;
        emit_inventory_changed(&saved);
        Ok(saved)
    }
}

fn emit_inventory_changed(row: &Inventory) {
    info!(
        target: EVENT_TARGET,
        product_id = row.product_id,
        quantity = row.quantity,
        "Inventory quantity changed"
    );
}

use jsonapi_envelope::ResourceObject;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::RemoteProduct;

/// Stock row, one per product at most.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

/// Row about to be written: `id` is `None` for a first insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryDraft {
    pub id: Option<i64>,
    pub product_id: i64,
    pub quantity: i32,
}

impl From<Inventory> for InventoryDraft {
    fn from(row: Inventory) -> Self {
        Self {
            id: Some(row.id),
            product_id: row.product_id,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAttributes {
    pub product_id: i64,
    pub quantity: i32,
}

impl ResourceObject for Inventory {
    const TYPE: &'static str = "inventories";
    type Attributes = InventoryAttributes;

    fn resource_id(&self) -> String {
        self.id.to_string()
    }

    fn attributes(&self) -> InventoryAttributes {
        InventoryAttributes {
            product_id: self.product_id,
            quantity: self.quantity,
        }
    }
}

/// Remote product merged with local stock. Response-only.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDetails {
    pub resource_id: String,
    pub product_id: i64,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity_available: i32,
}

impl InventoryDetails {
    /// A missing row reads as zero stock; its resource id falls back to `product-{id}`.
    pub fn merge(product: RemoteProduct, stock: Option<&Inventory>) -> Self {
        let resource_id = stock
            .map(|row| row.id.to_string())
            .unwrap_or_else(|| format!("product-{}", product.id));
        Self {
            resource_id,
            product_id: product.id,
            product_name: product.name,
            product_price: product.price,
            quantity_available: stock.map_or(0, |row| row.quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDetailsAttributes {
    pub product_id: i64,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
    pub quantity_available: i32,
}

impl ResourceObject for InventoryDetails {
    const TYPE: &'static str = "inventory-details";
    type Attributes = InventoryDetailsAttributes;

    fn resource_id(&self) -> String {
        self.resource_id.clone()
    }

    fn attributes(&self) -> InventoryDetailsAttributes {
        InventoryDetailsAttributes {
            product_id: self.product_id,
            product_name: self.product_name.clone(),
            product_price: self.product_price,
            quantity_available: self.quantity_available,
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// `data.attributes` of a quantity update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuantityPayload {
    pub quantity: Option<i32>,
}

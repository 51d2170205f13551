use jsonapi_envelope::ResourceObject;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Catalog entry. `price` maps to a `NUMERIC(19,2)` column and travels as a JSON number.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAttributes {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl ResourceObject for Product {
    const TYPE: &'static str = "products";
    type Attributes = ProductAttributes;

    fn resource_id(&self) -> String {
        self.id.to_string()
    }

    fn attributes(&self) -> ProductAttributes {
        ProductAttributes {
            name: self.name.clone(),
            price: self.price,
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// `data.attributes` of a create or update request. Both members are optional
/// on the wire; which ones are required depends on the operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
}

/// Partial update: only present fields overwrite the stored row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

fn check_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    Ok(())
}

fn check_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must be >= 0".to_string()));
    }
    Ok(())
}

impl TryFrom<ProductPayload> for CreateProduct {
    type Error = AppError;

    fn try_from(payload: ProductPayload) -> AppResult<Self> {
        let name = payload
            .name
            .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
        let price = payload
            .price
            .ok_or_else(|| AppError::BadRequest("price is required".to_string()))?;
        check_name(&name)?;
        check_price(price)?;
        Ok(Self { name, price })
    }
}

impl TryFrom<ProductPayload> for UpdateProduct {
    type Error = AppError;

    fn try_from(payload: ProductPayload) -> AppResult<Self> {
        if let Some(name) = payload.name.as_deref() {
            check_name(name)?;
        }
        if let Some(price) = payload.price {
            check_price(price)?;
        }
        Ok(Self {
            name: payload.name,
            price: payload.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonapi_envelope::Document;
    use serde_json::json;

    fn payload(name: Option<&str>, price: Option<Decimal>) -> ProductPayload {
        ProductPayload {
            name: name.map(str::to_string),
            price,
        }
    }

    #[test]
    fn product_renders_as_products_resource() {
        let product = Product {
            id: 123,
            name: "Widget".into(),
            price: Decimal::new(999, 2),
        };
        assert_eq!(
            serde_json::to_value(Document::single(&product)).unwrap(),
            json!({
                "data": {
                    "id": "123",
                    "type": "products",
                    "attributes": { "name": "Widget", "price": 9.99 }
                }
            })
        );
    }

    #[test]
    fn payload_accepts_integer_and_float_prices() {
        let p: ProductPayload = serde_json::from_value(json!({ "name": "A", "price": 150 })).unwrap();
        assert_eq!(p.price, Some(Decimal::new(150, 0)));
        let p: ProductPayload = serde_json::from_value(json!({ "price": 99.99 })).unwrap();
        assert_eq!(p.price, Some(Decimal::new(9999, 2)));
        assert!(p.name.is_none());
    }

    #[test]
    fn payload_without_price_is_none() {
        let p: ProductPayload = serde_json::from_value(json!({ "name": "A" })).unwrap();
        assert!(p.price.is_none());
    }

    #[test]
    fn create_requires_name_and_price() {
        assert!(CreateProduct::try_from(payload(None, Some(Decimal::ONE))).is_err());
        assert!(CreateProduct::try_from(payload(Some("A"), None)).is_err());
        assert!(CreateProduct::try_from(payload(Some("   "), Some(Decimal::ONE))).is_err());
    }

    #[test]
    fn create_rejects_negative_price_but_allows_zero() {
        assert!(CreateProduct::try_from(payload(Some("A"), Some(Decimal::new(-5000, 2)))).is_err());
        let ok = CreateProduct::try_from(payload(Some("A"), Some(Decimal::ZERO))).unwrap();
        assert_eq!(ok.price, Decimal::ZERO);
    }

    #[test]
    fn update_keeps_absent_fields_absent() {
        let update = UpdateProduct::try_from(payload(None, Some(Decimal::TEN))).unwrap();
        assert_eq!(
            update,
            UpdateProduct {
                name: None,
                price: Some(Decimal::TEN)
            }
        );
    }

    #[test]
    fn update_rejects_blank_name_and_negative_price() {
        assert!(UpdateProduct::try_from(payload(Some(""), None)).is_err());
        assert!(UpdateProduct::try_from(payload(None, Some(Decimal::NEGATIVE_ONE))).is_err());
    }
}

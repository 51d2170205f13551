use rust_decimal::Decimal;
use serde::Deserialize;

/// Product as reported by the product service. Never stored locally.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteProduct {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

/// `data.attributes` of a `products` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProductAttributes {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl RemoteProduct {
    pub fn from_attributes(id: i64, attributes: RemoteProductAttributes) -> Self {
        Self {
            id,
            name: attributes.name,
            price: attributes.price,
        }
    }
}

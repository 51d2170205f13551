//! Outbound calls to the product service.

pub mod product_client;
pub mod retry;

use async_trait::async_trait;

use crate::models::RemoteProduct;

pub use product_client::{ProductClient, ProductClientConfig};
pub use retry::RetryPolicy;

/// Source of product identity and pricing.
///
/// Lookups never fail from the caller's point of view: any failure the
/// implementation cannot recover from is reported as `None`.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn fetch_product(&self, product_id: i64) -> Option<RemoteProduct>;
}

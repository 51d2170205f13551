//! JSON:API envelope shared by the product and inventory services.
//!
//! Only the subset both services speak is modelled: `data.{id,type,attributes}`
//! with optional top-level `links` and `meta`, plus the `errors` document.

pub mod document;
pub mod error;
pub mod extract;

pub use document::{Document, Links, RequestDocument, RequestResource, Resource, ResourceObject};
pub use error::{ErrorDocument, ErrorObject};
pub use extract::{error_response, JsonApi, JsonApiBody, JsonApiRejection};

/// Media type used for every request and response body.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// `{"errors": [...]}` document returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    pub detail: String,
}

impl ErrorDocument {
    pub fn from_status(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorObject {
                status: status.as_str().to_string(),
                title: status.canonical_reason().unwrap_or("Error").to_string(),
                detail: detail.into(),
            }],
        }
    }
}

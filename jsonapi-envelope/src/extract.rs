use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

use crate::{ErrorDocument, MEDIA_TYPE};

/// Response body written as `application/vnd.api+json`.
///
/// A serialization failure becomes a 500 error document instead of a panic.
#[derive(Debug, Clone)]
pub struct JsonApi<T>(pub T);

impl<T: Serialize> IntoResponse for JsonApi<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => with_media_type(body),
            Err(err) => {
                error!(error = %err, "Failed to serialize JSON:API document");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error serializing response: {err}"),
                )
            }
        }
    }
}

/// Build an error document response with the given status.
pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    let doc = ErrorDocument::from_status(status, detail);
    // An ErrorDocument is plain strings, it always serializes.
    let body = serde_json::to_vec(&doc).unwrap_or_default();
    (status, with_media_type(body)).into_response()
}

fn with_media_type(body: Vec<u8>) -> Response {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE))],
        body,
    )
        .into_response()
}

/// Request body parsed from raw bytes, whatever `Content-Type` the client declared.
#[derive(Debug, Clone)]
pub struct JsonApiBody<T>(pub T);

#[derive(Debug)]
pub struct JsonApiRejection {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for JsonApiRejection {
    fn into_response(self) -> Response {
        error_response(self.status, self.detail)
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonApiBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| JsonApiRejection {
                status: rejection.status(),
                detail: rejection.body_text(),
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonApiBody)
            .map_err(|err| JsonApiRejection {
                status: StatusCode::BAD_REQUEST,
                detail: format!("Invalid JSON format: {err}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::post, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::RequestDocument;

    async fn echo(JsonApiBody(doc): JsonApiBody<RequestDocument<Value>>) -> JsonApi<Value> {
        JsonApi(json!({ "id": doc.id_text() }))
    }

    fn app() -> Router {
        Router::new().route("/echo", post(echo))
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn echo_request(content_type: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::post("/echo");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(r#"{"data":{"id":"5","type":"things"}}"#))
            .unwrap()
    }

    #[tokio::test]
    async fn parses_body_with_json_api_content_type() {
        let resp = app().oneshot(echo_request(Some(MEDIA_TYPE))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], MEDIA_TYPE);
        assert_eq!(body_json(resp).await, json!({ "id": "5" }));
    }

    #[tokio::test]
    async fn parses_body_whatever_content_type_is_declared() {
        for content_type in [Some("text/plain"), Some("application/x-www-form-urlencoded"), None] {
            let resp = app().oneshot(echo_request(content_type)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "content type {content_type:?}");
            assert_eq!(body_json(resp).await, json!({ "id": "5" }));
        }
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request_error_document() {
        let req = HttpRequest::post("/echo")
            .body(Body::from(r#"{"data":{"id":"5""#))
            .unwrap();

        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], MEDIA_TYPE);
        let body = body_json(resp).await;
        assert_eq!(body["errors"][0]["status"], "400");
        assert!(body["errors"][0]["detail"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON format"));
    }

    #[test]
    fn error_response_carries_status() {
        let resp = error_response(StatusCode::NOT_FOUND, "gone");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

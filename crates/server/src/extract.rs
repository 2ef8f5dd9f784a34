use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::errors::JsonApiError;

/// JSON body read whatever the `Content-Type` says. Malformed input and
/// unknown update keys become a 400 with the parser's message.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"{}" } else { &bytes };
        serde_json::from_slice(raw)
            .map(JsonBody)
            .map_err(|e| JsonApiError::bad_request(format!("Invalid request body: {}", e)))
    }
}

//! Request body extraction shared by the write endpoints.

use axum::{
  Form,
  body::Bytes,
  extract::{FromRequest, Request},
  http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A request body decoded from either JSON or an urlencoded form.
///
/// Form posts from plain HTML pages and JSON posts from scripts reach the
/// same handler. An empty body decodes as `{}` so that missing fields are
/// reported by validation rather than by the extractor.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
  T: DeserializeOwned + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    if is_form(req.headers()) {
      let Form(value) = Form::<T>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      return Ok(Self(value));
    }

    let body = Bytes::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
      b"{}"
    } else {
      &body
    };
    serde_json::from_slice(raw)
      .map(Self)
      .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
  }
}

fn is_form(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

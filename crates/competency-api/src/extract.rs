//! Extractors whose rejections are reported as [`ApiError`] JSON bodies
//! instead of axum's plain-text defaults.

use axum::{
  extract::{FromRequest, FromRequestParts, Path},
  http::request::Parts,
};
use competency_core::person::PersonId;

use crate::error::ApiError;

/// `Json<T>` that rejects malformed bodies, missing fields and out-of-range
/// skill levels with `400 Bad Request`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

/// The `{id}` segment of `/persons/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct PersonIdPath(pub PersonId);

impl<S> FromRequestParts<S> for PersonIdPath
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(id) = Path::<PersonId>::from_request_parts(parts, state).await?;
    Ok(Self(id))
  }
}

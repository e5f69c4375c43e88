//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! This is the only place where error kinds become HTTP status codes.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use competency_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

/// Body text returned for every unclassified failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<competency_core::Error> for ApiError {
  fn from(e: competency_core::Error) -> Self {
    match e.kind() {
      ErrorKind::NotFound => ApiError::NotFound(e.to_string()),
      ErrorKind::Validation => ApiError::BadRequest(e.to_string()),
      ErrorKind::Unclassified => ApiError::Internal(Box::new(e)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => {
        tracing::info!("{m}");
        (StatusCode::NOT_FOUND, m.clone())
      }
      ApiError::BadRequest(m) => {
        tracing::info!("{m}");
        (StatusCode::BAD_REQUEST, m.clone())
      }
      ApiError::Internal(e) => {
        // The cause stays in the log; the client only sees a generic body.
        tracing::error!(error = %e, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          INTERNAL_ERROR_MESSAGE.to_owned(),
        )
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use competency_core::Error;

  use super::*;

  async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn not_found_carries_message() {
    let resp = ApiError::from(Error::PersonNotFound(3)).into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "Person with id 3 not found.");
  }

  #[tokio::test]
  async fn validation_is_bad_request() {
    let err = Error::DuplicateSkills(vec!["Rust".into()]);
    let resp = ApiError::from(err).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      body_json(resp).await["error"],
      "Person can't have duplicate skills: Rust"
    );
  }

  #[tokio::test]
  async fn unclassified_hides_the_cause() {
    let cause = std::io::Error::other("UNIQUE constraint failed: skills.name");
    let resp = ApiError::from(Error::store(cause)).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert!(!body.to_string().contains("UNIQUE"));
  }
}

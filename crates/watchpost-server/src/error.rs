//! API error type and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a decision handler. Authorization outcomes are never
/// errors; these only describe requests that could not be understood.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Core(#[from] watchpost_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
  }
}

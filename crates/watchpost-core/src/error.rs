//! Error types for `watchpost-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unknown service authorization mode: {0:?}")]
  UnknownServiceAuthorization(String),

  #[error("unknown group authorization mode: {0:?}")]
  UnknownGroupAuthorization(String),

  #[error("unknown event precedence: {0:?}")]
  UnknownEventPrecedence(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

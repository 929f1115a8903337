//! Error type for `watchpost-graph`.

use std::fmt;

use thiserror::Error;

/// The kind of object an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
  Contact,
  ContactGroup,
  Host,
  Service,
  HostGroup,
  ServiceGroup,
}

impl fmt::Display for ObjectKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Contact      => "contact",
      Self::ContactGroup => "contact group",
      Self::Host         => "host",
      Self::Service      => "service",
      Self::HostGroup    => "host group",
      Self::ServiceGroup => "service group",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("duplicate {kind} definition: {name:?}")]
  Duplicate { kind: ObjectKind, name: String },

  #[error("{owner} references unknown {kind} {name:?}")]
  UnknownReference {
    owner: String,
    kind:  ObjectKind,
    name:  String,
  },

  #[error("object definitions: {0}")]
  Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

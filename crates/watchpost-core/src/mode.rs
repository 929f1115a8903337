//! Authorization modes and event precedence.
//!
//! Modes are configuration inputs: they are threaded into an authenticated
//! subject at construction and consulted by the service and group checks.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Service authorization ───────────────────────────────────────────────────

/// How a contact of a host relates to the services on that host.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAuthorization {
  /// A contact of the host may see all of its services.
  #[default]
  Loose,
  /// Only direct contacts of the service may see it.
  Strict,
}

impl ServiceAuthorization {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Loose  => "loose",
      Self::Strict => "strict",
    }
  }
}

impl fmt::Display for ServiceAuthorization {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ServiceAuthorization {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "loose"  => Ok(Self::Loose),
      "strict" => Ok(Self::Strict),
      other    => Err(Error::UnknownServiceAuthorization(other.to_string())),
    }
  }
}

// ─── Group authorization ─────────────────────────────────────────────────────

/// How membership of a host or service group is evaluated.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GroupAuthorization {
  /// Authorized for the group if authorized for any member.
  Loose,
  /// Authorized for the group only if authorized for every member.
  #[default]
  Strict,
}

impl GroupAuthorization {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Loose  => "loose",
      Self::Strict => "strict",
    }
  }
}

impl fmt::Display for GroupAuthorization {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for GroupAuthorization {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "loose"  => Ok(Self::Loose),
      "strict" => Ok(Self::Strict),
      other    => Err(Error::UnknownGroupAuthorization(other.to_string())),
    }
  }
}

// ─── Bundle ──────────────────────────────────────────────────────────────────

/// Both modes together, as they appear in server configuration.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct AuthorizationModes {
  #[serde(default)]
  pub service: ServiceAuthorization,
  #[serde(default)]
  pub group:   GroupAuthorization,
}

// ─── Event precedence ────────────────────────────────────────────────────────

/// Which source of contact information wins for an event-console event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPrecedence {
  /// Contact groups configured on the matching rule take priority.
  Rule,
  /// The contacts of the monitored host take priority.
  Host,
}

impl FromStr for EventPrecedence {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "rule" => Ok(Self::Rule),
      "host" => Ok(Self::Host),
      other  => Err(Error::UnknownEventPrecedence(other.to_string())),
    }
  }
}

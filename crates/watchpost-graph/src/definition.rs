//! Plain object definitions, as read from an objects file.
//!
//! Definitions reference each other by name only. Resolving those names and
//! rejecting dangling references is the job of
//! [`ObjectGraph::from_definitions`](crate::ObjectGraph::from_definitions).

use std::path::Path;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDefinitions {
  pub contacts:       Vec<ContactDefinition>,
  pub contact_groups: Vec<ContactGroupDefinition>,
  pub hosts:          Vec<HostDefinition>,
  pub services:       Vec<ServiceDefinition>,
  pub host_groups:    Vec<HostGroupDefinition>,
  pub service_groups: Vec<ServiceGroupDefinition>,
}

impl ObjectDefinitions {
  /// Read definitions from a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let defs = Config::builder()
      .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
      .build()?
      .try_deserialize()?;
    Ok(defs)
  }

  /// Read definitions from TOML source text.
  pub fn from_toml(source: &str) -> Result<Self> {
    let defs = Config::builder()
      .add_source(File::from_str(source, FileFormat::Toml))
      .build()?
      .try_deserialize()?;
    Ok(defs)
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDefinition {
  pub name:  String,
  #[serde(default)]
  pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactGroupDefinition {
  pub name:    String,
  /// Contact names.
  #[serde(default)]
  pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostDefinition {
  pub name:           String,
  #[serde(default)]
  pub contacts:       Vec<String>,
  #[serde(default)]
  pub contact_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDefinition {
  pub host_name:      String,
  pub description:    String,
  #[serde(default)]
  pub contacts:       Vec<String>,
  #[serde(default)]
  pub contact_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostGroupDefinition {
  pub name:    String,
  /// Host names.
  #[serde(default)]
  pub members: Vec<String>,
}

/// Identifies a service by its host and description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceKey {
  pub host_name:   String,
  pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceGroupDefinition {
  pub name:    String,
  #[serde(default)]
  pub members: Vec<ServiceKey>,
}

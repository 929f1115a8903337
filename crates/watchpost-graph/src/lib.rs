//! In-memory monitoring object table for Watchpost.
//!
//! Builds contacts, contact groups, hosts, services and their groups from
//! plain [`ObjectDefinitions`] and exposes them through the capability traits
//! of [`watchpost_core::object`]. The table owns every record; authorization
//! subjects only ever borrow from it.

mod definition;
mod graph;

pub mod error;

pub use definition::{
  ContactDefinition, ContactGroupDefinition, HostDefinition,
  HostGroupDefinition, ObjectDefinitions, ServiceDefinition,
  ServiceGroupDefinition, ServiceKey,
};
pub use error::{Error, ObjectKind, Result};
pub use graph::{
  ContactRecord, HostGroupRecord, HostRecord, ObjectGraph, ServiceGroupRecord,
  ServiceRecord,
};

#[cfg(test)]
mod tests;

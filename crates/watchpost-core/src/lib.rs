//! Core types and trait definitions for Watchpost.
//!
//! This crate decides whether a principal may see or act on a monitored host,
//! service, group or contact. It owns none of the monitored objects: hosts,
//! services and contacts are reached through the capability traits in
//! [`object`], and the monitoring object table that implements them lives in
//! other crates.

pub mod error;
pub mod mode;
pub mod object;
pub mod subject;

pub use error::{Error, Result};
pub use mode::{AuthorizationModes, EventPrecedence, GroupAuthorization, ServiceAuthorization};
pub use subject::{AuthenticatedSubject, AuthorizationSubject, ContactLookup};

//! HTTP decision service for Watchpost.
//!
//! Exposes an axum [`Router`] that answers authorization questions against a
//! shared [`ObjectGraph`]. The principal of every request is taken from the
//! `X-Auth-User` header; see [`auth`].

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use watchpost_core::{AuthorizationModes, GroupAuthorization, ServiceAuthorization};
use watchpost_graph::ObjectGraph;

use handlers::{authorize, status};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  #[serde(default = "default_objects_path")]
  pub objects_path:          PathBuf,
  #[serde(default)]
  pub service_authorization: ServiceAuthorization,
  #[serde(default)]
  pub group_authorization:   GroupAuthorization,
}

impl ServerConfig {
  pub fn modes(&self) -> AuthorizationModes {
    AuthorizationModes {
      service: self.service_authorization,
      group:   self.group_authorization,
    }
  }
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 6557 }

fn default_objects_path() -> PathBuf { PathBuf::from("objects.toml") }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
  pub graph:  Arc<ObjectGraph>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the decision service.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/hosts",                      get(status::hosts))
    .route("/api/services",                   get(status::services))
    .route("/api/hostgroups",                 get(status::host_groups))
    .route("/api/servicegroups",              get(status::service_groups))
    .route("/api/authorize/contact/{name}",   get(authorize::contact))
    .route("/api/authorize/notification",     post(authorize::notification))
    .route("/api/authorize/event",            post(authorize::event))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

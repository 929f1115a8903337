//! Status listings filtered down to what the requesting subject may see.

use axum::{Json, extract::State};
use serde::Serialize;
use watchpost_core::object::{Host, HostGroup, Service, ServiceGroup};

use crate::{AppState, auth::AuthUser};

/// A service as listed by `GET /api/services`.
#[derive(Debug, Serialize)]
pub struct ServiceEntry {
  pub host_name:   String,
  pub description: String,
}

pub async fn hosts(State(state): State<AppState>, user: AuthUser) -> Json<Vec<String>> {
  let subject = user.subject(&state.graph, state.config.modes());
  let names = state
    .graph
    .hosts()
    .filter(|host| subject.is_authorized_for_host(*host))
    .map(|host| host.name().to_string())
    .collect();
  Json(names)
}

pub async fn services(
  State(state): State<AppState>,
  user: AuthUser,
) -> Json<Vec<ServiceEntry>> {
  let subject = user.subject(&state.graph, state.config.modes());
  let entries = state
    .graph
    .services()
    .filter(|service| subject.is_authorized_for_service(*service))
    .map(|service| ServiceEntry {
      host_name:   service.host_name().to_string(),
      description: service.description().to_string(),
    })
    .collect();
  Json(entries)
}

pub async fn host_groups(
  State(state): State<AppState>,
  user: AuthUser,
) -> Json<Vec<String>> {
  let subject = user.subject(&state.graph, state.config.modes());
  let names = state
    .graph
    .host_groups()
    .filter(|group| subject.is_authorized_for_host_group(*group))
    .map(|group| group.name().to_string())
    .collect();
  Json(names)
}

pub async fn service_groups(
  State(state): State<AppState>,
  user: AuthUser,
) -> Json<Vec<String>> {
  let subject = user.subject(&state.graph, state.config.modes());
  let names = state
    .graph
    .service_groups()
    .filter(|group| subject.is_authorized_for_service_group(*group))
    .map(|group| group.name().to_string())
    .collect();
  Json(names)
}

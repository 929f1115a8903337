//! Single authorization decisions.

use axum::{
  Json,
  extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use watchpost_core::{
  EventPrecedence,
  object::{Host, Service},
};

use crate::{AppState, auth::AuthUser, error::ApiError};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decision {
  pub authorized: bool,
}

/// `GET /api/authorize/contact/{name}`
pub async fn contact(
  State(state): State<AppState>,
  user: AuthUser,
  Path(name): Path<String>,
) -> Json<Decision> {
  let subject = user.subject(&state.graph, state.config.modes());
  Json(Decision { authorized: subject.is_authorized_for_contact_name(&name) })
}

/// A notification, possibly forwarded from a remote site. Objects are
/// referenced by name and may not exist here.
#[derive(Debug, Deserialize)]
pub struct NotificationRequest {
  pub host_name:           String,
  /// Present and non-empty for service notifications.
  #[serde(default)]
  pub service_description: Option<String>,
  #[serde(default)]
  pub contact_name:        String,
}

/// `POST /api/authorize/notification`
pub async fn notification(
  State(state): State<AppState>,
  user: AuthUser,
  Json(req): Json<NotificationRequest>,
) -> Json<Decision> {
  let subject = user.subject(&state.graph, state.config.modes());
  // An empty description marks a host notification.
  let description = req.service_description.as_deref().filter(|d| !d.is_empty());
  let host        = state.graph.find_host(&req.host_name);
  let service     =
    description.and_then(|description| state.graph.find_service(&req.host_name, description));

  let authorized = subject.is_authorized_for_notification_object(
    host.map(|h| h as &dyn Host),
    service.map(|s| s as &dyn Service),
    description.is_some(),
    &req.contact_name,
  );
  tracing::debug!(
    host          = %req.host_name,
    service       = ?req.service_description,
    host_known    = host.is_some(),
    service_known = service.is_some(),
    authorized,
    "notification decision"
  );
  Json(Decision { authorized })
}

/// An event-console event.
#[derive(Debug, Deserialize)]
pub struct EventRequest {
  pub precedence:     String,
  /// `None` when the event carries no contact group information.
  #[serde(default)]
  pub contact_groups: Option<Vec<String>>,
  #[serde(default)]
  pub host_name:      Option<String>,
}

/// `POST /api/authorize/event`
pub async fn event(
  State(state): State<AppState>,
  user: AuthUser,
  Json(req): Json<EventRequest>,
) -> Result<Json<Decision>, ApiError> {
  let precedence: EventPrecedence = req.precedence.parse()?;
  let subject = user.subject(&state.graph, state.config.modes());
  let host    = req
    .host_name
    .as_deref()
    .and_then(|name| state.graph.find_host(name));

  let authorized = subject.is_authorized_for_event(
    precedence,
    req.contact_groups.as_deref(),
    host.map(|h| h as &dyn Host),
  );
  Ok(Json(Decision { authorized }))
}

//! Tests for building an `ObjectGraph` and authorizing against it.

use watchpost_core::{
  AuthorizationModes, AuthorizationSubject, GroupAuthorization,
  ServiceAuthorization,
  object::{Contact, Host, HostGroup, Service},
};

use crate::{
  ContactDefinition, Error, HostDefinition, ObjectDefinitions, ObjectGraph,
  ObjectKind, ServiceDefinition,
};

const OBJECTS: &str = r#"
[[contacts]]
name  = "alice"
alias = "Alice Admin"

[[contacts]]
name = "bob"

[[contacts]]
name = "carol"

[[contact_groups]]
name    = "ops"
members = ["bob", "carol"]

[[hosts]]
name     = "web01"
contacts = ["alice"]

[[hosts]]
name           = "db01"
contact_groups = ["ops"]

[[services]]
host_name   = "web01"
description = "HTTP"

[[services]]
host_name   = "db01"
description = "PostgreSQL"
contacts    = ["alice"]

[[host_groups]]
name    = "all"
members = ["web01", "db01"]

[[service_groups]]
name    = "frontends"
members = [{ host_name = "web01", description = "HTTP" }]
"#;

fn graph() -> ObjectGraph {
  let defs = ObjectDefinitions::from_toml(OBJECTS).expect("parse objects");
  ObjectGraph::from_definitions(defs).expect("build graph")
}

fn subject<'g>(graph: &'g ObjectGraph, user: &str, modes: AuthorizationModes) -> AuthorizationSubject<'g> {
  AuthorizationSubject::resolve(Some(user), modes, graph.contact_lookup())
}

// ─── Building ────────────────────────────────────────────────────────────────

#[test]
fn definitions_load_from_toml() {
  let g = graph();
  assert_eq!(g.contacts().count(), 3);
  assert_eq!(g.hosts().count(), 2);
  assert_eq!(g.services().count(), 2);
  assert_eq!(g.host_groups().count(), 1);
  assert_eq!(g.service_groups().count(), 1);
  assert_eq!(g.find_contact("alice").and_then(|c| c.alias()), Some("Alice Admin"));
}

#[test]
fn contact_groups_expand_into_host_contacts() {
  let g  = graph();
  let db = g.find_host("db01").unwrap();
  assert_eq!(db.contact_names().collect::<Vec<_>>(), vec!["bob", "carol"]);
  assert!(db.has_contact(g.find_contact("carol").unwrap()));
  assert!(!db.has_contact(g.find_contact("alice").unwrap()));
}

#[test]
fn contacts_know_their_groups() {
  let g = graph();
  let bob = g.find_contact("bob").unwrap();
  assert!(bob.is_member_of("ops"));
  assert_eq!(bob.groups().collect::<Vec<_>>(), vec!["ops"]);
  assert!(!g.find_contact("alice").unwrap().is_member_of("ops"));
}

#[test]
fn services_link_back_to_their_host() {
  let g   = graph();
  let svc = g.find_service("db01", "PostgreSQL").unwrap();
  assert_eq!(svc.host_name(), "db01");
  assert_eq!(svc.host().name(), "db01");
  assert_eq!(svc.description(), "PostgreSQL");
  assert_eq!(svc.contact_names().collect::<Vec<_>>(), vec!["alice"]);
  assert!(g.find_service("db01", "HTTP").is_none());
  assert!(g.find_service("nope", "HTTP").is_none());
}

#[test]
fn group_members_are_resolved() {
  let g = graph();
  let all = g.find_host_group("all").unwrap();
  assert_eq!(all.name(), "all");
  let mut names = all.members().map(|h| h.name().to_string()).collect::<Vec<_>>();
  names.sort();
  assert_eq!(names, vec!["db01", "web01"]);

  let frontends = g.find_service_group("frontends").unwrap();
  assert_eq!(frontends.members().map(|s| s.host_name()).collect::<Vec<_>>(), vec!["web01"]);
}

#[test]
fn duplicate_host_is_rejected() {
  let defs = ObjectDefinitions {
    hosts: vec![
      HostDefinition { name: "web01".into(), ..Default::default() },
      HostDefinition { name: "web01".into(), ..Default::default() },
    ],
    ..Default::default()
  };
  let err = ObjectGraph::from_definitions(defs).unwrap_err();
  assert!(
    matches!(err, Error::Duplicate { kind: ObjectKind::Host, ref name } if name == "web01"),
    "{err}"
  );
}

#[test]
fn duplicate_service_is_rejected() {
  let service = ServiceDefinition {
    host_name:   "web01".into(),
    description: "HTTP".into(),
    ..Default::default()
  };
  let defs = ObjectDefinitions {
    hosts: vec![HostDefinition { name: "web01".into(), ..Default::default() }],
    services: vec![service.clone(), service],
    ..Default::default()
  };
  let err = ObjectGraph::from_definitions(defs).unwrap_err();
  assert!(matches!(err, Error::Duplicate { kind: ObjectKind::Service, .. }), "{err}");
}

#[test]
fn unknown_contact_is_rejected() {
  let defs = ObjectDefinitions {
    hosts: vec![HostDefinition {
      name:     "web01".into(),
      contacts: vec!["ghost".into()],
      ..Default::default()
    }],
    ..Default::default()
  };
  let err = ObjectGraph::from_definitions(defs).unwrap_err();
  assert!(
    matches!(err, Error::UnknownReference { kind: ObjectKind::Contact, ref name, .. } if name == "ghost"),
    "{err}"
  );
}

#[test]
fn unknown_host_for_service_is_rejected() {
  let defs = ObjectDefinitions {
    contacts: vec![ContactDefinition { name: "alice".into(), alias: None }],
    services: vec![ServiceDefinition {
      host_name:   "ghost".into(),
      description: "PING".into(),
      ..Default::default()
    }],
    ..Default::default()
  };
  let err = ObjectGraph::from_definitions(defs).unwrap_err();
  assert!(matches!(err, Error::UnknownReference { kind: ObjectKind::Host, .. }), "{err}");
}

#[test]
fn unknown_contact_group_is_rejected() {
  let defs = ObjectDefinitions {
    hosts: vec![HostDefinition {
      name:           "web01".into(),
      contact_groups: vec!["nobody".into()],
      ..Default::default()
    }],
    ..Default::default()
  };
  let err = ObjectGraph::from_definitions(defs).unwrap_err();
  assert!(matches!(err, Error::UnknownReference { kind: ObjectKind::ContactGroup, .. }), "{err}");
}

#[test]
fn malformed_toml_is_a_config_error() {
  let err = ObjectDefinitions::from_toml("[[hosts]\nname = ").unwrap_err();
  assert!(matches!(err, Error::Config(_)), "{err}");
}

// ─── Authorizing against the graph ───────────────────────────────────────────

#[test]
fn lookup_resolves_graph_contacts() {
  let g = graph();
  let lookup = g.contact_lookup();
  assert_eq!(lookup("carol").map(|c| c.name()), Some("carol"));
  assert!(lookup("Carol").is_none());
  assert!(lookup("").is_none());
}

#[test]
fn loose_services_follow_host_contacts() {
  let g     = graph();
  let alice = subject(&g, "alice", AuthorizationModes::default());
  let bob   = subject(&g, "bob", AuthorizationModes::default());

  let http = g.find_service("web01", "HTTP").unwrap();
  let pg   = g.find_service("db01", "PostgreSQL").unwrap();

  assert!(alice.is_authorized_for_service(http));
  assert!(alice.is_authorized_for_service(pg));
  assert!(!bob.is_authorized_for_service(http));
  assert!(bob.is_authorized_for_service(pg));
}

#[test]
fn strict_services_need_direct_contacts() {
  let g     = graph();
  let modes = AuthorizationModes {
    service: ServiceAuthorization::Strict,
    group:   GroupAuthorization::Strict,
  };
  let bob = subject(&g, "bob", modes);
  assert!(!bob.is_authorized_for_service(g.find_service("db01", "PostgreSQL").unwrap()));
  assert!(bob.is_authorized_for_host(g.find_host("db01").unwrap()));
}

#[test]
fn host_groups_follow_group_mode() {
  let g   = graph();
  let all = g.find_host_group("all").unwrap();

  let strict = subject(&g, "alice", AuthorizationModes::default());
  assert!(!strict.is_authorized_for_host_group(all));

  let loose = subject(&g, "alice", AuthorizationModes {
    service: ServiceAuthorization::Loose,
    group:   GroupAuthorization::Loose,
  });
  assert!(loose.is_authorized_for_host_group(all));
}

#[test]
fn forwarded_notification_for_unknown_host_falls_back_to_name() {
  let g     = graph();
  let alice = subject(&g, "alice", AuthorizationModes::default());
  assert!(alice.is_authorized_for_notification_object(g.find_host("remote01").map(|h| h as &dyn Host), None, false, "alice"));
  assert!(!alice.is_authorized_for_notification_object(g.find_host("remote01").map(|h| h as &dyn Host), None, false, "bob"));
}

#[test]
fn unknown_user_is_denied_everything() {
  let g       = graph();
  let mallory = subject(&g, "mallory", AuthorizationModes::default());
  assert!(matches!(mallory, AuthorizationSubject::Unauthenticated));
  assert!(g.hosts().all(|h| !mallory.is_authorized_for_host(h)));
}

//! Subject — the principal an authorization decision is made for.
//!
//! A subject is built once per session or forwarded request and answers
//! "may this principal see object X?" for hosts, services, groups, contacts
//! and event-console events. It holds only borrowed references into the
//! monitoring object table and never caches anything.

use std::fmt;

use crate::{
  mode::{AuthorizationModes, EventPrecedence, GroupAuthorization, ServiceAuthorization},
  object::{Contact, Host, HostGroup, Service, ServiceGroup},
};

/// Resolves a contact name to the contact it identifies, if any.
pub type ContactLookup<'a> =
  Box<dyn Fn(&str) -> Option<&'a dyn Contact> + Send + Sync + 'a>;

// ─── Authenticated subject ───────────────────────────────────────────────────

/// A principal bound to one contact of the monitoring configuration.
pub struct AuthenticatedSubject<'a> {
  identity:     &'a dyn Contact,
  service_auth: ServiceAuthorization,
  group_auth:   GroupAuthorization,
  lookup:       ContactLookup<'a>,
}

impl<'a> AuthenticatedSubject<'a> {
  pub fn new(
    identity:     &'a dyn Contact,
    service_auth: ServiceAuthorization,
    group_auth:   GroupAuthorization,
    lookup:       ContactLookup<'a>,
  ) -> Self {
    Self { identity, service_auth, group_auth, lookup }
  }

  pub fn identity(&self) -> &'a dyn Contact { self.identity }

  pub fn service_authorization(&self) -> ServiceAuthorization { self.service_auth }

  pub fn group_authorization(&self) -> GroupAuthorization { self.group_auth }

  /// Resolve `name` through the lookup this subject was constructed with.
  pub fn lookup(&self, name: &str) -> Option<&'a dyn Contact> {
    (self.lookup)(name)
  }

  fn is_authorized_for_contact_name(&self, name: &str) -> bool {
    !name.is_empty() && name == self.identity.name()
  }

  fn is_authorized_for_host(&self, host: &dyn Host) -> bool {
    host.has_contact(self.identity)
  }

  fn is_authorized_for_service(&self, service: &dyn Service) -> bool {
    service.has_contact(self.identity)
      || (self.service_auth == ServiceAuthorization::Loose
        && service.host().has_contact(self.identity))
  }

  fn is_authorized_for_host_group(&self, group: &dyn HostGroup) -> bool {
    let mut check = |host: &dyn Host| self.is_authorized_for_host(host);
    match self.group_auth {
      GroupAuthorization::Loose  => group.any_host(&mut check),
      GroupAuthorization::Strict => group.all_hosts(&mut check),
    }
  }

  fn is_authorized_for_service_group(&self, group: &dyn ServiceGroup) -> bool {
    let mut check = |service: &dyn Service| self.is_authorized_for_service(service);
    match self.group_auth {
      GroupAuthorization::Loose  => group.any_service(&mut check),
      GroupAuthorization::Strict => group.all_services(&mut check),
    }
  }

  fn is_authorized_for_event(
    &self,
    precedence:     EventPrecedence,
    contact_groups: Option<&[String]>,
    host:           Option<&dyn Host>,
  ) -> bool {
    let via_groups = |groups: &[String]| {
      groups.iter().any(|group| self.identity.is_member_of(group))
    };
    match (precedence, contact_groups, host) {
      (EventPrecedence::Rule, Some(groups), _)    => via_groups(groups),
      (EventPrecedence::Rule, None, Some(host))   => self.is_authorized_for_host(host),
      (EventPrecedence::Host, _, Some(host))      => self.is_authorized_for_host(host),
      (EventPrecedence::Host, Some(groups), None) => via_groups(groups),
      (_, None, None)                             => true,
    }
  }
}

impl fmt::Debug for AuthenticatedSubject<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuthenticatedSubject")
      .field("identity", &self.identity.name())
      .field("service_auth", &self.service_auth)
      .field("group_auth", &self.group_auth)
      .finish_non_exhaustive()
  }
}

// ─── Subject ─────────────────────────────────────────────────────────────────

/// The principal of a single status query or forwarded notification.
///
/// The variant is fixed at construction. `Unrestricted` is used for internal
/// callers that bypass authorization entirely; `Unauthenticated` for callers
/// whose identity could not be established, who are denied everything.
#[derive(Debug)]
pub enum AuthorizationSubject<'a> {
  Authenticated(AuthenticatedSubject<'a>),
  Unrestricted,
  Unauthenticated,
}

impl<'a> AuthorizationSubject<'a> {
  pub fn authenticated(
    identity:     &'a dyn Contact,
    service_auth: ServiceAuthorization,
    group_auth:   GroupAuthorization,
    lookup:       ContactLookup<'a>,
  ) -> Self {
    Self::Authenticated(AuthenticatedSubject::new(
      identity,
      service_auth,
      group_auth,
      lookup,
    ))
  }

  /// Build the subject for a request that did (`Some`) or did not (`None`)
  /// name a user.
  ///
  /// No user means a trusted internal caller and yields
  /// [`AuthorizationSubject::Unrestricted`]. A named user is looked up exactly
  /// once; an unknown name yields [`AuthorizationSubject::Unauthenticated`].
  pub fn resolve(
    auth_user: Option<&str>,
    modes:     AuthorizationModes,
    lookup:    ContactLookup<'a>,
  ) -> Self {
    let Some(name) = auth_user else {
      return Self::Unrestricted;
    };
    let found = lookup(name);
    match found {
      Some(identity) => {
        Self::authenticated(identity, modes.service, modes.group, lookup)
      }
      None => {
        tracing::debug!(user = name, "unknown contact, denying all access");
        Self::Unauthenticated
      }
    }
  }

  fn decide(&self, check: impl FnOnce(&AuthenticatedSubject<'a>) -> bool) -> bool {
    match self {
      Self::Authenticated(subject) => check(subject),
      Self::Unrestricted           => true,
      Self::Unauthenticated        => false,
    }
  }

  // ── Contacts and notifications ────────────────────────────────────────

  /// Exact, case-sensitive match against the subject's own contact name.
  /// The empty name never matches an authenticated subject.
  pub fn is_authorized_for_contact_name(&self, name: &str) -> bool {
    self.decide(|subject| subject.is_authorized_for_contact_name(name))
  }

  /// Authorization for a notification that may have been forwarded from
  /// another site.
  ///
  /// When the host is unknown locally, or the notification is about a service
  /// that is unknown locally, the decision falls back to matching
  /// `contact_name`. Otherwise it is made purely through the host's contacts
  /// and `contact_name` is ignored.
  pub fn is_authorized_for_notification_object(
    &self,
    host:                    Option<&dyn Host>,
    service:                 Option<&dyn Service>,
    is_service_notification: bool,
    contact_name:            &str,
  ) -> bool {
    let Some(host) = host else {
      return self.is_authorized_for_contact_name(contact_name);
    };
    if is_service_notification && service.is_none() {
      return self.is_authorized_for_contact_name(contact_name);
    }
    self.is_authorized_for_host(host)
  }

  // ── Status objects ────────────────────────────────────────────────────

  /// Authorization for a status row that refers to a host and possibly one
  /// of its services. Rows without a host are governed by
  /// `authorized_if_no_host`.
  pub fn is_authorized_for_object(
    &self,
    host:                  Option<&dyn Host>,
    service:               Option<&dyn Service>,
    authorized_if_no_host: bool,
  ) -> bool {
    self.decide(|subject| match (host, service) {
      (None, _)                => authorized_if_no_host,
      (Some(host), None)       => subject.is_authorized_for_host(host),
      (Some(_), Some(service)) => subject.is_authorized_for_service(service),
    })
  }

  pub fn is_authorized_for_host(&self, host: &dyn Host) -> bool {
    self.decide(|subject| subject.is_authorized_for_host(host))
  }

  /// Direct contacts of a service are always authorized; contacts of its
  /// host only under [`ServiceAuthorization::Loose`].
  pub fn is_authorized_for_service(&self, service: &dyn Service) -> bool {
    self.decide(|subject| subject.is_authorized_for_service(service))
  }

  pub fn is_authorized_for_host_group(&self, group: &dyn HostGroup) -> bool {
    self.decide(|subject| subject.is_authorized_for_host_group(group))
  }

  pub fn is_authorized_for_service_group(&self, group: &dyn ServiceGroup) -> bool {
    self.decide(|subject| subject.is_authorized_for_service_group(group))
  }

  /// Event-console authorization. `contact_groups` is `None` when the event
  /// carries no contact group information at all.
  pub fn is_authorized_for_event(
    &self,
    precedence:     EventPrecedence,
    contact_groups: Option<&[String]>,
    host:           Option<&dyn Host>,
  ) -> bool {
    self.decide(|subject| {
      subject.is_authorized_for_event(precedence, contact_groups, host)
    })
  }
}

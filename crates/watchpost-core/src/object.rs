//! Capability traits for the monitored objects an authorization decision
//! refers to.
//!
//! The monitoring object table owns every host, service, group and contact.
//! Authorization code only ever borrows them for the duration of a call, so
//! every trait here is object-safe and used as `&dyn Trait`. Implementations
//! must be safe for concurrent reads.

// ─── Contacts ────────────────────────────────────────────────────────────────

/// A named recipient of notifications and the identity behind an
/// authenticated subject.
pub trait Contact: Sync {
  fn name(&self) -> &str;

  /// Whether this contact belongs to the contact group called `group`.
  fn is_member_of(&self, group: &str) -> bool;
}

// ─── Hosts and services ──────────────────────────────────────────────────────

pub trait Host: Sync {
  fn name(&self) -> &str;

  /// Direct membership test: is `contact` one of this host's contacts,
  /// either listed directly or through one of its contact groups?
  fn has_contact(&self, contact: &dyn Contact) -> bool;
}

pub trait Service: Sync {
  fn description(&self) -> &str;

  /// The host this service runs on.
  fn host(&self) -> &dyn Host;

  fn has_contact(&self, contact: &dyn Contact) -> bool;
}

// ─── Groups ──────────────────────────────────────────────────────────────────

pub trait HostGroup: Sync {
  fn name(&self) -> &str;

  /// Returns `true` as soon as `pred` holds for one member.
  fn any_host(&self, pred: &mut dyn FnMut(&dyn Host) -> bool) -> bool;

  /// Returns `true` if `pred` holds for every member (vacuously for an empty
  /// group).
  fn all_hosts(&self, pred: &mut dyn FnMut(&dyn Host) -> bool) -> bool {
    !self.any_host(&mut |host| !pred(host))
  }
}

pub trait ServiceGroup: Sync {
  fn name(&self) -> &str;

  fn any_service(&self, pred: &mut dyn FnMut(&dyn Service) -> bool) -> bool;

  fn all_services(&self, pred: &mut dyn FnMut(&dyn Service) -> bool) -> bool {
    !self.any_service(&mut |service| !pred(service))
  }
}

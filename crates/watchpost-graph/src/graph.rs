//! [`ObjectGraph`] — the resolved, read-only object table.

use std::{
  collections::{BTreeMap, BTreeSet},
  sync::Arc,
};

use watchpost_core::{
  ContactLookup,
  object::{Contact, Host, HostGroup, Service, ServiceGroup},
};

use crate::{
  Error, ObjectDefinitions, ObjectKind, Result,
  definition::{ContactGroupDefinition, ServiceKey},
};

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ContactRecord {
  name:   String,
  alias:  Option<String>,
  groups: BTreeSet<String>,
}

impl ContactRecord {
  pub fn alias(&self) -> Option<&str> { self.alias.as_deref() }

  /// Names of the contact groups this contact belongs to.
  pub fn groups(&self) -> impl Iterator<Item = &str> {
    self.groups.iter().map(String::as_str)
  }
}

impl Contact for ContactRecord {
  fn name(&self) -> &str { &self.name }

  fn is_member_of(&self, group: &str) -> bool { self.groups.contains(group) }
}

#[derive(Debug)]
pub struct HostRecord {
  name:     String,
  /// Effective contacts: direct ones plus members of the host's contact
  /// groups.
  contacts: BTreeSet<String>,
}

impl HostRecord {
  pub fn contact_names(&self) -> impl Iterator<Item = &str> {
    self.contacts.iter().map(String::as_str)
  }
}

impl Host for HostRecord {
  fn name(&self) -> &str { &self.name }

  fn has_contact(&self, contact: &dyn Contact) -> bool {
    self.contacts.contains(contact.name())
  }
}

#[derive(Debug)]
pub struct ServiceRecord {
  host:        Arc<HostRecord>,
  description: String,
  contacts:    BTreeSet<String>,
}

impl ServiceRecord {
  pub fn host_name(&self) -> &str { &self.host.name }

  pub fn contact_names(&self) -> impl Iterator<Item = &str> {
    self.contacts.iter().map(String::as_str)
  }
}

impl Service for ServiceRecord {
  fn description(&self) -> &str { &self.description }

  fn host(&self) -> &dyn Host { &*self.host }

  fn has_contact(&self, contact: &dyn Contact) -> bool {
    self.contacts.contains(contact.name())
  }
}

#[derive(Debug)]
pub struct HostGroupRecord {
  name:    String,
  members: Vec<Arc<HostRecord>>,
}

impl HostGroupRecord {
  pub fn members(&self) -> impl Iterator<Item = &HostRecord> {
    self.members.iter().map(Arc::as_ref)
  }
}

impl HostGroup for HostGroupRecord {
  fn name(&self) -> &str { &self.name }

  fn any_host(&self, pred: &mut dyn FnMut(&dyn Host) -> bool) -> bool {
    self.members.iter().any(|host| pred(&**host))
  }
}

#[derive(Debug)]
pub struct ServiceGroupRecord {
  name:    String,
  members: Vec<Arc<ServiceRecord>>,
}

impl ServiceGroupRecord {
  pub fn members(&self) -> impl Iterator<Item = &ServiceRecord> {
    self.members.iter().map(Arc::as_ref)
  }
}

impl ServiceGroup for ServiceGroupRecord {
  fn name(&self) -> &str { &self.name }

  fn any_service(&self, pred: &mut dyn FnMut(&dyn Service) -> bool) -> bool {
    self.members.iter().any(|service| pred(&**service))
  }
}

// ─── Graph ───────────────────────────────────────────────────────────────────

/// The monitoring object table. Immutable once built; safe to share across
/// threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct ObjectGraph {
  contacts:       BTreeMap<String, ContactRecord>,
  hosts:          BTreeMap<String, Arc<HostRecord>>,
  /// Keyed by host name, then service description.
  services:       BTreeMap<String, BTreeMap<String, Arc<ServiceRecord>>>,
  host_groups:    BTreeMap<String, HostGroupRecord>,
  service_groups: BTreeMap<String, ServiceGroupRecord>,
}

impl ObjectGraph {
  /// Resolve `defs` into a graph.
  ///
  /// Fails on duplicate names and on any reference to an object that is not
  /// defined.
  pub fn from_definitions(defs: ObjectDefinitions) -> Result<Self> {
    let contact_groups = index_contact_groups(&defs.contact_groups)?;

    let mut contacts: BTreeMap<String, ContactRecord> = BTreeMap::new();
    for def in defs.contacts {
      if contacts.contains_key(&def.name) {
        return Err(Error::Duplicate { kind: ObjectKind::Contact, name: def.name });
      }
      let groups = contact_groups
        .iter()
        .filter(|(_, members)| members.contains(&def.name))
        .map(|(group, _)| group.to_string())
        .collect();
      let record = ContactRecord { name: def.name.clone(), alias: def.alias, groups };
      contacts.insert(def.name, record);
    }

    for (group, members) in &contact_groups {
      if let Some(missing) = members.iter().find(|m| !contacts.contains_key(*m)) {
        return Err(Error::UnknownReference {
          owner: format!("contact group {group:?}"),
          kind:  ObjectKind::Contact,
          name:  missing.clone(),
        });
      }
    }

    let resolver = ContactResolver { contacts: &contacts, contact_groups: &contact_groups };

    let mut hosts: BTreeMap<String, Arc<HostRecord>> = BTreeMap::new();
    for def in defs.hosts {
      if hosts.contains_key(&def.name) {
        return Err(Error::Duplicate { kind: ObjectKind::Host, name: def.name });
      }
      let owner    = format!("host {:?}", def.name);
      let contacts = resolver.effective(&owner, &def.contacts, &def.contact_groups)?;
      let record   = HostRecord { name: def.name.clone(), contacts };
      hosts.insert(def.name, Arc::new(record));
    }

    let mut services: BTreeMap<String, BTreeMap<String, Arc<ServiceRecord>>> =
      BTreeMap::new();
    for def in defs.services {
      let owner = format!("service {:?} on {:?}", def.description, def.host_name);
      let host  = hosts.get(&def.host_name).ok_or_else(|| Error::UnknownReference {
        owner: owner.clone(),
        kind:  ObjectKind::Host,
        name:  def.host_name.clone(),
      })?;
      let by_description = services.entry(def.host_name.clone()).or_default();
      if by_description.contains_key(&def.description) {
        return Err(Error::Duplicate {
          kind: ObjectKind::Service,
          name: format!("{};{}", def.host_name, def.description),
        });
      }
      let contacts = resolver.effective(&owner, &def.contacts, &def.contact_groups)?;
      let record   = ServiceRecord {
        host: Arc::clone(host),
        description: def.description.clone(),
        contacts,
      };
      by_description.insert(def.description, Arc::new(record));
    }

    let mut host_groups: BTreeMap<String, HostGroupRecord> = BTreeMap::new();
    for def in defs.host_groups {
      if host_groups.contains_key(&def.name) {
        return Err(Error::Duplicate { kind: ObjectKind::HostGroup, name: def.name });
      }
      let members = def
        .members
        .iter()
        .map(|member| {
          hosts.get(member).cloned().ok_or_else(|| Error::UnknownReference {
            owner: format!("host group {:?}", def.name),
            kind:  ObjectKind::Host,
            name:  member.clone(),
          })
        })
        .collect::<Result<Vec<_>>>()?;
      host_groups.insert(def.name.clone(), HostGroupRecord { name: def.name, members });
    }

    let mut service_groups: BTreeMap<String, ServiceGroupRecord> = BTreeMap::new();
    for def in defs.service_groups {
      if service_groups.contains_key(&def.name) {
        return Err(Error::Duplicate { kind: ObjectKind::ServiceGroup, name: def.name });
      }
      let members = def
        .members
        .iter()
        .map(|ServiceKey { host_name, description }| {
          services
            .get(host_name)
            .and_then(|by_description| by_description.get(description))
            .cloned()
            .ok_or_else(|| Error::UnknownReference {
              owner: format!("service group {:?}", def.name),
              kind:  ObjectKind::Service,
              name:  format!("{host_name};{description}"),
            })
        })
        .collect::<Result<Vec<_>>>()?;
      service_groups.insert(def.name.clone(), ServiceGroupRecord { name: def.name, members });
    }

    let graph = Self { contacts, hosts, services, host_groups, service_groups };
    tracing::info!(
      contacts       = graph.contacts.len(),
      hosts          = graph.hosts.len(),
      services       = graph.services().count(),
      host_groups    = graph.host_groups.len(),
      service_groups = graph.service_groups.len(),
      "object graph built"
    );
    Ok(graph)
  }

  // ── Lookups ───────────────────────────────────────────────────────────

  pub fn find_contact(&self, name: &str) -> Option<&ContactRecord> {
    self.contacts.get(name)
  }

  pub fn find_host(&self, name: &str) -> Option<&HostRecord> {
    self.hosts.get(name).map(Arc::as_ref)
  }

  pub fn find_service(&self, host_name: &str, description: &str) -> Option<&ServiceRecord> {
    self
      .services
      .get(host_name)
      .and_then(|by_description| by_description.get(description))
      .map(Arc::as_ref)
  }

  pub fn find_host_group(&self, name: &str) -> Option<&HostGroupRecord> {
    self.host_groups.get(name)
  }

  pub fn find_service_group(&self, name: &str) -> Option<&ServiceGroupRecord> {
    self.service_groups.get(name)
  }

  /// A contact lookup borrowing this graph, for building subjects.
  pub fn contact_lookup(&self) -> ContactLookup<'_> {
    Box::new(move |name: &str| self.find_contact(name).map(|c| c as &dyn Contact))
  }

  // ── Iteration (sorted by name) ────────────────────────────────────────

  pub fn contacts(&self) -> impl Iterator<Item = &ContactRecord> {
    self.contacts.values()
  }

  pub fn hosts(&self) -> impl Iterator<Item = &HostRecord> {
    self.hosts.values().map(Arc::as_ref)
  }

  pub fn services(&self) -> impl Iterator<Item = &ServiceRecord> {
    self
      .services
      .values()
      .flat_map(|by_description| by_description.values())
      .map(Arc::as_ref)
  }

  pub fn host_groups(&self) -> impl Iterator<Item = &HostGroupRecord> {
    self.host_groups.values()
  }

  pub fn service_groups(&self) -> impl Iterator<Item = &ServiceGroupRecord> {
    self.service_groups.values()
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn index_contact_groups(
  defs: &[ContactGroupDefinition],
) -> Result<BTreeMap<String, BTreeSet<String>>> {
  let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
  for def in defs {
    if groups.contains_key(&def.name) {
      return Err(Error::Duplicate {
        kind: ObjectKind::ContactGroup,
        name: def.name.clone(),
      });
    }
    groups.insert(def.name.clone(), def.members.iter().cloned().collect());
  }
  Ok(groups)
}

struct ContactResolver<'g> {
  contacts:       &'g BTreeMap<String, ContactRecord>,
  contact_groups: &'g BTreeMap<String, BTreeSet<String>>,
}

impl ContactResolver<'_> {
  /// Direct contacts plus all members of the given contact groups.
  fn effective(
    &self,
    owner:    &str,
    contacts: &[String],
    groups:   &[String],
  ) -> Result<BTreeSet<String>> {
    let unknown = |kind, name: &String| Error::UnknownReference {
      owner: owner.to_string(),
      kind,
      name:  name.clone(),
    };

    let mut effective = BTreeSet::new();
    for contact in contacts {
      if !self.contacts.contains_key(contact) {
        return Err(unknown(ObjectKind::Contact, contact));
      }
      effective.insert(contact.clone());
    }
    for group in groups {
      let members = self
        .contact_groups
        .get(group)
        .ok_or_else(|| unknown(ObjectKind::ContactGroup, group))?;
      effective.extend(members.iter().cloned());
    }
    Ok(effective)
  }
}

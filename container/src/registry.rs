//! The bean registry: an insertion-ordered name-to-instance map.

use crate::descriptor::{BeanHandle, ComponentDescriptor};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// One registered bean.
pub struct BeanEntry {
  name: String,
  handle: BeanHandle,
  descriptor: Arc<ComponentDescriptor>,
}

impl BeanEntry {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The descriptor this bean was instantiated from.
  pub fn descriptor(&self) -> &ComponentDescriptor {
    &self.descriptor
  }

  /// The type-erased handle, as stored. Mostly useful for invoking erased
  /// accessors registered on the descriptor.
  pub fn handle(&self) -> &BeanHandle {
    &self.handle
  }

  /// Downcasts the stored handle back to `Arc<T>`. `T` may be a trait object
  /// when the bean was registered through one of its interfaces.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.handle.downcast_ref::<Arc<T>>().cloned()
  }

  /// Resolves the entry as `Arc<T>`, trying the stored handle first and then
  /// every interface view the descriptor declares. This is what lets a field
  /// typed by an interface receive a bean that was registered under an
  /// explicit name, where the registry stores the concrete handle.
  pub fn resolve_as<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    if let Some(direct) = self.resolve::<T>() {
      return Some(direct);
    }
    self.descriptor.interfaces().iter().find_map(|interface| {
      interface
        .view_of(&self.handle)
        .and_then(|view| view.downcast_ref::<Arc<T>>().cloned())
    })
  }
}

/// The name-to-instance mapping built once during startup.
///
/// Writes happen only on the single-threaded build path; after the container
/// is ready the registry is read concurrently without locking. Iteration
/// follows registration order, and a later registration under an existing
/// name replaces the handle without disturbing that order.
#[derive(Default)]
pub struct BeanRegistry {
  order: Vec<String>,
  entries: HashMap<String, BeanEntry>,
}

impl BeanRegistry {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn insert(
    &mut self,
    name: String,
    handle: BeanHandle,
    descriptor: Arc<ComponentDescriptor>,
  ) {
    if !self.entries.contains_key(&name) {
      self.order.push(name.clone());
    }
    self.entries.insert(
      name.clone(),
      BeanEntry {
        name,
        handle,
        descriptor,
      },
    );
  }

  pub fn get(&self, name: &str) -> Option<&BeanEntry> {
    self.entries.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  /// Resolves a bean by name, downcasting to `Arc<T>`.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
    self.get(name).and_then(|entry| entry.resolve::<T>())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Iterates entries in registration order.
  pub fn iter(&self) -> impl Iterator<Item = &BeanEntry> {
    self.order.iter().filter_map(|name| self.entries.get(name))
  }

  /// Iterates bean names in registration order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.order.iter().map(String::as_str)
  }
}

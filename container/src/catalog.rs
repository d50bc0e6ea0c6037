//! The thread-safe descriptor catalog the scanner walks.

use crate::descriptor::ComponentDescriptor;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Holds every installed [`ComponentDescriptor`], keyed by qualified name.
///
/// Descriptors may be installed from any thread, at any point before the
/// container is built. Each installation is stamped with a monotonic sequence
/// number so scans observe an explicit, stable registration order — the order
/// that makes the registry's last-writer-wins behavior deterministic.
#[derive(Default)]
pub struct Catalog {
  entries: DashMap<String, CatalogEntry>,
  next_seq: AtomicU64,
}

struct CatalogEntry {
  seq: u64,
  descriptor: Arc<ComponentDescriptor>,
}

impl Catalog {
  /// Creates an empty catalog.
  pub fn new() -> Self {
    Self::default()
  }

  /// Installs a descriptor. Re-installing the same qualified name replaces
  /// the earlier descriptor and moves it to the end of the scan order.
  pub fn install(&self, descriptor: ComponentDescriptor) {
    let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
    self.entries.insert(
      descriptor.qualified_name().to_string(),
      CatalogEntry {
        seq,
        descriptor: Arc::new(descriptor),
      },
    );
  }

  /// Installs every descriptor of an iterator, in order.
  pub fn install_all(&self, descriptors: impl IntoIterator<Item = ComponentDescriptor>) {
    for descriptor in descriptors {
      self.install(descriptor);
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub(crate) fn get(&self, qualified_name: &str) -> Option<Arc<ComponentDescriptor>> {
    self
      .entries
      .get(qualified_name)
      .map(|entry| Arc::clone(&entry.descriptor))
  }

  /// The qualified names registered under `root`, in registration order.
  pub(crate) fn names_under(&self, root: &str) -> Vec<String> {
    let mut matches: Vec<(u64, String)> = self
      .entries
      .iter()
      .filter(|entry| lives_under(entry.key(), root))
      .map(|entry| (entry.value().seq, entry.key().clone()))
      .collect();
    matches.sort_unstable_by_key(|(seq, _)| *seq);
    matches.into_iter().map(|(_, name)| name).collect()
  }
}

/// Segment-wise module-path prefix test: `a::b` covers `a::b` itself and
/// everything below it, but not `a::bc`.
fn lives_under(qualified_name: &str, root: &str) -> bool {
  match qualified_name.strip_prefix(root) {
    Some("") => true,
    Some(rest) => rest.starts_with("::"),
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::lives_under;

  #[test]
  fn prefix_match_respects_segment_boundaries() {
    assert!(lives_under("demo::web::AppController", "demo"));
    assert!(lives_under("demo::web::AppController", "demo::web"));
    assert!(lives_under("demo::web::AppController", "demo::web::AppController"));
    assert!(!lives_under("demo::webapp::Other", "demo::web"));
    assert!(!lives_under("demo::web::AppController", "app"));
  }
}

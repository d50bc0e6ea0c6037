//! The `Inject<T>` slot that marked fields use to receive their dependency.

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// A write-once slot for an injected dependency.
///
/// A component declares its injectable fields as `Inject<T>` (where `T` may
/// be a trait object) and registers an accessor for each one on its
/// descriptor. The container fills every marked slot during the wiring pass;
/// reads afterwards are lock-free. A wiring target that is absent from the
/// registry leaves the slot holding `None`, so `get` doubles as the
/// "was this wired?" check.
pub struct Inject<T: ?Sized> {
  slot: OnceCell<Option<Arc<T>>>,
}

impl<T: ?Sized> Inject<T> {
  /// Creates an unfilled slot.
  pub const fn empty() -> Self {
    Self {
      slot: OnceCell::new(),
    }
  }

  /// Returns the wired dependency, or `None` if the slot was never filled or
  /// its target was absent from the registry.
  pub fn get(&self) -> Option<Arc<T>> {
    self.slot.get().cloned().flatten()
  }

  /// Whether the wiring pass resolved an actual dependency into this slot.
  pub fn is_wired(&self) -> bool {
    matches!(self.slot.get(), Some(Some(_)))
  }

  /// Fills the slot. The first write wins, so wiring the same instance
  /// reached through several registry names is idempotent.
  pub fn fill(&self, value: Option<Arc<T>>) {
    let _ = self.slot.set(value);
  }
}

impl<T: ?Sized> Default for Inject<T> {
  fn default() -> Self {
    Self::empty()
  }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.slot.get() {
      Some(Some(_)) => f.write_str("Inject(wired)"),
      Some(None) => f.write_str("Inject(unresolved)"),
      None => f.write_str("Inject(empty)"),
    }
  }
}

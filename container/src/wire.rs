//! The dependency wirer: a best-effort pass over every bean's fields.

use crate::naming::derived_bean_name;
use crate::registry::BeanRegistry;
use tracing::{debug, warn};

/// Fills every marked field of every registered bean.
///
/// The target bean name is the marker's explicit value when non-blank, else
/// derived from the field's declared type. A target absent from the registry
/// fills the slot with `None` rather than failing the build; wiring is
/// permissive by contract. Every field of every bean is examined: an
/// unmarked field skips itself, never the rest of its bean.
pub(crate) fn wire(registry: &BeanRegistry) {
  for entry in registry.iter() {
    for field in entry.descriptor().fields() {
      let Some(marker) = field.marker() else {
        continue;
      };
      let target = match marker.bean().map(str::trim).filter(|name| !name.is_empty()) {
        Some(explicit) => explicit.to_string(),
        None => derived_bean_name(marker.target_type()),
      };
      let dependency = registry.get(&target);
      if dependency.is_none() {
        debug!(
          bean = entry.name(),
          field = field.name(),
          target = %target,
          "wiring target absent, leaving the slot empty"
        );
      }
      let Some(assign) = field.assign() else {
        continue;
      };
      if let Err(error) = assign(entry.handle(), dependency) {
        warn!(
          bean = entry.name(),
          field = field.name(),
          error = %error,
          "field assignment failed"
        );
      }
    }
  }
}

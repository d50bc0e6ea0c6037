//! The container itself: the two-phase build and the frozen result.

use crate::catalog::Catalog;
use crate::config::ContainerConfig;
use crate::descriptor::Role;
use crate::error::{ConstructionError, ScanError};
use crate::naming::derived_bean_name;
use crate::registry::BeanRegistry;
use crate::scan::scan;
use crate::wire::wire;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// A built, ready-to-serve IoC container.
///
/// `build` runs the whole startup sequence — scan, instantiate, wire — on the
/// calling thread and returns a frozen container: nothing mutates the
/// registry afterwards, so it may be shared across request-handling threads
/// without locking.
///
/// Build-phase failures favor partial availability over fail-fast. A failed
/// scan starts the container empty; a failed constructor skips that one bean.
/// Both are logged and recorded for inspection rather than returned as hard
/// errors.
pub struct Container {
  registry: BeanRegistry,
  scan_failure: Option<ScanError>,
  construction_failures: Vec<ConstructionError>,
}

impl Container {
  /// Builds a container from the given catalog and configuration.
  pub fn build(catalog: &Catalog, config: &ContainerConfig) -> Container {
    let mut registry = BeanRegistry::new();
    let mut construction_failures = Vec::new();
    let scan_failure = match scan(catalog, config.scan_root()) {
      Ok(names) => {
        instantiate(catalog, &names, &mut registry, &mut construction_failures);
        None
      }
      Err(failure) => {
        error!(
          root = config.scan_root(),
          error = %failure,
          "component scan failed, the container starts empty"
        );
        Some(failure)
      }
    };
    wire(&registry);
    Container {
      registry,
      scan_failure,
      construction_failures,
    }
  }

  /// The frozen bean registry.
  pub fn registry(&self) -> &BeanRegistry {
    &self.registry
  }

  /// Resolves a bean by name, downcasting to `Arc<T>`.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
    self.registry.resolve::<T>(name)
  }

  /// The scan failure recorded during the build, if any.
  pub fn scan_failure(&self) -> Option<&ScanError> {
    self.scan_failure.as_ref()
  }

  /// Every component that could not be constructed during the build.
  pub fn construction_failures(&self) -> &[ConstructionError] {
    &self.construction_failures
  }
}

fn instantiate(
  catalog: &Catalog,
  names: &[String],
  registry: &mut BeanRegistry,
  failures: &mut Vec<ConstructionError>,
) {
  for qualified_name in names {
    let Some(descriptor) = catalog.get(qualified_name) else {
      continue;
    };
    match descriptor.role() {
      Role::None => continue,
      Role::Controller => {
        let bean_name = explicit_or_derived(descriptor.explicit_name(), descriptor.simple_name());
        match descriptor.construct() {
          Ok(handle) => {
            debug!(bean = %bean_name, component = %qualified_name, "registered controller");
            registry.insert(bean_name, handle, Arc::clone(&descriptor));
          }
          Err(failure) => {
            warn!(component = %qualified_name, error = %failure, "skipping unconstructible component");
            failures.push(failure);
          }
        }
      }
      Role::Service => {
        if let Some(explicit) = non_blank(descriptor.explicit_name()) {
          match descriptor.construct() {
            Ok(handle) => {
              debug!(bean = explicit, component = %qualified_name, "registered service");
              registry.insert(explicit.to_string(), handle, Arc::clone(&descriptor));
            }
            Err(failure) => {
              warn!(component = %qualified_name, error = %failure, "skipping unconstructible component");
              failures.push(failure);
            }
          }
          continue;
        }
        if descriptor.interfaces().is_empty() {
          debug!(
            component = %qualified_name,
            "service declares no interfaces and no explicit name, nothing to register"
          );
          continue;
        }
        match descriptor.construct() {
          Ok(handle) => {
            // One instance, one registry key per declared interface.
            for interface in descriptor.interfaces() {
              match interface.view_of(&handle) {
                Some(view) => {
                  let bean_name = derived_bean_name(interface.simple_name());
                  debug!(bean = %bean_name, component = %qualified_name, "registered service interface");
                  registry.insert(bean_name, view, Arc::clone(&descriptor));
                }
                None => warn!(
                  component = %qualified_name,
                  interface = interface.simple_name(),
                  "interface cast failed, skipping this registration"
                ),
              }
            }
          }
          Err(failure) => {
            warn!(component = %qualified_name, error = %failure, "skipping unconstructible component");
            failures.push(failure);
          }
        }
      }
    }
  }
}

fn explicit_or_derived(explicit: Option<&'static str>, simple_name: &str) -> String {
  match non_blank(explicit) {
    Some(name) => name.to_string(),
    None => derived_bean_name(simple_name),
  }
}

fn non_blank(name: Option<&'static str>) -> Option<&'static str> {
  name.map(str::trim).filter(|value| !value.is_empty())
}

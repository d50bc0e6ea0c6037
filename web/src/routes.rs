//! Route declarations and the frozen route table built from them.
//!
//! Controllers declare their routes in a [`RouteCatalog`], the web-side
//! counterpart of the container's component catalog: a base path from the
//! type-level route marker, and one entry per marked method with its path
//! and parameter bindings. [`RouteTable::build`] then walks the registry in
//! registration order and records one normalized path per method, mapped to
//! the owning bean's name and an invoker bound to the method.

use crate::dispatch::Args;
use crate::error::BoxError;
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use trellis::naming::{derived_bean_name, simple_name_of};
use trellis::{BeanHandle, Container, Role};

/// How one declared handler parameter is bound at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamBinding {
  /// Pass the raw request handle through.
  Request,
  /// Pass the raw response handle through.
  Response,
  /// Bind a named query parameter, converted to `kind`.
  Query {
    name: &'static str,
    kind: ParamKind,
  },
}

/// The target type of a bound query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
  /// All values under the name, joined with `,`.
  Text,
  /// The joined text parsed as a base-10 integer.
  Int,
}

pub(crate) type InvokeFn =
  Box<dyn for<'x> Fn(&BeanHandle, Args<'x>) -> Result<Option<String>, BoxError> + Send + Sync>;

/// One route-marked method of a controller.
pub struct MethodSpec {
  name: &'static str,
  path: &'static str,
  params: Vec<ParamBinding>,
  invoke: InvokeFn,
}

impl MethodSpec {
  /// The method name, for diagnostics.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The method-level route marker value, before normalization.
  pub fn path(&self) -> &'static str {
    self.path
  }

  /// The declared parameter bindings, in declaration order.
  pub fn params(&self) -> &[ParamBinding] {
    &self.params
  }

  pub(crate) fn call(
    &self,
    owner: &BeanHandle,
    args: Args<'_>,
  ) -> Result<Option<String>, BoxError> {
    (self.invoke)(owner, args)
  }
}

/// The erased route declarations of one controller type.
pub struct ControllerSpec {
  type_name: &'static str,
  base_path: &'static str,
  methods: Vec<MethodSpec>,
}

impl ControllerSpec {
  /// The simple name of the declaring controller type.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// The type-level route marker value, empty when absent.
  pub fn base_path(&self) -> &'static str {
    self.base_path
  }

  pub fn methods(&self) -> &[MethodSpec] {
    &self.methods
  }
}

/// Typed builder for a controller's [`ControllerSpec`].
pub struct ControllerRoutes<T> {
  base_path: &'static str,
  methods: Vec<MethodSpec>,
  _marker: PhantomData<fn(T)>,
}

impl<T: Any + Send + Sync> ControllerRoutes<T> {
  pub fn new() -> Self {
    Self {
      base_path: "",
      methods: Vec::new(),
      _marker: PhantomData,
    }
  }

  /// Sets the type-level route marker value.
  pub fn base_path(mut self, path: &'static str) -> Self {
    self.base_path = path;
    self
  }

  /// Declares a route-marked method. The handler receives the resolved
  /// controller and the arguments bound per `params`, in declaration order.
  pub fn route<F>(
    mut self,
    name: &'static str,
    path: &'static str,
    params: Vec<ParamBinding>,
    handler: F,
  ) -> Self
  where
    F: Fn(&T, Args<'_>) -> Result<Option<String>, BoxError> + Send + Sync + 'static,
  {
    let invoke: InvokeFn = Box::new(move |owner, args| {
      let this = owner
        .downcast_ref::<Arc<T>>()
        .ok_or_else(|| -> BoxError {
          format!("route `{name}` is bound to a bean of a different type").into()
        })?;
      handler(this.as_ref(), args)
    });
    self.methods.push(MethodSpec {
      name,
      path,
      params,
      invoke,
    });
    self
  }

  pub fn build(self) -> ControllerSpec {
    ControllerSpec {
      type_name: simple_name_of(type_name::<T>()),
      base_path: self.base_path,
      methods: self.methods,
    }
  }
}

impl<T: Any + Send + Sync> Default for ControllerRoutes<T> {
  fn default() -> Self {
    Self::new()
  }
}

/// Where controller types register their route declarations, keyed by the
/// controller's simple type name.
#[derive(Default)]
pub struct RouteCatalog {
  controllers: DashMap<&'static str, Arc<ControllerSpec>>,
}

impl RouteCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Installs a controller's routes. Re-installing the same controller type
  /// replaces the earlier declarations.
  pub fn install(&self, spec: ControllerSpec) {
    self.controllers.insert(spec.type_name(), Arc::new(spec));
  }

  pub fn get(&self, type_name: &str) -> Option<Arc<ControllerSpec>> {
    self.controllers.get(type_name).map(|spec| Arc::clone(spec.value()))
  }

  pub fn len(&self) -> usize {
    self.controllers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.controllers.is_empty()
  }
}

/// One entry of the frozen route table.
pub struct RouteEntry {
  path: String,
  bean_name: String,
  controller: Arc<ControllerSpec>,
  method_index: usize,
}

impl RouteEntry {
  /// The normalized route path.
  pub fn path(&self) -> &str {
    &self.path
  }

  /// The name of the owning bean, derived from the declaring type's simple
  /// name. This intentionally ignores any explicit marker name the bean was
  /// registered under; a mismatch surfaces at dispatch time as an internal
  /// error.
  pub fn bean_name(&self) -> &str {
    &self.bean_name
  }

  pub fn method(&self) -> &MethodSpec {
    &self.controller.methods[self.method_index]
  }
}

/// The path-to-handler mapping built once after the container.
///
/// Built single-threaded, then read-only: the serving phase looks paths up
/// without locking.
#[derive(Default)]
pub struct RouteTable {
  routes: HashMap<String, RouteEntry>,
}

impl RouteTable {
  /// Walks the registry in registration order and records every route of
  /// every controller bean. Two methods normalizing to the same path
  /// collide; the later registration silently replaces the earlier one.
  pub fn build(container: &Container, catalog: &RouteCatalog) -> Self {
    let mut routes = HashMap::new();
    for entry in container.registry().iter() {
      if entry.descriptor().role() != Role::Controller {
        continue;
      }
      let Some(spec) = catalog.get(entry.descriptor().simple_name()) else {
        continue;
      };
      let bean_name = derived_bean_name(spec.type_name());
      for (method_index, method) in spec.methods().iter().enumerate() {
        let path = normalize_path(&format!("/{}/{}", spec.base_path(), method.path()));
        tracing::debug!(path = %path, bean = %bean_name, method = method.name(), "mapped route");
        routes.insert(
          path.clone(),
          RouteEntry {
            path,
            bean_name: bean_name.clone(),
            controller: Arc::clone(&spec),
            method_index,
          },
        );
      }
    }
    RouteTable { routes }
  }

  pub fn get(&self, path: &str) -> Option<&RouteEntry> {
    self.routes.get(path)
  }

  pub fn len(&self) -> usize {
    self.routes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }

  /// Iterates the registered paths, in no particular order.
  pub fn paths(&self) -> impl Iterator<Item = &str> {
    self.routes.keys().map(String::as_str)
  }
}

/// Collapses runs of `/` and guarantees exactly one leading `/`.
///
/// Idempotent: normalizing an already normalized path is a no-op.
pub fn normalize_path(raw: &str) -> String {
  let mut normalized = String::with_capacity(raw.len() + 1);
  normalized.push('/');
  for ch in raw.chars() {
    if ch == '/' && normalized.ends_with('/') {
      continue;
    }
    normalized.push(ch);
  }
  normalized
}

#[cfg(test)]
mod tests {
  use super::normalize_path;

  #[test]
  fn collapses_runs_and_fixes_the_leading_slash() {
    assert_eq!(normalize_path("/app/hello"), "/app/hello");
    assert_eq!(normalize_path("app/hello"), "/app/hello");
    assert_eq!(normalize_path("//app///hello"), "/app/hello");
    assert_eq!(normalize_path("/app//"), "/app/");
    assert_eq!(normalize_path(""), "/");
  }

  #[test]
  fn is_idempotent() {
    for raw in ["/a//b", "a/b/", "///", "", "/x"] {
      let once = normalize_path(raw);
      assert_eq!(normalize_path(&once), once);
    }
  }
}

//! Component descriptors: the explicit, compile-time-checked replacement for
//! runtime marker inspection.
//!
//! A component type registers everything the container would otherwise have
//! to discover reflectively: its role (controller or service), an optional
//! explicit bean name, the interfaces it is reachable through, a constructor,
//! and the list of its fields with their injection markers. The descriptor is
//! built through a typed [`DescriptorBuilder`] and erased on `build()`, so
//! the catalog can hold descriptors for arbitrary types while every accessor
//! closure stays statically checked against the concrete type.

use crate::error::{BoxError, ConstructionError, WireError};
use crate::inject::Inject;
use crate::naming::simple_name_of;
use crate::registry::BeanEntry;
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A type-erased handle to a registered bean.
///
/// The box wraps an `Arc<T>` for concrete registrations, or an
/// `Arc<dyn Interface>` for a service registered through one of its
/// interfaces. Resolution downcasts back to the `Arc`.
pub type BeanHandle = Box<dyn Any + Send + Sync>;

pub(crate) type ConstructorFn = Box<dyn Fn() -> Result<BeanHandle, BoxError> + Send + Sync>;
pub(crate) type CastFn = Box<dyn Fn(&BeanHandle) -> Option<BeanHandle> + Send + Sync>;
pub(crate) type AssignFn =
  Box<dyn Fn(&BeanHandle, Option<&BeanEntry>) -> Result<(), WireError> + Send + Sync>;

/// The role marker a component type carries, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Controller,
  Service,
  /// Present in the catalog, skipped by the instantiator.
  None,
}

/// One interface a service is reachable through.
pub struct InterfaceSpec {
  simple_name: &'static str,
  cast: CastFn,
}

impl InterfaceSpec {
  /// The interface's simple name, used to derive the registration key.
  pub fn simple_name(&self) -> &'static str {
    self.simple_name
  }

  /// Re-views a concrete bean handle as this interface, sharing the instance.
  pub(crate) fn view_of(&self, handle: &BeanHandle) -> Option<BeanHandle> {
    (self.cast)(handle)
  }
}

/// The injection marker carried by a field.
pub struct InjectMarker {
  bean: Option<&'static str>,
  target_type: &'static str,
}

impl InjectMarker {
  /// The explicit target bean name, if the marker carries one.
  pub fn bean(&self) -> Option<&'static str> {
    self.bean
  }

  /// The simple name of the field's declared type, used to derive the target
  /// bean name when no explicit name is given.
  pub fn target_type(&self) -> &'static str {
    self.target_type
  }
}

/// One declared field of a component type.
///
/// Unmarked fields are listed too: the wirer must visit every field and skip
/// the unmarked ones individually rather than aborting the bean.
pub struct FieldSpec {
  name: &'static str,
  marker: Option<InjectMarker>,
  assign: Option<AssignFn>,
}

impl FieldSpec {
  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn marker(&self) -> Option<&InjectMarker> {
    self.marker.as_ref()
  }

  pub(crate) fn assign(&self) -> Option<&AssignFn> {
    self.assign.as_ref()
  }
}

/// The erased registration record for one component type.
pub struct ComponentDescriptor {
  qualified_name: String,
  simple_name: &'static str,
  role: Role,
  explicit_name: Option<&'static str>,
  interfaces: Vec<InterfaceSpec>,
  constructor: Option<ConstructorFn>,
  fields: Vec<FieldSpec>,
}

impl ComponentDescriptor {
  /// Starts a descriptor for a controller type.
  pub fn controller<T: Any + Send + Sync>() -> DescriptorBuilder<T> {
    DescriptorBuilder::new(Role::Controller)
  }

  /// Starts a descriptor for a service type.
  pub fn service<T: Any + Send + Sync>() -> DescriptorBuilder<T> {
    DescriptorBuilder::new(Role::Service)
  }

  /// Starts a descriptor for a type without a component role. Such types are
  /// visible to the scanner but never instantiated.
  pub fn plain<T: Any + Send + Sync>() -> DescriptorBuilder<T> {
    DescriptorBuilder::new(Role::None)
  }

  pub fn qualified_name(&self) -> &str {
    &self.qualified_name
  }

  pub fn simple_name(&self) -> &'static str {
    self.simple_name
  }

  pub fn role(&self) -> Role {
    self.role
  }

  pub fn explicit_name(&self) -> Option<&'static str> {
    self.explicit_name
  }

  pub fn fields(&self) -> &[FieldSpec] {
    &self.fields
  }

  pub(crate) fn interfaces(&self) -> &[InterfaceSpec] {
    &self.interfaces
  }

  pub(crate) fn construct(&self) -> Result<BeanHandle, ConstructionError> {
    match &self.constructor {
      Some(constructor) => constructor().map_err(|source| ConstructionError::Failed {
        qualified_name: self.qualified_name.clone(),
        source,
      }),
      None => Err(ConstructionError::MissingConstructor {
        qualified_name: self.qualified_name.clone(),
      }),
    }
  }
}

impl fmt::Debug for ComponentDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ComponentDescriptor")
      .field("qualified_name", &self.qualified_name)
      .field("role", &self.role)
      .field("explicit_name", &self.explicit_name)
      .field("interfaces", &self.interfaces.len())
      .field("fields", &self.fields.len())
      .finish()
  }
}

/// Typed builder for a [`ComponentDescriptor`].
///
/// All accessors are plain function pointers, so the resulting descriptor
/// carries no captured state beyond what the builder erased.
pub struct DescriptorBuilder<T> {
  role: Role,
  namespace: Option<String>,
  explicit_name: Option<&'static str>,
  interfaces: Vec<InterfaceSpec>,
  constructor: Option<ConstructorFn>,
  fields: Vec<FieldSpec>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> DescriptorBuilder<T> {
  fn new(role: Role) -> Self {
    Self {
      role,
      namespace: None,
      explicit_name: None,
      interfaces: Vec::new(),
      constructor: None,
      fields: Vec::new(),
      _marker: PhantomData,
    }
  }

  /// Overrides the namespace the component is scanned under. Without this
  /// the qualified name is derived from the type's own module path.
  pub fn at(mut self, namespace: impl Into<String>) -> Self {
    self.namespace = Some(namespace.into());
    self
  }

  /// Sets the marker's explicit bean name. A blank value is treated the same
  /// as no value: the name is derived from the simple type name instead.
  pub fn named(mut self, name: &'static str) -> Self {
    self.explicit_name = Some(name);
    self
  }

  /// Registers the component's constructor.
  pub fn construct_with<F>(mut self, factory: F) -> Self
  where
    F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
  {
    self.constructor = Some(Box::new(move || {
      factory().map(|instance| Box::new(Arc::new(instance)) as BeanHandle)
    }));
    self
  }

  /// Registers `T::default` as the constructor, the analogue of requiring a
  /// zero-argument constructor.
  pub fn default_construct(self) -> Self
  where
    T: Default,
  {
    self.construct_with(|| Ok(T::default()))
  }

  /// Declares that the component implements interface `I`. The `unsize`
  /// function is the coercion from the concrete `Arc` to the interface `Arc`;
  /// `|it| it` suffices at every call site.
  pub fn implements<I>(mut self, unsize: fn(Arc<T>) -> Arc<I>) -> Self
  where
    I: ?Sized + Any + Send + Sync,
  {
    self.interfaces.push(InterfaceSpec {
      simple_name: simple_name_of(type_name::<I>()),
      cast: Box::new(move |handle| {
        handle
          .downcast_ref::<Arc<T>>()
          .map(|concrete| Box::new(unsize(Arc::clone(concrete))) as BeanHandle)
      }),
    });
    self
  }

  /// Declares a field without an injection marker. The wirer skips it but
  /// still has to walk past it to reach later fields.
  pub fn plain_field(mut self, name: &'static str) -> Self {
    self.fields.push(FieldSpec {
      name,
      marker: None,
      assign: None,
    });
    self
  }

  /// Declares an injectable field whose target bean name is derived from the
  /// declared type `D`.
  pub fn inject_field<D>(self, name: &'static str, access: fn(&T) -> &Inject<D>) -> Self
  where
    D: ?Sized + Any + Send + Sync,
  {
    self.push_injectable(name, None, access)
  }

  /// Declares an injectable field with an explicit target bean name.
  pub fn inject_field_named<D>(
    self,
    name: &'static str,
    bean: &'static str,
    access: fn(&T) -> &Inject<D>,
  ) -> Self
  where
    D: ?Sized + Any + Send + Sync,
  {
    self.push_injectable(name, Some(bean), access)
  }

  fn push_injectable<D>(
    mut self,
    name: &'static str,
    bean: Option<&'static str>,
    access: fn(&T) -> &Inject<D>,
  ) -> Self
  where
    D: ?Sized + Any + Send + Sync,
  {
    let target_type = simple_name_of(type_name::<D>());
    let assign: AssignFn = Box::new(move |owner, dependency| {
      let this = owner
        .downcast_ref::<Arc<T>>()
        .ok_or(WireError::OwnerMismatch { field: name })?;
      let resolved = match dependency {
        Some(entry) => Some(entry.resolve_as::<D>().ok_or(WireError::TypeMismatch {
          field: name,
          expected: target_type,
        })?),
        None => None,
      };
      access(this.as_ref()).fill(resolved);
      Ok(())
    });
    self.fields.push(FieldSpec {
      name,
      marker: Some(InjectMarker { bean, target_type }),
      assign: Some(assign),
    });
    self
  }

  /// Erases the builder into a [`ComponentDescriptor`].
  pub fn build(self) -> ComponentDescriptor {
    let simple_name = simple_name_of(type_name::<T>());
    let qualified_name = match self.namespace {
      Some(namespace) => format!("{namespace}::{simple_name}"),
      None => type_name::<T>().to_string(),
    };
    ComponentDescriptor {
      qualified_name,
      simple_name,
      role: self.role,
      explicit_name: self.explicit_name,
      interfaces: self.interfaces,
      constructor: self.constructor,
      fields: self.fields,
    }
  }
}

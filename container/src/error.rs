//! Error types for the build phase of the container.

use thiserror::Error;

/// Boxed error type used for opaque underlying causes, such as a failing
/// component constructor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The scan root could not be resolved against the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
  #[error("scan root must not be empty")]
  EmptyRoot,
  #[error("scan root `{root}` does not match any registered component")]
  RootNotFound { root: String },
}

/// A single component could not be instantiated.
///
/// Construction errors are non-fatal: the container logs them, records them
/// for inspection, and continues with the remaining components. The affected
/// bean is simply absent from the registry.
#[derive(Debug, Error)]
pub enum ConstructionError {
  #[error("component `{qualified_name}` has no registered constructor")]
  MissingConstructor { qualified_name: String },
  #[error("constructor for component `{qualified_name}` failed")]
  Failed {
    qualified_name: String,
    #[source]
    source: BoxError,
  },
}

impl ConstructionError {
  /// The qualified name of the component that could not be constructed.
  pub fn qualified_name(&self) -> &str {
    match self {
      ConstructionError::MissingConstructor { qualified_name } => qualified_name,
      ConstructionError::Failed { qualified_name, .. } => qualified_name,
    }
  }
}

/// A field assignment failed during the wiring pass.
///
/// These indicate a mismatch between a descriptor and the types it was
/// registered for. The wirer logs them and moves on to the next field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
  #[error("bean handle for field `{field}` does not match its declaring type")]
  OwnerMismatch { field: &'static str },
  #[error("field `{field}` expects `{expected}` but the registered bean has a different type")]
  TypeMismatch {
    field: &'static str,
    expected: &'static str,
  },
}

/// Configuration could not be loaded or parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read configuration file")]
  Io(#[from] std::io::Error),
  #[error("failed to parse configuration")]
  Parse(#[from] serde_yaml::Error),
}

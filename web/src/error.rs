//! Error types for the serving phase.

use thiserror::Error;

pub use trellis::BoxError;

/// A single request's dispatch failed.
///
/// Every variant is isolated to the request that produced it; none of them
/// affect the container or other in-flight requests.
#[derive(Debug, Error)]
pub enum DispatchError {
  /// A declared query parameter could not be bound to its target type.
  #[error("failed to bind parameter `{name}`: {reason}")]
  Binding { name: String, reason: String },
  /// The handler body failed. The underlying cause is carried for the
  /// embedding transport; full detail goes to the log, not the wire.
  #[error("handler for `{path}` failed")]
  Invocation {
    path: String,
    #[source]
    source: BoxError,
  },
  /// The route points at a bean that is missing from the registry. This is a
  /// container-invariant violation, i.e. a build-phase bug, answered as a
  /// generic server error instead of crashing the process.
  #[error("no bean `{bean}` backs the route `{path}`")]
  Internal { path: String, bean: String },
}

/// A handler adapter asked for an argument the dispatcher did not bind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgError {
  #[error("argument {index} is out of range")]
  OutOfRange { index: usize },
  #[error("argument {index} is not a {expected}")]
  Kind {
    index: usize,
    expected: &'static str,
  },
}

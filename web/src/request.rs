//! Abstract transport handles: the request the dispatcher consumes and the
//! response handlers may write through.
//!
//! The dispatcher is transport-agnostic. Whatever actually speaks HTTP builds
//! a [`Request`] from the wire, hands both handles to
//! [`Dispatcher::dispatch`], and renders the returned outcome back onto the
//! wire.
//!
//! [`Dispatcher::dispatch`]: crate::Dispatcher::dispatch

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// An incoming request: a URI path plus a parameter multimap.
#[derive(Debug, Default, Clone)]
pub struct Request {
  path: String,
  params: HashMap<String, Vec<String>>,
}

impl Request {
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      params: HashMap::new(),
    }
  }

  /// Appends a parameter value. Repeating a name accumulates values under it.
  pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.params.entry(name.into()).or_default().push(value.into());
    self
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn parameter_map(&self) -> &HashMap<String, Vec<String>> {
    &self.params
  }

  /// The values recorded under `name`. The lookup is an exact string match;
  /// no normalization is applied to the key.
  pub fn values(&self, name: &str) -> Option<&[String]> {
    self.params.get(name).map(Vec::as_slice)
  }
}

/// An opaque response handle passable to handler methods.
///
/// The container never writes to it; it exists so a handler can produce
/// output besides its return value. The body buffer is interior-mutable so a
/// single handle can be shared with the handler by reference.
#[derive(Debug, Default)]
pub struct Response {
  body: Mutex<String>,
}

impl Response {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends text to the response body.
  pub fn write(&self, text: &str) {
    self.lock().push_str(text);
  }

  /// Returns a copy of the body written so far.
  pub fn body(&self) -> String {
    self.lock().clone()
  }

  /// Takes the body, leaving the buffer empty.
  pub fn take_body(&self) -> String {
    std::mem::take(&mut *self.lock())
  }

  fn lock(&self) -> MutexGuard<'_, String> {
    match self.body.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    }
  }
}

//! The request dispatcher: path lookup, parameter binding, invocation.

use crate::error::{ArgError, DispatchError};
use crate::request::{Request, Response};
use crate::routes::{normalize_path, ParamBinding, ParamKind, RouteCatalog, RouteTable};
use std::sync::Arc;
use trellis::Container;
use tracing::error;

/// The arguments bound for one invocation, in declaration order.
///
/// Handler adapters read them positionally, mirroring the parameter list the
/// route was declared with.
pub struct Args<'x> {
  values: Vec<ArgValue<'x>>,
}

/// One bound argument.
pub enum ArgValue<'x> {
  Request(&'x Request),
  Response(&'x Response),
  Text(String),
  Int(i32),
}

impl<'x> Args<'x> {
  pub(crate) fn new(values: Vec<ArgValue<'x>>) -> Self {
    Self { values }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&ArgValue<'x>> {
    self.values.get(index)
  }

  /// The text argument at `index`.
  pub fn text(&self, index: usize) -> Result<&str, ArgError> {
    match self.values.get(index) {
      Some(ArgValue::Text(value)) => Ok(value),
      Some(_) => Err(ArgError::Kind {
        index,
        expected: "text parameter",
      }),
      None => Err(ArgError::OutOfRange { index }),
    }
  }

  /// The integer argument at `index`.
  pub fn int(&self, index: usize) -> Result<i32, ArgError> {
    match self.values.get(index) {
      Some(ArgValue::Int(value)) => Ok(*value),
      Some(_) => Err(ArgError::Kind {
        index,
        expected: "integer parameter",
      }),
      None => Err(ArgError::OutOfRange { index }),
    }
  }

  /// The raw request handle at `index`.
  pub fn request(&self, index: usize) -> Result<&'x Request, ArgError> {
    match self.values.get(index) {
      Some(ArgValue::Request(request)) => Ok(request),
      Some(_) => Err(ArgError::Kind {
        index,
        expected: "request handle",
      }),
      None => Err(ArgError::OutOfRange { index }),
    }
  }

  /// The raw response handle at `index`.
  pub fn response(&self, index: usize) -> Result<&'x Response, ArgError> {
    match self.values.get(index) {
      Some(ArgValue::Response(response)) => Ok(response),
      Some(_) => Err(ArgError::Kind {
        index,
        expected: "response handle",
      }),
      None => Err(ArgError::OutOfRange { index }),
    }
  }
}

/// What a dispatch produced, for the transport layer to render.
#[derive(Debug)]
pub enum Outcome {
  /// The handler ran. `None` means it produced no body.
  Ok(Option<String>),
  /// No route matches the normalized path. A normal, user-facing result,
  /// not a system fault.
  NotFound,
  /// The request failed; see [`DispatchError`] for how.
  Error(DispatchError),
}

impl Outcome {
  pub fn is_ok(&self) -> bool {
    matches!(self, Outcome::Ok(_))
  }

  /// The response body, when the outcome is `Ok` with one.
  pub fn body(&self) -> Option<&str> {
    match self {
      Outcome::Ok(Some(body)) => Some(body),
      _ => None,
    }
  }
}

/// Dispatches requests against a built container and its route table.
///
/// Dispatch is read-only: many threads may call [`Dispatcher::dispatch`]
/// concurrently. Each call binds its own argument values; shared bean state
/// is the bean's own concern. No timeout is placed around the handler — a
/// slow handler stalls its calling thread.
pub struct Dispatcher {
  container: Arc<Container>,
  routes: RouteTable,
  context_path: Option<String>,
}

impl Dispatcher {
  /// Wraps an already-built route table.
  pub fn new(container: Arc<Container>, routes: RouteTable) -> Self {
    Self {
      container,
      routes,
      context_path: None,
    }
  }

  /// Builds the route table from `catalog` and wraps it.
  pub fn build(container: Arc<Container>, catalog: &RouteCatalog) -> Self {
    let routes = RouteTable::build(&container, catalog);
    Self::new(container, routes)
  }

  /// Sets a context-path prefix stripped from every request path before
  /// route lookup.
  pub fn with_context_path(mut self, prefix: impl Into<String>) -> Self {
    self.context_path = Some(prefix.into());
    self
  }

  pub fn routes(&self) -> &RouteTable {
    &self.routes
  }

  pub fn container(&self) -> &Container {
    &self.container
  }

  /// Dispatches one request.
  pub fn dispatch(&self, request: &Request, response: &Response) -> Outcome {
    let path = self.normalize_request_path(request.path());
    let Some(route) = self.routes.get(&path) else {
      return Outcome::NotFound;
    };

    let method = route.method();
    let mut values = Vec::with_capacity(method.params().len());
    for binding in method.params().iter().copied() {
      match binding {
        ParamBinding::Request => values.push(ArgValue::Request(request)),
        ParamBinding::Response => values.push(ArgValue::Response(response)),
        ParamBinding::Query { name, kind } => match bind_query(request, name, kind) {
          Ok(value) => values.push(value),
          Err(failure) => return Outcome::Error(failure),
        },
      }
    }

    let Some(owner) = self.container.registry().get(route.bean_name()) else {
      error!(
        path = %path,
        bean = route.bean_name(),
        "route points at a bean missing from the registry"
      );
      return Outcome::Error(DispatchError::Internal {
        path,
        bean: route.bean_name().to_string(),
      });
    };

    match method.call(owner.handle(), Args::new(values)) {
      Ok(body) => Outcome::Ok(body),
      Err(source) => {
        error!(
          path = %path,
          method = method.name(),
          error = %source,
          "handler invocation failed"
        );
        Outcome::Error(DispatchError::Invocation { path, source })
      }
    }
  }

  fn normalize_request_path(&self, raw: &str) -> String {
    let stripped = match &self.context_path {
      Some(prefix) => raw.strip_prefix(prefix.as_str()).unwrap_or(raw),
      None => raw,
    };
    normalize_path(stripped)
  }
}

/// Binds one named query parameter. The joined literal representation of all
/// values backs both target kinds, so `a` and `b` under one name bind as
/// `"a,b"`.
fn bind_query<'x>(
  request: &Request,
  name: &'static str,
  kind: ParamKind,
) -> Result<ArgValue<'x>, DispatchError> {
  let Some(values) = request.values(name) else {
    return Err(DispatchError::Binding {
      name: name.to_string(),
      reason: "parameter missing from request".to_string(),
    });
  };
  let joined = values.join(",");
  match kind {
    ParamKind::Text => Ok(ArgValue::Text(joined)),
    ParamKind::Int => match joined.parse::<i32>() {
      Ok(value) => Ok(ArgValue::Int(value)),
      Err(_) => Err(DispatchError::Binding {
        name: name.to_string(),
        reason: format!("`{joined}` is not a base-10 integer"),
      }),
    },
  }
}

//! # Trellis Web
//!
//! Route table construction and request dispatch for controllers managed by
//! a [`trellis`] container.
//!
//! Controllers declare their routes in a [`RouteCatalog`] — a base path plus
//! one entry per handler method with its parameter bindings. After the
//! container is built, [`RouteTable::build`] maps each normalized path to
//! the owning bean and an invoker bound to the method; [`Dispatcher`] then
//! serves requests read-only: look the path up, bind the declared
//! parameters, resolve the bean, invoke. Failures are typed [`Outcome`]s,
//! isolated per request — the transport layer decides how each renders onto
//! the wire.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use trellis::{Catalog, ComponentDescriptor, Container, ContainerConfig};
//! use trellis_web::{
//!   ControllerRoutes, Dispatcher, Outcome, ParamBinding, ParamKind, Request, Response,
//!   RouteCatalog,
//! };
//!
//! #[derive(Default)]
//! struct PingController;
//!
//! impl PingController {
//!   fn ping(&self, who: &str) -> String {
//!     format!("pong {who}")
//!   }
//! }
//!
//! // Component side: the container knows the controller.
//! let components = Catalog::new();
//! components.install(
//!   ComponentDescriptor::controller::<PingController>()
//!     .at("app::web")
//!     .default_construct()
//!     .build(),
//! );
//!
//! // Web side: the controller declares its routes.
//! let routes = RouteCatalog::new();
//! routes.install(
//!   ControllerRoutes::<PingController>::new()
//!     .base_path("app")
//!     .route(
//!       "ping",
//!       "ping",
//!       vec![ParamBinding::Query { name: "who", kind: ParamKind::Text }],
//!       |controller, args| Ok(Some(controller.ping(args.text(0)?))),
//!     )
//!     .build(),
//! );
//!
//! let container = Arc::new(Container::build(&components, &ContainerConfig::new("app")));
//! let dispatcher = Dispatcher::build(container, &routes);
//!
//! let request = Request::new("/app/ping").with_param("who", "world");
//! let response = Response::new();
//! match dispatcher.dispatch(&request, &response) {
//!   Outcome::Ok(Some(body)) => assert_eq!(body, "pong world"),
//!   other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

mod dispatch;
mod error;
mod request;
mod routes;

pub use dispatch::{ArgValue, Args, Dispatcher, Outcome};
pub use error::{ArgError, BoxError, DispatchError};
pub use request::{Request, Response};
pub use routes::{
  normalize_path, ControllerRoutes, ControllerSpec, MethodSpec, ParamBinding, ParamKind,
  RouteCatalog, RouteEntry, RouteTable,
};

//! # Trellis
//!
//! A two-phase, thread-safe Inversion of Control (IoC) container for Rust.
//!
//! Trellis manages singleton beans discovered from a catalog of explicit
//! component descriptors. A build phase runs once, single-threaded: the
//! scanner resolves a package root against the catalog, the instantiator
//! constructs one instance per component role, and the wirer fills every
//! marked field. The resulting container is frozen — nothing mutates the
//! registry after `build` returns, so many threads may resolve beans
//! concurrently without locking.
//!
//! ## Core Concepts
//!
//! - **Catalog**: where component types register their descriptors (role,
//!   name, interfaces, constructor, fields).
//! - **Scanner**: resolves a `::`-separated package root to the set of
//!   qualified component names under it, recursively.
//! - **Registry**: the name-to-instance mapping, insertion-ordered, with
//!   deterministic last-writer-wins on name collisions.
//! - **Wiring**: `Inject<T>` fields are filled by name once all beans exist,
//!   so mutually dependent components need no resolution ordering.
//!
//! ## Quick Start
//!
//! ```
//! use trellis::{Catalog, ComponentDescriptor, Container, ContainerConfig, Inject};
//!
//! // Define a trait and a concrete implementation.
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     "Hello!".to_string()
//!   }
//! }
//!
//! // A controller that declares its dependency as an `Inject` slot.
//! #[derive(Default)]
//! struct GreetController {
//!   greeter: Inject<dyn Greeter>,
//! }
//!
//! // Register both components with explicit descriptors.
//! let catalog = Catalog::new();
//! catalog.install(
//!   ComponentDescriptor::service::<EnglishGreeter>()
//!     .at("app::greeting")
//!     .default_construct()
//!     .implements::<dyn Greeter>(|greeter| greeter)
//!     .build(),
//! );
//! catalog.install(
//!   ComponentDescriptor::controller::<GreetController>()
//!     .at("app::web")
//!     .default_construct()
//!     .inject_field::<dyn Greeter>("greeter", |controller| &controller.greeter)
//!     .build(),
//! );
//!
//! // Build once; resolve from anywhere afterwards.
//! let container = Container::build(&catalog, &ContainerConfig::new("app"));
//!
//! let controller = container.resolve::<GreetController>("greetController").unwrap();
//! assert_eq!(controller.greeter.get().unwrap().greet(), "Hello!");
//! ```

mod catalog;
mod config;
mod container;
mod descriptor;
mod error;
mod inject;
pub mod naming;
mod registry;
mod scan;
mod wire;

pub use catalog::Catalog;
pub use config::ContainerConfig;
pub use container::Container;
pub use descriptor::{
  BeanHandle, ComponentDescriptor, DescriptorBuilder, FieldSpec, InjectMarker, InterfaceSpec, Role,
};
pub use error::{BoxError, ConfigError, ConstructionError, ScanError, WireError};
pub use inject::Inject;
pub use registry::{BeanEntry, BeanRegistry};
pub use scan::scan;

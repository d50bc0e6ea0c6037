use pretty_assertions::assert_eq;
use std::sync::Arc;
use trellis::{BoxError, Catalog, ComponentDescriptor, Container, ContainerConfig, Inject};
use trellis_web::{
  normalize_path, ControllerRoutes, DispatchError, Dispatcher, Outcome, ParamBinding, ParamKind,
  Request, Response, RouteCatalog,
};

// --- Test Fixtures ---

trait AppService: Send + Sync {
  fn hello_world(&self, name: &str, age: i32) -> String;
}

#[derive(Default)]
struct AppServiceImpl;
impl AppService for AppServiceImpl {
  fn hello_world(&self, name: &str, age: i32) -> String {
    format!("{name}{age}")
  }
}

#[derive(Default)]
struct AppController {
  app_service: Inject<dyn AppService>,
}

impl AppController {
  fn hello_world(&self, name: &str, age: i32) -> Result<String, BoxError> {
    let service = self.app_service.get().ok_or("appService was not wired")?;
    Ok(service.hello_world(name, age))
  }
}

// Exercises raw request/response pass-through and handler failure.
#[derive(Default)]
struct EchoController;

fn name_and_age() -> Vec<ParamBinding> {
  vec![
    ParamBinding::Query {
      name: "name",
      kind: ParamKind::Text,
    },
    ParamBinding::Query {
      name: "age",
      kind: ParamKind::Int,
    },
  ]
}

fn demo_components() -> Catalog {
  let catalog = Catalog::new();
  catalog.install(
    ComponentDescriptor::service::<AppServiceImpl>()
      .at("demo::service")
      .default_construct()
      .implements::<dyn AppService>(|service| service)
      .build(),
  );
  catalog.install(
    ComponentDescriptor::controller::<AppController>()
      .at("demo::controller")
      .default_construct()
      .inject_field::<dyn AppService>("app_service", |controller| &controller.app_service)
      .build(),
  );
  catalog.install(
    ComponentDescriptor::controller::<EchoController>()
      .at("demo::controller")
      .default_construct()
      .build(),
  );
  catalog
}

fn demo_routes() -> RouteCatalog {
  let catalog = RouteCatalog::new();
  catalog.install(
    ControllerRoutes::<AppController>::new()
      .base_path("app")
      .route("hello_world", "hello", name_and_age(), |controller, args| {
        controller.hello_world(args.text(0)?, args.int(1)?).map(Some)
      })
      .build(),
  );
  catalog.install(
    ControllerRoutes::<EchoController>::new()
      .base_path("echo")
      .route(
        "dump",
        "dump",
        vec![ParamBinding::Request, ParamBinding::Response],
        |_, args| {
          let request = args.request(0)?;
          let response = args.response(1)?;
          response.write(request.path());
          Ok(None)
        },
      )
      .route("boom", "boom", Vec::new(), |_, _| Err("kaboom".into()))
      .build(),
  );
  catalog
}

fn demo_dispatcher() -> Dispatcher {
  let container = Arc::new(Container::build(
    &demo_components(),
    &ContainerConfig::new("demo"),
  ));
  Dispatcher::build(container, &demo_routes())
}

// --- Normalization Tests ---

#[test]
fn normalization_always_yields_one_leading_slash_and_no_runs() {
  for raw in ["/app/hello", "app/hello", "//app///hello", "", "///", "/a/b/"] {
    let normalized = normalize_path(raw);
    assert!(normalized.starts_with('/'));
    assert!(!normalized.starts_with("//"));
    assert!(!normalized.contains("//"));
    // Idempotence.
    assert_eq!(normalize_path(&normalized), normalized);
  }
}

// --- Dispatch Tests ---

#[test]
fn binds_declared_parameters_and_invokes_the_handler() {
  let dispatcher = demo_dispatcher();
  let request = Request::new("/app/hello")
    .with_param("name", "World")
    .with_param("age", "7");

  let outcome = dispatcher.dispatch(&request, &Response::new());

  assert_eq!(outcome.body(), Some("World7"));
}

#[test]
fn repeated_parameter_values_join_with_a_comma() {
  let dispatcher = demo_dispatcher();
  let request = Request::new("/app/hello")
    .with_param("name", "a")
    .with_param("name", "b")
    .with_param("age", "1");

  let outcome = dispatcher.dispatch(&request, &Response::new());

  assert_eq!(outcome.body(), Some("a,b1"));
}

#[test]
fn unknown_paths_are_not_found_never_internal_errors() {
  let dispatcher = demo_dispatcher();

  let outcome = dispatcher.dispatch(&Request::new("/app/missing"), &Response::new());

  assert!(matches!(outcome, Outcome::NotFound));
}

#[test]
fn sloppy_slashes_normalize_to_the_registered_route() {
  let dispatcher = demo_dispatcher();
  let request = Request::new("/app///hello")
    .with_param("name", "World")
    .with_param("age", "7");

  let outcome = dispatcher.dispatch(&request, &Response::new());

  assert_eq!(outcome.body(), Some("World7"));
}

#[test]
fn the_context_path_prefix_is_stripped_before_lookup() {
  let dispatcher = demo_dispatcher().with_context_path("/petstore");
  let request = Request::new("/petstore/app/hello")
    .with_param("name", "World")
    .with_param("age", "7");

  let outcome = dispatcher.dispatch(&request, &Response::new());

  assert_eq!(outcome.body(), Some("World7"));
}

#[test]
fn non_numeric_integer_input_is_a_binding_error() {
  let dispatcher = demo_dispatcher();
  let request = Request::new("/app/hello")
    .with_param("name", "World")
    .with_param("age", "notanumber");

  let outcome = dispatcher.dispatch(&request, &Response::new());

  match outcome {
    Outcome::Error(DispatchError::Binding { name, .. }) => assert_eq!(name, "age"),
    other => panic!("expected a binding error, got {other:?}"),
  }
}

#[test]
fn a_missing_declared_parameter_is_a_binding_error() {
  let dispatcher = demo_dispatcher();
  let request = Request::new("/app/hello").with_param("name", "World");

  let outcome = dispatcher.dispatch(&request, &Response::new());

  match outcome {
    Outcome::Error(DispatchError::Binding { name, .. }) => assert_eq!(name, "age"),
    other => panic!("expected a binding error, got {other:?}"),
  }
}

#[test]
fn raw_request_and_response_handles_pass_through() {
  let dispatcher = demo_dispatcher();
  let response = Response::new();

  let outcome = dispatcher.dispatch(&Request::new("/echo/dump"), &response);

  assert!(matches!(outcome, Outcome::Ok(None)));
  assert_eq!(response.take_body(), "/echo/dump");
}

#[test]
fn handler_failure_is_an_invocation_error_isolated_to_the_request() {
  let dispatcher = demo_dispatcher();

  let outcome = dispatcher.dispatch(&Request::new("/echo/boom"), &Response::new());
  assert!(matches!(
    outcome,
    Outcome::Error(DispatchError::Invocation { .. })
  ));

  // The container and route table are untouched; the next request succeeds.
  let request = Request::new("/app/hello")
    .with_param("name", "World")
    .with_param("age", "7");
  let outcome = dispatcher.dispatch(&request, &Response::new());
  assert_eq!(outcome.body(), Some("World7"));
}

// --- Route Table Tests ---

#[test]
fn routes_to_an_explicitly_renamed_controller_surface_internal_errors() {
  // The route table derives the bean name from the declaring type's simple
  // name even when the bean was registered under an explicit marker name.
  // The lookup miss is answered, loudly, as an internal error.
  let catalog = Catalog::new();
  catalog.install(
    ComponentDescriptor::controller::<EchoController>()
      .at("demo::controller")
      .named("frontDoor")
      .default_construct()
      .build(),
  );
  let routes = RouteCatalog::new();
  routes.install(
    ControllerRoutes::<EchoController>::new()
      .base_path("echo")
      .route("dump", "dump", Vec::new(), |_, _| Ok(None))
      .build(),
  );
  let container = Arc::new(Container::build(&catalog, &ContainerConfig::new("demo")));
  let dispatcher = Dispatcher::build(container, &routes);

  let outcome = dispatcher.dispatch(&Request::new("/echo/dump"), &Response::new());

  match outcome {
    Outcome::Error(DispatchError::Internal { bean, .. }) => assert_eq!(bean, "echoController"),
    other => panic!("expected an internal error, got {other:?}"),
  }
}

#[test]
fn a_later_route_on_the_same_path_silently_wins() {
  let catalog = Catalog::new();
  catalog.install(
    ComponentDescriptor::controller::<EchoController>()
      .at("demo::controller")
      .default_construct()
      .build(),
  );
  let routes = RouteCatalog::new();
  routes.install(
    ControllerRoutes::<EchoController>::new()
      .base_path("dup")
      .route("first", "hit", Vec::new(), |_, _| Ok(Some("first".to_string())))
      .route("second", "//hit", Vec::new(), |_, _| {
        Ok(Some("second".to_string()))
      })
      .build(),
  );
  let container = Arc::new(Container::build(&catalog, &ContainerConfig::new("demo")));
  let dispatcher = Dispatcher::build(container, &routes);

  assert_eq!(dispatcher.routes().len(), 1);
  let outcome = dispatcher.dispatch(&Request::new("/dup/hit"), &Response::new());
  assert_eq!(outcome.body(), Some("second"));
}

#[test]
fn controllers_without_route_declarations_contribute_nothing() {
  let catalog = Catalog::new();
  catalog.install(
    ComponentDescriptor::controller::<EchoController>()
      .at("demo::controller")
      .default_construct()
      .build(),
  );
  let container = Arc::new(Container::build(&catalog, &ContainerConfig::new("demo")));
  let dispatcher = Dispatcher::build(container, &RouteCatalog::new());

  assert!(dispatcher.routes().is_empty());
  assert!(matches!(
    dispatcher.dispatch(&Request::new("/echo/dump"), &Response::new()),
    Outcome::NotFound
  ));
}

// --- Concurrency Tests ---

#[test]
fn concurrent_dispatches_bind_their_own_arguments() {
  let dispatcher = demo_dispatcher();

  std::thread::scope(|scope| {
    for thread in 0..8 {
      let dispatcher = &dispatcher;
      scope.spawn(move || {
        for _ in 0..50 {
          let request = Request::new("/app/hello")
            .with_param("name", format!("t{thread}"))
            .with_param("age", thread.to_string());
          let outcome = dispatcher.dispatch(&request, &Response::new());
          assert_eq!(outcome.body().unwrap(), format!("t{thread}{thread}"));
        }
      });
    }
  });
}

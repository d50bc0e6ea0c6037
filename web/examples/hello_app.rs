use std::sync::Arc;
use trellis::{BoxError, Catalog, ComponentDescriptor, Container, ContainerConfig, Inject};
use trellis_web::{
  ControllerRoutes, Dispatcher, Outcome, ParamBinding, ParamKind, Request, Response, RouteCatalog,
};

// --- Service layer ---

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

// --- Controller layer ---

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

// --- Registration ---

fn components() -> Vec<ComponentDescriptor> {
  vec![
    ComponentDescriptor::service::<AppServiceImpl>()
      .at("demo::service")
      .default_construct()
      .implements::<dyn AppService>(|service| service)
      .build(),
    ComponentDescriptor::controller::<AppController>()
      .at("demo::controller")
      .default_construct()
      .inject_field::<dyn AppService>("app_service", |controller| &controller.app_service)
      .build(),
  ]
}

fn routes() -> RouteCatalog {
  let catalog = RouteCatalog::new();
  catalog.install(
    ControllerRoutes::<AppController>::new()
      .base_path("app")
      .route(
        "hello_world",
        "hello",
        vec![
          ParamBinding::Query {
            name: "name",
            kind: ParamKind::Text,
          },
          ParamBinding::Query {
            name: "age",
            kind: ParamKind::Int,
          },
        ],
        |controller, args| {
          let name = args.text(0)?;
          let age = args.int(1)?;
          controller.hello_world(name, age).map(Some)
        },
      )
      .build(),
  );
  catalog
}

// --- A toy transport loop ---

fn main() -> Result<(), BoxError> {
  // The configuration would normally come from a file next to the binary;
  // only `scan_root` is consumed by the container itself.
  let config = ContainerConfig::from_yaml_str(
    "scan_root: demo\n\
     greeting_locale: en\n",
  )?;

  let catalog = Catalog::new();
  catalog.install_all(components());

  let container = Arc::new(Container::build(&catalog, &config));
  let dispatcher = Dispatcher::build(container, &routes());

  let requests = [
    Request::new("/app/hello")
      .with_param("name", "World")
      .with_param("age", "7"),
    Request::new("/app//hello")
      .with_param("name", "Slashes")
      .with_param("age", "1"),
    Request::new("/app/missing"),
    Request::new("/app/hello")
      .with_param("name", "World")
      .with_param("age", "notanumber"),
  ];

  for request in requests {
    let response = Response::new();
    match dispatcher.dispatch(&request, &response) {
      Outcome::Ok(Some(body)) => println!("{} -> {body}", request.path()),
      Outcome::Ok(None) => println!("{} -> (no body)", request.path()),
      Outcome::NotFound => println!("{} -> 404 Not Found!!", request.path()),
      Outcome::Error(error) => println!("{} -> 500 Exception,Details: {error}", request.path()),
    }
  }

  Ok(())
}

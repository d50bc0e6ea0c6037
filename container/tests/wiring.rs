use pretty_assertions::assert_eq;
use trellis::{Catalog, ComponentDescriptor, Container, ContainerConfig, Inject};

// --- Test Fixtures ---

trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

#[derive(Default)]
struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

#[derive(Default)]
struct GermanGreeter;
impl Greeter for GermanGreeter {
  fn greet(&self) -> String {
    "Hallo!".to_string()
  }
}

// The injectable field comes *after* an unmarked one; the wirer must walk
// past the unmarked field instead of abandoning the bean.
#[derive(Default)]
struct LabeledController {
  label: String,
  greeter: Inject<dyn Greeter>,
}

trait Quote: Send + Sync {
  fn quote(&self) -> String;
}

#[derive(Default)]
struct DailyQuote;
impl Quote for DailyQuote {
  fn quote(&self) -> String {
    "carpe diem".to_string()
  }
}

// A service with a dependency of its own: wiring covers services too, not
// just controllers.
#[derive(Default)]
struct QuotingGreeter {
  quotes: Inject<dyn Quote>,
}
impl Greeter for QuotingGreeter {
  fn greet(&self) -> String {
    match self.quotes.get() {
      Some(quotes) => format!("Hello! {}", quotes.quote()),
      None => "Hello!".to_string(),
    }
  }
}

fn labeled_controller() -> ComponentDescriptor {
  ComponentDescriptor::controller::<LabeledController>()
    .at("fixtures::web")
    .default_construct()
    .plain_field("label")
    .inject_field::<dyn Greeter>("greeter", |controller| &controller.greeter)
    .build()
}

fn english_greeter() -> ComponentDescriptor {
  ComponentDescriptor::service::<EnglishGreeter>()
    .at("fixtures::greeting")
    .default_construct()
    .implements::<dyn Greeter>(|greeter| greeter)
    .build()
}

// --- Wiring Tests ---

#[test]
fn fields_after_an_unmarked_field_still_wire() {
  // Arrange
  let catalog = Catalog::new();
  catalog.install(english_greeter());
  catalog.install(labeled_controller());

  // Act
  let container = Container::build(&catalog, &ContainerConfig::new("fixtures"));

  // Assert
  let controller = container.resolve::<LabeledController>("labeledController").unwrap();
  assert_eq!(controller.label, "");
  assert!(controller.greeter.is_wired());
  assert_eq!(controller.greeter.get().unwrap().greet(), "Hello!");
}

#[test]
fn absent_target_leaves_the_slot_unresolved() {
  // No greeter service registered at all.
  let catalog = Catalog::new();
  catalog.install(labeled_controller());

  let container = Container::build(&catalog, &ContainerConfig::new("fixtures"));

  let controller = container.resolve::<LabeledController>("labeledController").unwrap();
  assert!(!controller.greeter.is_wired());
  assert!(controller.greeter.get().is_none());
  // Permissive wiring: the build itself stays clean.
  assert!(container.scan_failure().is_none());
  assert!(container.construction_failures().is_empty());
}

#[test]
fn explicit_marker_name_overrides_the_derived_target() {
  // Arrange: the derived target `greeter` resolves to the English greeter,
  // but the marker names the German one, registered under an explicit name.
  let catalog = Catalog::new();
  catalog.install(english_greeter());
  catalog.install(
    ComponentDescriptor::service::<GermanGreeter>()
      .at("fixtures::greeting")
      .named("germanGreeter")
      .default_construct()
      .implements::<dyn Greeter>(|greeter| greeter)
      .build(),
  );
  catalog.install(
    ComponentDescriptor::controller::<LabeledController>()
      .at("fixtures::web")
      .default_construct()
      .plain_field("label")
      .inject_field_named::<dyn Greeter>("greeter", "germanGreeter", |controller| {
        &controller.greeter
      })
      .build(),
  );

  // Act
  let container = Container::build(&catalog, &ContainerConfig::new("fixtures"));

  // Assert: the explicitly named bean stores a concrete handle, and the
  // interface-typed slot still receives it.
  let controller = container.resolve::<LabeledController>("labeledController").unwrap();
  assert_eq!(controller.greeter.get().unwrap().greet(), "Hallo!");
}

#[test]
fn blank_marker_name_falls_back_to_the_derived_target() {
  let catalog = Catalog::new();
  catalog.install(english_greeter());
  catalog.install(
    ComponentDescriptor::controller::<LabeledController>()
      .at("fixtures::web")
      .default_construct()
      .inject_field_named::<dyn Greeter>("greeter", "  ", |controller| &controller.greeter)
      .build(),
  );

  let container = Container::build(&catalog, &ContainerConfig::new("fixtures"));

  let controller = container.resolve::<LabeledController>("labeledController").unwrap();
  assert_eq!(controller.greeter.get().unwrap().greet(), "Hello!");
}

#[test]
fn services_are_wired_like_any_other_bean() {
  let catalog = Catalog::new();
  catalog.install(
    ComponentDescriptor::service::<DailyQuote>()
      .at("fixtures::greeting")
      .default_construct()
      .implements::<dyn Quote>(|quote| quote)
      .build(),
  );
  catalog.install(
    ComponentDescriptor::service::<QuotingGreeter>()
      .at("fixtures::greeting")
      .default_construct()
      .implements::<dyn Greeter>(|greeter| greeter)
      .inject_field::<dyn Quote>("quotes", |greeter| &greeter.quotes)
      .build(),
  );

  let container = Container::build(&catalog, &ContainerConfig::new("fixtures"));

  let greeter = container.resolve::<dyn Greeter>("greeter").unwrap();
  assert_eq!(greeter.greet(), "Hello! carpe diem");
}

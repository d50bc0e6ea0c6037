//! Bean-name derivation rules shared by the container and the web layer.

/// Derives a bean name from a type or interface simple name by lower-casing
/// its first letter, e.g. `AppService` becomes `appService`.
pub fn derived_bean_name(simple_name: &str) -> String {
  let mut chars = simple_name.chars();
  match chars.next() {
    Some(first) => first.to_lowercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Extracts the last `::` segment of a fully qualified type name.
///
/// Works for trait object names as well: the `dyn` prefix belongs to the
/// leading segments and falls away with them.
pub fn simple_name_of(type_name: &'static str) -> &'static str {
  type_name.rsplit("::").next().unwrap_or(type_name)
}

//! The type scanner: resolves a package root against the catalog.

use crate::catalog::Catalog;
use crate::error::ScanError;

/// Yields the qualified name of every component registered under `root`,
/// recursively through nested namespaces, in registration order.
///
/// The root is a `::`-separated module-path prefix; surrounding whitespace is
/// ignored. A blank root, or a root no registered component lives under,
/// fails with a [`ScanError`]. The catalog is not consumed, so a scan can be
/// repeated at any time.
pub fn scan(catalog: &Catalog, root: &str) -> Result<Vec<String>, ScanError> {
  let root = root.trim();
  if root.is_empty() {
    return Err(ScanError::EmptyRoot);
  }
  let names = catalog.names_under(root);
  if names.is_empty() {
    return Err(ScanError::RootNotFound {
      root: root.to_string(),
    });
  }
  Ok(names)
}

//! Startup configuration for a container build.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The loaded key-value configuration handed to [`Container::build`].
///
/// Only `scan_root` is consumed by the container itself. Every other key is
/// carried opaquely and stays available to the embedding application through
/// [`ContainerConfig::extra`].
///
/// [`Container::build`]: crate::Container::build
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerConfig {
  scan_root: String,
  #[serde(flatten)]
  extras: HashMap<String, serde_yaml::Value>,
}

impl ContainerConfig {
  /// Creates a configuration with just a scan root.
  pub fn new(scan_root: impl Into<String>) -> Self {
    Self {
      scan_root: scan_root.into(),
      extras: HashMap::new(),
    }
  }

  /// Parses a configuration from YAML text.
  pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(text)?)
  }

  /// Loads and parses a configuration file.
  pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Self::from_yaml_str(&text)
  }

  /// The package root the container scans.
  pub fn scan_root(&self) -> &str {
    &self.scan_root
  }

  /// An opaque extra key, if present in the loaded configuration.
  pub fn extra(&self, key: &str) -> Option<&serde_yaml::Value> {
    self.extras.get(key)
  }
}

//! Resolver configuration loader describing the package build layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::paths::PathLayout;

const DEFAULT_CONFIG_FILE: &str = "exports.config.json";

/// Discoverable configuration describing where sources and build outputs live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// File name of the package manifest inside a package directory.
  pub manifest_file: String,
  /// Path segment marking the compiled output area.
  pub dist_segment: String,
  /// Path segment the output area is rewritten to when deriving source entries.
  pub source_segment: String,
  /// Extension given to derived source entries.
  pub source_extension: String,
  /// Extension given to derived declaration files.
  pub declaration_extension: String,
  /// Prefix stripped from output paths when naming bundle entry points.
  pub output_dir_prefix: String,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    let layout = PathLayout::default();
    Self {
      manifest_file: "package.json".into(),
      dist_segment: layout.dist_segment,
      source_segment: layout.source_segment,
      source_extension: layout.source_extension,
      declaration_extension: layout.declaration_extension,
      output_dir_prefix: layout.output_dir_prefix,
    }
  }
}

impl ResolverConfig {
  /// Attempt to load configuration from the provided package directory.
  ///
  /// A missing or malformed configuration file falls back to the defaults.
  pub fn discover(package_dir: &Path) -> Self {
    let candidate = package_dir.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
      Ok(config) => Some(config),
      Err(err) => {
        tracing::warn!(path = %path.display(), error = %err, "ignoring malformed resolver config");
        None
      }
    }
  }

  /// Path layout used for source and declaration path inference.
  pub fn to_layout(&self) -> PathLayout {
    PathLayout {
      dist_segment: self.dist_segment.clone(),
      source_segment: self.source_segment.clone(),
      source_extension: self.source_extension.clone(),
      declaration_extension: self.declaration_extension.clone(),
      output_dir_prefix: self.output_dir_prefix.clone(),
    }
  }

  /// Location of the manifest file within a package directory.
  pub fn manifest_path(&self, package_dir: &Path) -> PathBuf {
    package_dir.join(&self.manifest_file)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_defaults_without_config_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let config = ResolverConfig::discover(temp.path());

    assert_eq!(config.manifest_file, "package.json");
    assert_eq!(config.to_layout(), PathLayout::default());
  }

  #[test]
  fn discover_reads_partial_overrides() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(
      temp.path().join(DEFAULT_CONFIG_FILE),
      r#"{"dist_segment": "/build/", "source_extension": ".tsx"}"#,
    )
    .expect("failed to write config");

    let config = ResolverConfig::discover(temp.path());
    assert_eq!(config.dist_segment, "/build/");
    assert_eq!(config.source_extension, ".tsx");
    assert_eq!(config.source_segment, "/src/");
    assert_eq!(
      config.manifest_path(temp.path()),
      temp.path().join("package.json")
    );
  }

  #[test]
  fn discover_ignores_malformed_config() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").expect("failed to write config");

    let config = ResolverConfig::discover(temp.path());
    assert_eq!(config.dist_segment, "/dist/");
  }
}

//! Loading and interpreting the export-related fields of a `package.json` manifest.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::ModuleFormat;

/// Declared module system of the package (`"type"` field).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModuleType {
  /// `"type": "module"`: plain `.js` files are ES modules.
  Module,
  /// Any other or missing value: plain `.js` files are CommonJS.
  #[default]
  CommonJs,
}

impl ModuleType {
  /// Format assumed for paths whose extension does not name one.
  pub fn default_format(self) -> ModuleFormat {
    match self {
      Self::Module => ModuleFormat::Import,
      Self::CommonJs => ModuleFormat::Require,
    }
  }
}

impl<'de> Deserialize<'de> for ModuleType {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
      Some("module") => Self::Module,
      _ => Self::CommonJs,
    })
  }
}

/// Raw `exports` field, keeping track of whether the key exists at all.
///
/// A manifest with `"exports": null` is not the same as one without the key: only the
/// latter falls back to the legacy `main`/`module` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExportsField {
  /// No `exports` key in the manifest.
  #[default]
  Absent,
  /// The key is present with the given value, which may be `null`.
  Present(Value),
}

impl<'de> Deserialize<'de> for ExportsField {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Value::deserialize(deserializer).map(Self::Present)
  }
}

/// Export-related view of a package manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
  /// Package name, used in error messages.
  #[serde(default, deserialize_with = "lenient_string")]
  pub name: Option<String>,
  /// Declared module system.
  #[serde(default, rename = "type")]
  pub module_type: ModuleType,
  /// Legacy CommonJS entry.
  #[serde(default, deserialize_with = "lenient_string")]
  pub main: Option<String>,
  /// Legacy ES module entry.
  #[serde(default, deserialize_with = "lenient_string")]
  pub module: Option<String>,
  /// Legacy declaration entry.
  #[serde(default, deserialize_with = "lenient_string")]
  pub types: Option<String>,
  /// Legacy browser build entry. Object-form `browser` replacement maps are ignored.
  #[serde(default, deserialize_with = "lenient_string")]
  pub browser: Option<String>,
  /// Explicit source entry.
  #[serde(default, deserialize_with = "lenient_string")]
  pub entry: Option<String>,
  /// Modern `exports` declaration.
  #[serde(default)]
  pub exports: ExportsField,
}

impl PackageManifest {
  /// Interpret an already parsed manifest value.
  pub fn from_value(value: Value) -> serde_json::Result<Self> {
    serde_json::from_value(value)
  }

  /// Parse manifest JSON text.
  pub fn from_json(text: &str) -> serde_json::Result<Self> {
    serde_json::from_str(text)
  }
}

/// Keep string values, treat anything else as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(match value {
    Some(Value::String(text)) => Some(text),
    Some(Value::Null) | None => None,
    Some(other) => {
      tracing::debug!(value = %other, "ignoring non-string manifest field");
      None
    }
  })
}

/// Load the raw manifest value from disk.
pub fn load_manifest_value(path: &Path) -> Result<Value> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("manifest not found at {}", path.display()))?;
  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse package manifest {}", path.display()))
}

/// Load a package manifest from disk along with the raw value it was read from.
pub fn load_manifest_with_value(path: &Path) -> Result<(PackageManifest, Value)> {
  let value = load_manifest_value(path)?;
  let manifest = PackageManifest::from_value(value.clone())
    .with_context(|| format!("unsupported package manifest shape in {}", path.display()))?;
  Ok((manifest, value))
}

/// Load a package manifest from disk.
pub fn load_manifest(path: &Path) -> Result<PackageManifest> {
  load_manifest_with_value(path).map(|(manifest, _)| manifest)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tempfile::tempdir;

  #[test]
  fn missing_exports_key_is_absent() {
    let manifest = PackageManifest::from_value(json!({ "main": "./dist/index.cjs" }))
      .expect("manifest parses");
    assert_eq!(manifest.exports, ExportsField::Absent);
    assert_eq!(manifest.main.as_deref(), Some("./dist/index.cjs"));
  }

  #[test]
  fn null_exports_is_present() {
    let manifest =
      PackageManifest::from_value(json!({ "exports": null })).expect("manifest parses");
    assert_eq!(manifest.exports, ExportsField::Present(Value::Null));
  }

  #[test]
  fn module_type_only_recognises_module() {
    let module = PackageManifest::from_value(json!({ "type": "module" })).expect("parses");
    let commonjs = PackageManifest::from_value(json!({ "type": "commonjs" })).expect("parses");
    let missing = PackageManifest::from_value(json!({})).expect("parses");

    assert_eq!(module.module_type, ModuleType::Module);
    assert_eq!(commonjs.module_type, ModuleType::CommonJs);
    assert_eq!(missing.module_type, ModuleType::CommonJs);
  }

  #[test]
  fn object_browser_field_is_ignored() {
    let manifest = PackageManifest::from_value(json!({
      "main": "./dist/index.cjs",
      "browser": { "./dist/fs.js": false }
    }))
    .expect("manifest parses");
    assert_eq!(manifest.browser, None);
  }

  #[test]
  fn exports_keep_insertion_order() {
    let manifest = PackageManifest::from_json(
      r#"{"exports": {"node": "./dist/n.cjs", "browser": "./dist/b.mjs", "default": "./dist/d.js"}}"#,
    )
    .expect("manifest parses");
    let ExportsField::Present(Value::Object(map)) = manifest.exports else {
      panic!("expected an exports object");
    };
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["node", "browser", "default"]);
  }

  #[test]
  fn load_manifest_reports_missing_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let err = load_manifest(&temp.path().join("package.json")).expect_err("file is missing");
    assert!(err.to_string().contains("manifest not found"));
  }

  #[test]
  fn load_manifest_reads_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("package.json");
    fs::write(&path, r#"{"name": "pkg", "exports": "./dist/index.mjs"}"#)
      .expect("failed to write manifest");

    let manifest = load_manifest(&path).expect("manifest loads");
    assert_eq!(manifest.name.as_deref(), Some("pkg"));
    assert_eq!(
      manifest.exports,
      ExportsField::Present(json!("./dist/index.mjs"))
    );
  }

  #[test]
  fn load_manifest_with_value_keeps_raw_fields() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("package.json");
    fs::write(&path, r#"{"name": "pkg", "since": 2021, "main": "./dist/index.cjs"}"#)
      .expect("failed to write manifest");

    let (manifest, value) = load_manifest_with_value(&path).expect("manifest loads");
    assert_eq!(manifest.main.as_deref(), Some("./dist/index.cjs"));
    assert_eq!(value["since"], json!(2021));
  }

  #[test]
  fn load_manifest_with_value_rejects_non_object_manifest() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("package.json");
    fs::write(&path, "[1, 2]").expect("failed to write manifest");

    let err = load_manifest_with_value(&path).expect_err("array is not a manifest");
    assert!(err.to_string().contains("unsupported package manifest shape"));
  }
}

use crate::conditions::Condition;
use crate::manifest::PackageManifest;
use crate::models::ResolvedTarget;
use crate::paths::PathLayout;

use super::error::ResolutionError;

/// Resolve a manifest without `exports` from its `main`, `module`, `types`, `browser` and
/// `entry` fields. Yields a `default` target plus a `browser` target when one is declared.
pub(crate) fn resolve_legacy(
  manifest: &PackageManifest,
  layout: &PathLayout,
) -> Result<Vec<ResolvedTarget>, ResolutionError> {
  let default_path = manifest
    .main
    .as_deref()
    .or(manifest.module.as_deref())
    .ok_or_else(|| ResolutionError::MissingLegacyEntry {
      package: manifest.name.clone(),
    })?;

  let mut targets = vec![ResolvedTarget {
    entry: manifest
      .entry
      .clone()
      .unwrap_or_else(|| layout.entry_path(default_path)),
    import: manifest.module.clone(),
    require: manifest.main.clone(),
    types: Some(
      manifest
        .types
        .clone()
        .unwrap_or_else(|| layout.types_path(default_path)),
    ),
    targets: vec![Condition::Default],
  }];

  if let Some(browser) = manifest.browser.as_deref() {
    targets.push(ResolvedTarget {
      entry: manifest
        .entry
        .clone()
        .unwrap_or_else(|| layout.entry_path(browser)),
      import: None,
      require: Some(browser.to_string()),
      types: Some(
        manifest
          .types
          .clone()
          .unwrap_or_else(|| layout.types_path(browser)),
      ),
      targets: vec![Condition::Browser],
    });
  }

  tracing::debug!(count = targets.len(), "resolved legacy manifest fields");
  Ok(targets)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn manifest(value: serde_json::Value) -> PackageManifest {
    PackageManifest::from_value(value).expect("manifest parses")
  }

  #[test]
  fn module_only_manifest_uses_module_as_default() {
    let targets = resolve_legacy(
      &manifest(json!({ "module": "./dist/index.mjs" })),
      &PathLayout::default(),
    )
    .expect("legacy resolves");

    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].import.as_deref(), Some("./dist/index.mjs"));
    assert_eq!(targets[0].require, None);
    assert_eq!(targets[0].entry, "./src/index.ts");
  }

  #[test]
  fn main_takes_priority_over_module_for_derived_paths() {
    let targets = resolve_legacy(
      &manifest(json!({ "main": "./dist/cjs/index.js", "module": "./dist/esm/index.js" })),
      &PathLayout::default(),
    )
    .expect("legacy resolves");

    assert_eq!(targets[0].entry, "./src/cjs/index.ts");
    assert_eq!(targets[0].types.as_deref(), Some("./dist/cjs/index.d.ts"));
    assert_eq!(targets[0].import.as_deref(), Some("./dist/esm/index.js"));
  }

  #[test]
  fn explicit_entry_and_types_apply_to_both_targets() {
    let targets = resolve_legacy(
      &manifest(json!({
        "main": "./dist/index.cjs",
        "browser": "./dist/index.browser.cjs",
        "types": "./index.d.ts",
        "entry": "./lib/index.ts",
      })),
      &PathLayout::default(),
    )
    .expect("legacy resolves");

    assert_eq!(targets.len(), 2);
    for target in &targets {
      assert_eq!(target.entry, "./lib/index.ts");
      assert_eq!(target.types.as_deref(), Some("./index.d.ts"));
    }
  }

  #[test]
  fn missing_main_and_module_fails() {
    let err = resolve_legacy(
      &manifest(json!({ "name": "pkg", "types": "./index.d.ts" })),
      &PathLayout::default(),
    )
    .expect_err("no legacy entry");
    assert_eq!(err, ResolutionError::MissingLegacyEntry {
      package: Some("pkg".into())
    });
  }
}

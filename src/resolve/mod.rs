//! Resolution of package manifest export declarations into flat build targets.
//!
//! The manifest shape decides the strategy: without an `exports` key the legacy
//! `main`/`module`/`browser` fields are used, a string `exports` is a single default target,
//! and an object is walked as a tree of subpaths and conditions.

mod error;
mod exports;
mod legacy;
mod walker;

use serde_json::Value;

pub use error::ResolutionError;
pub use exports::{ExportsNode, is_subpath_key};

use crate::conditions::Condition;
use crate::config::ResolverConfig;
use crate::manifest::{ExportsField, PackageManifest};
use crate::models::{ResolvedTarget, TagPath};
use crate::paths::{PathLayout, format_of};

use legacy::resolve_legacy;
use walker::TreeWalker;

/// Resolver turning manifests into [`ResolvedTarget`] lists under a given path layout.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
  layout: PathLayout,
}

impl Resolver {
  /// Create a resolver using the provided layout conventions.
  pub fn new(layout: PathLayout) -> Self {
    Self { layout }
  }

  /// Create a resolver from a loaded configuration.
  pub fn from_config(config: &ResolverConfig) -> Self {
    Self::new(config.to_layout())
  }

  /// Layout used for path inference.
  pub fn layout(&self) -> &PathLayout {
    &self.layout
  }

  /// Resolve every export the manifest declares, in declaration order.
  pub fn resolve(
    &self,
    manifest: &PackageManifest,
  ) -> Result<Vec<ResolvedTarget>, ResolutionError> {
    let exports = match &manifest.exports {
      ExportsField::Absent => {
        tracing::debug!(package = ?manifest.name, "no exports key, using legacy fields");
        return resolve_legacy(manifest, &self.layout);
      }
      ExportsField::Present(exports) => exports,
    };

    match exports {
      Value::String(path) => Ok(vec![self.resolve_bare_path(manifest, path)]),
      Value::Object(_) => {
        let walker = TreeWalker {
          layout: &self.layout,
          module_type: manifest.module_type,
          package: manifest.name.as_deref(),
        };
        let mut targets = Vec::new();
        if let Some(node) = ExportsNode::from_value(exports) {
          walker.walk(&node, &TagPath::new(), &mut targets)?;
        }
        tracing::debug!(package = ?manifest.name, count = targets.len(), "resolved exports tree");
        Ok(targets)
      }
      _ => Err(ResolutionError::MissingExports {
        package: manifest.name.clone(),
      }),
    }
  }

  /// `"exports": "./path"`: a single target whose format follows the declared package type.
  fn resolve_bare_path(&self, manifest: &PackageManifest, path: &str) -> ResolvedTarget {
    let format = manifest.module_type.default_format();
    if format != format_of(path, manifest.module_type) {
      tracing::debug!(%path, %format, "bare exports path uses the declared package type");
    }
    ResolvedTarget::single(
      format,
      path,
      self.layout.entry_path(path),
      self.layout.types_path(path),
      vec![Condition::Default],
    )
  }
}

/// Resolve a manifest with the default layout (`./dist/` outputs, `./src/*.ts` sources).
pub fn resolve(manifest: &PackageManifest) -> Result<Vec<ResolvedTarget>, ResolutionError> {
  Resolver::default().resolve(manifest)
}

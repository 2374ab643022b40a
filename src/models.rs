//! Data structures produced while resolving package exports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;

/// Ordered list of conditions traversed from the root of an exports tree to a target.
pub type TagPath = Vec<Condition>;

/// Module format a compiled output path is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
  /// ES module output, exported under the `import` condition.
  Import,
  /// CommonJS output, exported under the `require` condition.
  Require,
}

impl ModuleFormat {
  /// Condition key the format is exported under.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Import => "import",
      Self::Require => "require",
    }
  }
}

impl fmt::Display for ModuleFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One flattened build target: the paths to produce and the conditions they satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolvedTarget {
  /// Source entry file the outputs are compiled from.
  pub entry: String,
  /// ES module output path.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub import: Option<String>,
  /// CommonJS output path.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub require: Option<String>,
  /// Type declaration output path.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub types: Option<String>,
  /// Conditions this target satisfies, root to leaf.
  pub targets: TagPath,
}

impl ResolvedTarget {
  /// Build a target carrying a single output path under the given format.
  pub fn single(
    format: ModuleFormat,
    output: &str,
    entry: String,
    types: String,
    targets: TagPath,
  ) -> Self {
    let mut target = Self {
      entry,
      import: None,
      require: None,
      types: Some(types),
      targets,
    };
    *target.output_mut(format) = Some(output.to_string());
    target
  }

  /// Output path for the given format, if the target produces one.
  pub fn output(&self, format: ModuleFormat) -> Option<&str> {
    match format {
      ModuleFormat::Import => self.import.as_deref(),
      ModuleFormat::Require => self.require.as_deref(),
    }
  }

  fn output_mut(&mut self, format: ModuleFormat) -> &mut Option<String> {
    match format {
      ModuleFormat::Import => &mut self.import,
      ModuleFormat::Require => &mut self.require,
    }
  }

  /// Output paths in `require`, `import` order.
  pub fn outputs(&self) -> impl Iterator<Item = (ModuleFormat, &str)> {
    [ModuleFormat::Require, ModuleFormat::Import]
      .into_iter()
      .filter_map(|format| self.output(format).map(|path| (format, path)))
  }
}

/// Named bundle entry point paired with the source file that produces it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntryPoint {
  /// Output name relative to the build directory, without extension.
  pub name: String,
  /// Source entry file.
  pub entry: String,
}

//! Path inference helpers deriving declaration, source and format information from output paths.
//!
//! Every helper is total: an output path that does not follow the naming conventions is
//! returned unchanged rather than rejected.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use crate::manifest::ModuleType;
use crate::models::ModuleFormat;

fn module_extension() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\.[cm]?jsx?$").expect("invalid module extension regex"))
}

fn require_extension() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\.(cjsx?|cjs\.jsx?)").expect("invalid require regex"))
}

fn import_extension() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN
    .get_or_init(|| Regex::new(r"\.(mjsx?|esm\.jsx?|mjs\.jsx?)").expect("invalid import regex"))
}

/// Layout conventions relating compiled outputs to their sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
  /// Path segment marking the compiled output area.
  pub dist_segment: String,
  /// Replacement segment for the source area.
  pub source_segment: String,
  /// Extension of source entry files.
  pub source_extension: String,
  /// Extension of type declaration files.
  pub declaration_extension: String,
  /// Prefix stripped from output paths when naming entry points.
  pub output_dir_prefix: String,
}

impl Default for PathLayout {
  fn default() -> Self {
    Self {
      dist_segment: "/dist/".into(),
      source_segment: "/src/".into(),
      source_extension: ".ts".into(),
      declaration_extension: ".d.ts".into(),
      output_dir_prefix: "./dist/".into(),
    }
  }
}

impl PathLayout {
  /// Declaration path for a compiled module: `./dist/a.mjs` becomes `./dist/a.d.ts`.
  pub fn types_path(&self, path: &str) -> String {
    module_extension()
      .replace(path, NoExpand(&self.declaration_extension))
      .into_owned()
  }

  /// Source entry for a compiled module or declaration: `./dist/a.cjs` becomes `./src/a.ts`.
  pub fn entry_path(&self, path: &str) -> String {
    let relocated = if self.dist_segment.is_empty() {
      path.to_string()
    } else {
      path.replacen(&self.dist_segment, &self.source_segment, 1)
    };
    match relocated.strip_suffix(self.declaration_extension.as_str()) {
      Some(stem) if !self.declaration_extension.is_empty() => {
        format!("{stem}{}", self.source_extension)
      }
      _ => module_extension()
        .replace(&relocated, NoExpand(&self.source_extension))
        .into_owned(),
    }
  }

  /// Output path with its module or declaration extension removed.
  pub fn strip_extension<'a>(&self, path: &'a str) -> &'a str {
    if !self.declaration_extension.is_empty()
      && let Some(stem) = path.strip_suffix(self.declaration_extension.as_str())
    {
      return stem;
    }
    match module_extension().find(path) {
      Some(found) => &path[..found.start()],
      None => path,
    }
  }
}

/// Module format of an output path.
///
/// CommonJS and ES module naming conventions (`.cjs`, `.mjs`, `.esm.js`, ...) take
/// precedence; other paths follow the manifest's declared `type`.
pub fn format_of(path: &str, module_type: ModuleType) -> ModuleFormat {
  if require_extension().is_match(path) {
    return ModuleFormat::Require;
  }
  if import_extension().is_match(path) {
    return ModuleFormat::Import;
  }
  module_type.default_format()
}

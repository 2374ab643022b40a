//! Structural classification of modern `exports` values.
//!
//! Supported shapes:
//! - `"./dist/index.js"` - a single path
//! - `{ ".": ..., "./feature": ... }` - subpath map, every key is `"."` or starts with `"./"`
//! - `{ "node": ..., "import": ... }` - conditions node, any other key

use serde_json::{Map, Value};

use crate::conditions::Condition;

/// Exports value classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportsNode {
  /// Output path leaf.
  Path(String),
  /// Public subpaths mapped to their exports. Explicitly unexported (`null`) subpaths are dropped.
  Subpaths(Vec<(String, ExportsNode)>),
  /// Conditions in declaration order.
  Conditions(Vec<(Condition, ExportsNode)>),
}

/// Returns `true` for keys naming a public module path rather than a condition.
pub fn is_subpath_key(key: &str) -> bool {
  key == "." || key.starts_with("./")
}

impl ExportsNode {
  /// Classify any exports value. Values that cannot declare exports (`null`, booleans,
  /// numbers, arrays) yield `None`.
  pub fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::String(path) => Some(Self::Path(path.clone())),
      Value::Object(map) if map.keys().all(|key| is_subpath_key(key)) => {
        Some(Self::subpaths(map))
      }
      Value::Object(map) => Some(Self::conditions(map)),
      Value::Null => None,
      other => {
        tracing::warn!(value = %other, "skipping unsupported exports value");
        None
      }
    }
  }

  fn subpaths(map: &Map<String, Value>) -> Self {
    let entries = map
      .iter()
      .filter_map(|(subpath, value)| {
        if value.is_null() {
          tracing::debug!(%subpath, "subpath explicitly unexported");
        }
        Self::from_value(value).map(|node| (subpath.clone(), node))
      })
      .collect();
    Self::Subpaths(entries)
  }

  /// Nested objects under a condition are always further conditions.
  fn conditions(map: &Map<String, Value>) -> Self {
    let entries = map
      .iter()
      .filter_map(|(name, value)| {
        let node = match value {
          Value::String(path) => Self::Path(path.clone()),
          Value::Object(nested) => Self::conditions(nested),
          Value::Null => return None,
          other => {
            tracing::warn!(condition = %name, value = %other, "skipping unsupported condition value");
            return None;
          }
        };
        Some((Condition::parse(name), node))
      })
      .collect();
    Self::Conditions(entries)
  }

  /// Path carried by a leaf node.
  pub fn as_path(&self) -> Option<&str> {
    match self {
      Self::Path(path) => Some(path),
      _ => None,
    }
  }
}

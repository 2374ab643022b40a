//! Vocabulary of export conditions recognised in `package.json` conditional exports.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named runtime or environment condition gating which export path applies.
///
/// Names outside the known vocabulary are kept as [`Condition::Other`] and behave like any
/// other nested condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
  /// `types`: declaration file for the export.
  Types,
  /// `import`: ES module build.
  Import,
  /// `require`: CommonJS build.
  Require,
  /// `entry`: source entry the export was compiled from.
  Entry,
  /// `node`
  Node,
  /// `node-addons`
  NodeAddons,
  /// `browser`
  Browser,
  /// `development`
  Development,
  /// `production`
  Production,
  /// `default`
  Default,
  /// Unrecognised condition name, carried through opaquely.
  Other(String),
}

impl Condition {
  /// Map a condition key onto the vocabulary.
  pub fn parse(name: &str) -> Self {
    match name {
      "types" => Self::Types,
      "import" => Self::Import,
      "require" => Self::Require,
      "entry" => Self::Entry,
      "node" => Self::Node,
      "node-addons" => Self::NodeAddons,
      "browser" => Self::Browser,
      "development" => Self::Development,
      "production" => Self::Production,
      "default" => Self::Default,
      other => Self::Other(other.to_string()),
    }
  }

  /// Key as written in the manifest.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Types => "types",
      Self::Import => "import",
      Self::Require => "require",
      Self::Entry => "entry",
      Self::Node => "node",
      Self::NodeAddons => "node-addons",
      Self::Browser => "browser",
      Self::Development => "development",
      Self::Production => "production",
      Self::Default => "default",
      Self::Other(name) => name,
    }
  }

  /// Returns `true` for conditions that force leaf resolution (`types`, `import`, `require`, `entry`).
  pub fn is_terminal(&self) -> bool {
    matches!(
      self,
      Self::Types | Self::Import | Self::Require | Self::Entry
    )
  }
}

impl fmt::Display for Condition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for Condition {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Condition {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(Self::parse(&name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_known_vocabulary() {
    for name in [
      "types",
      "import",
      "require",
      "entry",
      "node",
      "node-addons",
      "browser",
      "development",
      "production",
      "default",
    ] {
      let condition = Condition::parse(name);
      assert!(!matches!(condition, Condition::Other(_)), "{name} should be known");
      assert_eq!(condition.as_str(), name);
    }
  }

  #[test]
  fn unknown_names_are_opaque_and_recursive() {
    let condition = Condition::parse("worker");
    assert_eq!(condition, Condition::Other("worker".into()));
    assert!(!condition.is_terminal());
    assert_eq!(condition.to_string(), "worker");
  }

  #[test]
  fn only_format_and_declaration_keys_are_terminal() {
    for condition in [
      Condition::Types,
      Condition::Import,
      Condition::Require,
      Condition::Entry,
    ] {
      assert!(condition.is_terminal(), "{condition} should be terminal");
    }
    assert!(!Condition::Node.is_terminal());
    assert!(!Condition::Default.is_terminal());
    assert!(!Condition::Browser.is_terminal());
  }

  #[test]
  fn serializes_as_manifest_key() {
    let encoded = serde_json::to_string(&vec![Condition::NodeAddons, Condition::parse("deno")])
      .expect("conditions serialize");
    assert_eq!(encoded, r#"["node-addons","deno"]"#);

    let decoded: Vec<Condition> = serde_json::from_str(&encoded).expect("conditions deserialize");
    assert_eq!(decoded, vec![Condition::NodeAddons, Condition::Other("deno".into())]);
  }
}

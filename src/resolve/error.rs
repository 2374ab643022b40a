use crate::models::TagPath;

/// Errors raised when a manifest's export declarations cannot be turned into targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
  /// `exports` is present but is neither a path nor an object.
  MissingExports {
    /// Package name, when the manifest declares one.
    package: Option<String>,
  },
  /// Legacy manifest without `main` or `module`.
  MissingLegacyEntry {
    /// Package name, when the manifest declares one.
    package: Option<String>,
  },
  /// Conditional export resolving at this level without any usable path.
  IncompleteConditions {
    /// Package name, when the manifest declares one.
    package: Option<String>,
    /// Conditions leading to the offending object.
    tags: TagPath,
  },
}

impl ResolutionError {
  /// Package the error refers to.
  pub fn package(&self) -> Option<&str> {
    match self {
      Self::MissingExports { package }
      | Self::MissingLegacyEntry { package }
      | Self::IncompleteConditions { package, .. } => package.as_deref(),
    }
  }
}

fn describe_package(package: Option<&str>) -> String {
  match package {
    Some(name) => format!("package \"{name}\""),
    None => "unnamed package".to_string(),
  }
}

impl std::fmt::Display for ResolutionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let package = describe_package(self.package());
    match self {
      Self::MissingExports { .. } => {
        write!(f, "can't determine exports for {package}")
      }
      Self::MissingLegacyEntry { .. } => write!(
        f,
        "at least one of 'exports', 'main' or 'module' is required in the manifest of {package}"
      ),
      Self::IncompleteConditions { tags, .. } => {
        let path = tags
          .iter()
          .map(|tag| tag.as_str())
          .collect::<Vec<_>>()
          .join(" > ");
        let location = if path.is_empty() { "(root)" } else { path.as_str() };
        write!(
          f,
          "conditional export at {location} in {package} has no require, import, types or entry path"
        )
      }
    }
  }
}

impl std::error::Error for ResolutionError {}

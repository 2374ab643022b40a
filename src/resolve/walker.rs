//! Recursive traversal of classified exports trees.

use crate::conditions::Condition;
use crate::manifest::ModuleType;
use crate::models::{ResolvedTarget, TagPath};
use crate::paths::{PathLayout, format_of};

use super::error::ResolutionError;
use super::exports::ExportsNode;

/// Walks an exports tree, accumulating condition tags and emitting one target per leaf.
pub(crate) struct TreeWalker<'a> {
  pub(crate) layout: &'a PathLayout,
  pub(crate) module_type: ModuleType,
  pub(crate) package: Option<&'a str>,
}

impl TreeWalker<'_> {
  /// Flatten `node` into targets, prefixing every tag path with `tags`.
  pub(crate) fn walk(
    &self,
    node: &ExportsNode,
    tags: &TagPath,
    out: &mut Vec<ResolvedTarget>,
  ) -> Result<(), ResolutionError> {
    match node {
      ExportsNode::Path(path) => {
        out.push(self.leaf(path, tags.clone()));
        Ok(())
      }
      ExportsNode::Subpaths(entries) => {
        for (subpath, child) in entries {
          tracing::trace!(%subpath, "walking subpath");
          self.walk(child, tags, out)?;
        }
        Ok(())
      }
      ExportsNode::Conditions(entries) if is_direct(entries) => {
        out.push(self.direct(entries, tags)?);
        Ok(())
      }
      ExportsNode::Conditions(entries) => {
        for (condition, child) in entries {
          let mut nested = tags.clone();
          nested.push(condition.clone());
          self.walk(child, &nested, out)?;
        }
        Ok(())
      }
    }
  }

  /// Single output path: format follows the file name, then the package type.
  pub(crate) fn leaf(&self, path: &str, targets: TagPath) -> ResolvedTarget {
    let format = format_of(path, self.module_type);
    tracing::debug!(%path, %format, ?targets, "resolved export leaf");
    ResolvedTarget::single(
      format,
      path,
      self.layout.entry_path(path),
      self.layout.types_path(path),
      targets,
    )
  }

  /// Conditions object carrying format keys directly: one target for the whole level.
  fn direct(
    &self,
    entries: &[(Condition, ExportsNode)],
    tags: &TagPath,
  ) -> Result<ResolvedTarget, ResolutionError> {
    let require = self.terminal_path(entries, &Condition::Require, tags);
    let import = self.terminal_path(entries, &Condition::Import, tags);
    let types = self.terminal_path(entries, &Condition::Types, tags);
    let entry = self.terminal_path(entries, &Condition::Entry, tags);

    let default_path = require.or(import).or(types);
    let entry = entry
      .map(str::to_string)
      .or_else(|| default_path.map(|path| self.layout.entry_path(path)))
      .ok_or_else(|| ResolutionError::IncompleteConditions {
        package: self.package.map(str::to_string),
        tags: tags.clone(),
      })?;
    let types = types
      .map(str::to_string)
      .or_else(|| default_path.map(|path| self.layout.types_path(path)));

    tracing::debug!(%entry, ?tags, "resolved conditional export");
    Ok(ResolvedTarget {
      entry,
      import: import.map(str::to_string),
      require: require.map(str::to_string),
      types,
      targets: tags.clone(),
    })
  }

  fn terminal_path<'n>(
    &self,
    entries: &'n [(Condition, ExportsNode)],
    condition: &Condition,
    tags: &TagPath,
  ) -> Option<&'n str> {
    let (_, node) = entries.iter().find(|(name, _)| name == condition)?;
    let path = node.as_path();
    if path.is_none() {
      tracing::warn!(
        package = self.package.unwrap_or("<unnamed>"),
        %condition,
        ?tags,
        "ignoring nested object under a terminal condition"
      );
    }
    path
  }
}

fn is_direct(entries: &[(Condition, ExportsNode)]) -> bool {
  entries.iter().any(|(condition, _)| condition.is_terminal())
}

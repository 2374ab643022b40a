//! Bundle entry points derived from resolved targets.

use std::collections::BTreeSet;

use crate::models::{EntryPoint, ResolvedTarget};
use crate::paths::PathLayout;

/// Pair each distinct output with the source entry that produces it.
///
/// The output name comes from the declaration path (or the first compiled output when no
/// declaration is known), without extension and relative to the build directory. Targets
/// sharing an output, e.g. the same file exported under several conditions, are listed once.
pub fn entry_points(targets: &[ResolvedTarget], layout: &PathLayout) -> Vec<EntryPoint> {
  let mut seen = BTreeSet::new();
  let mut points = Vec::new();

  for target in targets {
    let Some(output) = target
      .types
      .as_deref()
      .or_else(|| target.outputs().next().map(|(_, path)| path))
    else {
      tracing::debug!(entry = %target.entry, "target has no output to name an entry point");
      continue;
    };

    let stem = layout.strip_extension(output);
    let name = stem
      .strip_prefix(layout.output_dir_prefix.as_str())
      .unwrap_or(stem)
      .to_string();

    if seen.insert((name.clone(), target.entry.clone())) {
      points.push(EntryPoint {
        name,
        entry: target.entry.clone(),
      });
    }
  }

  points
}

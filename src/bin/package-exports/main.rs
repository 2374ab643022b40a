//! Print the build targets a package manifest declares.

mod logging;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use package_exports::banner::{PackageMeta, banner_for};
use package_exports::config::ResolverConfig;
use package_exports::manifest::load_manifest_with_value;
use package_exports::{ModuleFormat, ResolvedTarget, Resolver, entry_points};

#[derive(Parser, Debug)]
#[command(name = "package-exports")]
#[command(version, about = "Flatten package.json exports into concrete build targets", long_about = None)]
struct Cli {
  /// Package directory or manifest file
  #[arg(default_value = ".", value_name = "PATH")]
  path: PathBuf,

  /// Emit JSON instead of one line per target
  #[arg(long)]
  json: bool,

  /// Also list bundle entry points
  #[arg(long)]
  entry_points: bool,

  /// Also print the license banner
  #[arg(long)]
  banner: bool,

  /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  let (package_dir, explicit_manifest) = if cli.path.is_dir() {
    (cli.path.clone(), None)
  } else {
    let dir = cli
      .path
      .parent()
      .filter(|parent| !parent.as_os_str().is_empty())
      .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    (dir, Some(cli.path.clone()))
  };

  let config = ResolverConfig::discover(&package_dir);
  let manifest_path = explicit_manifest.unwrap_or_else(|| config.manifest_path(&package_dir));
  tracing::debug!(manifest = %manifest_path.display(), "loading package manifest");

  let (manifest, value) = load_manifest_with_value(&manifest_path)?;
  let resolver = Resolver::from_config(&config);
  let targets = resolver
    .resolve(&manifest)
    .with_context(|| format!("failed to resolve exports of {}", manifest_path.display()))?;

  let points = cli
    .entry_points
    .then(|| entry_points(&targets, resolver.layout()));
  let banner = if cli.banner {
    let meta = PackageMeta::from_value(value)
      .with_context(|| format!("invalid package metadata in {}", manifest_path.display()))?;
    Some(banner_for(&meta))
  } else {
    None
  };

  if cli.json {
    let mut report = json!({ "targets": targets });
    if let Some(points) = &points {
      report["entryPoints"] = json!(points);
    }
    if let Some(banner) = &banner {
      report["banner"] = json!(banner);
    }
    let rendered =
      serde_json::to_string_pretty(&report).context("failed to serialize resolved targets")?;
    println!("{rendered}");
    return Ok(());
  }

  for target in &targets {
    println!("{}", describe_target(target));
  }
  if let Some(points) = points {
    println!();
    for point in points {
      println!("{} <- {}", point.name, point.entry);
    }
  }
  if let Some(banner) = banner {
    println!();
    println!("{banner}");
  }

  Ok(())
}

fn describe_target(target: &ResolvedTarget) -> String {
  let tags = if target.targets.is_empty() {
    "(root)".to_string()
  } else {
    target
      .targets
      .iter()
      .map(|tag| tag.as_str())
      .collect::<Vec<_>>()
      .join(" > ")
  };

  let mut line = format!("[{tags}] {} ->", target.entry);
  for format in [ModuleFormat::Import, ModuleFormat::Require] {
    if let Some(path) = target.output(format) {
      line.push_str(&format!(" {format}={path}"));
    }
  }
  if let Some(types) = &target.types {
    line.push_str(&format!(" types={types}"));
  }
  line
}

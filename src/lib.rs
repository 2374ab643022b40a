#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod banner;
pub mod conditions;
pub mod config;
pub mod entry_points;
pub mod manifest;
pub mod models;
pub mod paths;
pub mod resolve;

pub use conditions::Condition;
pub use config::ResolverConfig;
pub use entry_points::entry_points;
pub use manifest::{ExportsField, ModuleType, PackageManifest};
pub use models::{EntryPoint, ModuleFormat, ResolvedTarget, TagPath};
pub use paths::PathLayout;
pub use resolve::{ResolutionError, Resolver, resolve};

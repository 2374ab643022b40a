//! Logging initialization for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is left to the binary.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr subscriber. `verbosity`: 0 = WARN, 1 = DEBUG, 2+ = TRACE.
///
/// `RUST_LOG` is honoured; the verbosity flag adds a directive for this crate on top of it.
pub fn init(verbosity: u8) {
  let level = match verbosity {
    0 => Level::WARN,
    1 => Level::DEBUG,
    _ => Level::TRACE,
  };

  let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  if let Ok(directive) = format!("package_exports={level}").parse() {
    filter = filter.add_directive(directive);
  }

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .init();
}

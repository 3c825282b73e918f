//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for results.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
  if verbose {
    "drivefit=debug,reqwest=info,warn"
  } else {
    "drivefit=warn,error"
  }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init();
}

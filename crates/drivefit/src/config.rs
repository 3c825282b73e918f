//! Client and preset configuration
//!
//! Service settings come from defaults overridden by flags or by the
//! `DRIVEFIT_API_URL` and `DRIVEFIT_TIMEOUT_SECS` environment variables. The
//! preset table comes from the first preset file found, or the built-in table
//! when there is none.

use std::path::{Path, PathBuf};

use crate::error::PresetError;
use crate::presets::PresetRegistry;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the recommendation service client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
  /// Base URL of the recommendation service (e.g., "http://127.0.0.1:8000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_API_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

impl ClientConfig {
  /// Apply overrides on top of the defaults; a trailing slash on the URL is dropped
  /// and a zero timeout keeps the default
  pub fn with_overrides(base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
    let defaults = Self::default();
    let base_url = base_url
      .map(|url| url.trim().trim_end_matches('/').to_string())
      .filter(|url| !url.is_empty())
      .unwrap_or(defaults.base_url);

    let timeout_secs = timeout_secs.filter(|secs| *secs > 0).unwrap_or(defaults.timeout_secs);

    Self { base_url, timeout_secs }
  }

  pub fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }
}

/// Preset file locations checked when none is given explicitly, in order
pub fn preset_search_paths() -> Vec<PathBuf> {
  let mut paths =
    vec![PathBuf::from(".drivefit/presets.json"), PathBuf::from("drivefit.presets.json")];

  if let Some(config_dir) = dirs::config_dir() {
    paths.push(config_dir.join("drivefit").join("presets.json"));
  }

  paths
}

/// Load the preset registry: an explicit file must exist, otherwise the first
/// file found on the search path is used, otherwise the built-in table.
pub fn load_presets(explicit: Option<&Path>) -> Result<PresetRegistry, PresetError> {
  if let Some(path) = explicit {
    tracing::debug!(path = %path.display(), "loading presets from explicit file");
    return PresetRegistry::load_from_file(path);
  }

  for path in preset_search_paths() {
    if path.exists() {
      tracing::debug!(path = %path.display(), "loading presets");
      return PresetRegistry::load_from_file(&path);
    }
  }

  tracing::debug!("using built-in presets");
  PresetRegistry::builtin()
}

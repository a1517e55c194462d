//! Loading service configuration from TOML.
//!
//! Every section is optional; missing values take the defaults below.
//!
//! ```toml
//! debug = true
//! fragment = "home"          # initial ambient fragment
//!
//! [text]
//! ellipsis = "..."
//!
//! [popup]
//! windowName = "helpWindow"
//! width = 640
//!
//! [screen]
//! width = 1366
//! height = 768
//! ```

use serde::Deserialize;
use tracing::{info, error};

use crate::popup::{PopOptions, Screen};
use crate::util::DEFAULT_ELLIPSIS;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct HelperConfig {
  #[serde(default)]
  pub debug: bool,
  #[serde(default)]
  pub fragment: String,
  #[serde(default)]
  pub text: TextConfig,
  #[serde(default)]
  pub popup: PopOptions,
  #[serde(default)]
  pub screen: Screen,
}

/// Text helper defaults.
#[derive(Clone, Debug, Deserialize)]
pub struct TextConfig {
  #[serde(default = "default_ellipsis")]
  pub ellipsis: String,
}

fn default_ellipsis() -> String { DEFAULT_ELLIPSIS.into() }

impl Default for TextConfig {
  fn default() -> Self {
    Self { ellipsis: default_ellipsis() }
  }
}

impl HelperConfig {
  /// Load from HELPER_CONFIG_PATH (defaults when unset or unreadable), then
  /// apply HELPER_DEBUG=1|true on top.
  pub fn from_env() -> Self {
    let mut cfg = load_config_from_env().unwrap_or_default();
    if let Some(debug) = debug_from_env() {
      cfg.debug = debug;
    }
    cfg
  }
}

/// HELPER_DEBUG as a flag, `None` when unset.
pub fn debug_from_env() -> Option<bool> {
  let v = std::env::var("HELPER_DEBUG").ok()?;
  Some(matches!(v.as_str(), "1" | "true" | "yes"))
}

/// Attempt to load `HelperConfig` from HELPER_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<HelperConfig> {
  let path = std::env::var("HELPER_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "helper_kit", %path, "Loaded helper config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "helper_kit", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "helper_kit", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_config(s: &str) -> Result<HelperConfig, toml::de::Error> {
  toml::from_str::<HelperConfig>(s)
}

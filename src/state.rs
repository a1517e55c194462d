//! Application state: the ambient fragment, helper defaults and the debug console.
//!
//! This module owns:
//!   - the process-wide navigation fragment, wrapped in a KVP adapter
//!   - text/popup defaults (from TOML or built-in)
//!   - the debug flag
//!
//! All ambient reads and writes go through one async mutex, so a
//! read-modify-write from one client never interleaves with another's.

use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::config::{HelperConfig, TextConfig};
use crate::console::Console;
use crate::fragment::{FragmentPort, MemoryFragment};
use crate::kvp::Kvp;
use crate::popup::{PopOptions, Screen};

pub struct AppState {
    pub kvp: Mutex<Kvp<MemoryFragment>>,
    pub console: Console,
    pub text: TextConfig,
    pub popup: PopOptions,
    pub screen: Screen,
}

impl AppState {
    /// Build state from env: load config, seed the fragment.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_config(HelperConfig::from_env())
    }

    pub fn from_config(cfg: HelperConfig) -> Self {
        info!(
            target: "helper_kit",
            debug = cfg.debug,
            fragment = %cfg.fragment,
            screen_width = cfg.screen.width,
            screen_height = cfg.screen.height,
            "Helper state initialized"
        );
        Self {
            kvp: Mutex::new(Kvp::new(MemoryFragment::new(&cfg.fragment))),
            console: Console::new(cfg.debug),
            text: cfg.text,
            popup: cfg.popup,
            screen: cfg.screen,
        }
    }

    /// Current ambient fragment, as a browser would report `location.hash`.
    #[instrument(level = "debug", skip(self))]
    pub async fn fragment(&self) -> String {
        self.kvp.lock().await.port().read()
    }

    /// Replace the ambient fragment (a navigation), returning the new value.
    #[instrument(level = "debug", skip(self))]
    pub async fn navigate(&self, fragment: &str) -> String {
        let mut kvp = self.kvp.lock().await;
        kvp.port_mut().write(fragment);
        kvp.port().read()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(HelperConfig::default())
    }
}

//! Debug-gated logging. Messages go through `tracing` only while the debug
//! flag is on, so helper call sites can log freely in production builds.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

#[derive(Debug, Default)]
pub struct Console {
  debug: AtomicBool,
}

impl Console {
  pub fn new(debug: bool) -> Self {
    Self { debug: AtomicBool::new(debug) }
  }

  pub fn debug(&self) -> bool {
    self.debug.load(Ordering::Relaxed)
  }

  pub fn set_debug(&self, on: bool) {
    self.debug.store(on, Ordering::Relaxed);
  }

  /// Emit `message` when debugging is enabled. Returns whether it was emitted.
  pub fn log(&self, message: &str) -> bool {
    if !self.debug() { return false; }
    info!(target: "helper_kit::console", "{}", message);
    true
  }
}

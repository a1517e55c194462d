//! Helper Kit · front-end helper library and service
//!
//! Library helpers:
//!   - `kvp`      : key/value-pair fragment parsing and mutation
//!   - `fragment` : the ambient navigation fragment port
//!   - `util`     : templating, truncation, nl2br, selectors, de-duplication
//!   - `number`   : zero-padding, thousands separators, numeric checks
//!   - `popup`    : `window.open` name and feature string
//!   - `console`  : debug-gated logging
//!
//! The remaining modules wire those helpers into an Axum HTTP + WebSocket
//! service for a browser front-end.

pub mod config;
pub mod console;
pub mod error;
pub mod fragment;
pub mod kvp;
pub mod logic;
pub mod number;
pub mod popup;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;

pub use error::HelperError;
pub use fragment::{FragmentPort, MemoryFragment};
pub use kvp::{Kvp, KvpRecord, Written};

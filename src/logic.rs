//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - KVP operations against an explicit source or the ambient fragment
//!   - Text and number helpers with the configured defaults applied
//!   - Popup arguments using the configured screen

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::HelperError;
use crate::kvp::{self, KvpRecord, Written};
use crate::number::add_commas;
use crate::popup::{pop, PopOverrides, PopupSpec};
use crate::protocol::KvpOut;
use crate::state::AppState;
use crate::util::{string_format, truncate, Markers};

#[instrument(level = "info", skip(state))]
pub async fn kvp_parse(state: &AppState, source: Option<&str>) -> KvpRecord {
  match source {
    Some(s) => kvp::parse(s),
    None => state.kvp.lock().await.parse(None),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn kvp_get(state: &AppState, key: &str, source: Option<&str>) -> Result<String, HelperError> {
  let result = match source {
    Some(s) => kvp::get(s, key),
    None => state.kvp.lock().await.get(key, None),
  };
  if let Err(e) = &result {
    debug!(target: "helper_kit::kvp", %key, error = %e, "KVP get failed");
  }
  result
}

#[instrument(level = "info", skip(state, updates), fields(updates = updates.pairs.len(), ambient = source.is_none()))]
pub async fn kvp_set(state: &AppState, updates: KvpRecord, source: Option<&str>) -> KvpOut {
  let mut kvp = state.kvp.lock().await;
  let written = kvp.set(updates, source);
  let out = to_kvp_out(written, kvp.port());
  state.console.log(&format!("kvp set -> {:?}", out));
  out
}

#[instrument(level = "info", skip(state))]
pub async fn kvp_remove(state: &AppState, key: &str, source: Option<&str>) -> Result<KvpOut, HelperError> {
  let mut kvp = state.kvp.lock().await;
  let written = kvp.remove(key, source)?;
  let out = to_kvp_out(written, kvp.port());
  state.console.log(&format!("kvp remove {} -> {:?}", key, out));
  Ok(out)
}

fn to_kvp_out(written: Written, port: &impl crate::fragment::FragmentPort) -> KvpOut {
  match written {
    Written::Returned(s) => KvpOut { kvp: Some(s), written: false, fragment: None },
    Written::Ambient => KvpOut { kvp: None, written: true, fragment: Some(port.read()) },
  }
}

#[instrument(level = "info", skip(_state, markers), fields(template_len = template.len()))]
pub fn format_text(_state: &AppState, template: &str, markers: &Markers) -> Result<String, HelperError> {
  string_format(template, markers)
    .ok_or(HelperError::InvalidArgument { reason: "template is empty or there is nothing to substitute" })
}

/// Truncate with the configured marker unless the caller supplies one.
#[instrument(level = "info", skip(state, text), fields(text_len = text.len()))]
pub fn truncate_text(state: &AppState, text: &str, max_chars: usize, replace_with: Option<&str>) -> Result<String, HelperError> {
  let marker = replace_with.unwrap_or(&state.text.ellipsis);
  truncate(text, max_chars, Some(marker)).ok_or(HelperError::InvalidArgument { reason: "text is empty" })
}

/// Numbers and numeric strings are both accepted, as in loosely typed callers.
pub fn commas(num: &Value) -> String {
  match num {
    Value::String(s) => add_commas(s),
    other => add_commas(other),
  }
}

#[instrument(level = "info", skip(state, overrides))]
pub fn popup(state: &AppState, url: &str, overrides: Option<&PopOverrides>) -> Result<PopupSpec, HelperError> {
  pop(url, &state.popup, overrides, state.screen).ok_or(HelperError::InvalidArgument { reason: "url is empty" })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::HelperConfig;
  use serde_json::json;

  fn state_with(fragment: &str) -> AppState {
    AppState::from_config(HelperConfig { fragment: fragment.into(), ..HelperConfig::default() })
  }

  #[tokio::test]
  async fn test_ambient_set_updates_fragment() {
    let state = state_with("nav&a=1");
    let out = kvp_set(&state, KvpRecord::new().with_pair("b", "2"), None).await;
    assert_eq!(out, KvpOut { kvp: None, written: true, fragment: Some("#nav&a=1&b=2".into()) });
    assert_eq!(state.fragment().await, "#nav&a=1&b=2");
  }

  #[tokio::test]
  async fn test_explicit_source_leaves_fragment() {
    let state = state_with("a=1");
    let out = kvp_remove(&state, "x", Some("x=1&y=2")).await.unwrap();
    assert_eq!(out.kvp.as_deref(), Some("y=2"));
    assert!(!out.written);
    assert_eq!(state.fragment().await, "#a=1");
  }

  #[tokio::test]
  async fn test_get_and_parse() {
    let state = state_with("home&tab=2");
    assert_eq!(kvp_get(&state, "tab", None).await, Ok("2".to_string()));
    assert!(kvp_get(&state, "", None).await.is_err());
    let r = kvp_parse(&state, None).await;
    assert_eq!(r.no_key_hash.as_deref(), Some("home"));
  }

  #[tokio::test]
  async fn test_get_with_source_skips_fragment() {
    let state = state_with("a=1");
    let _held = state.kvp.lock().await;
    assert_eq!(kvp_get(&state, "b", Some("b=2")).await, Ok("2".to_string()));
    assert!(matches!(kvp_get(&state, "", Some("b=2")).await, Err(HelperError::InvalidArgument { .. })));
  }

  #[tokio::test]
  async fn test_navigate() {
    let state = state_with("");
    assert_eq!(state.navigate("#x=1").await, "#x=1");
    assert_eq!(kvp_get(&state, "x", None).await, Ok("1".to_string()));
  }

  #[test]
  fn test_truncate_uses_configured_marker() {
    let mut cfg = HelperConfig::default();
    cfg.text.ellipsis = "...".into();
    let state = AppState::from_config(cfg);
    assert_eq!(truncate_text(&state, "The quick brown fox", 10, None).unwrap(), "The...");
    assert_eq!(truncate_text(&state, "The quick brown fox", 10, Some("!")).unwrap(), "The!");
    assert!(truncate_text(&state, "", 10, None).is_err());
  }

  #[test]
  fn test_commas_accepts_numbers_and_strings() {
    assert_eq!(commas(&json!(1234567)), "1,234,567");
    assert_eq!(commas(&json!(1234567.89)), "1,234,567.89");
    assert_eq!(commas(&json!("9876")), "9,876");
  }

  #[test]
  fn test_popup_uses_configured_screen() {
    let mut cfg = HelperConfig::default();
    cfg.screen = crate::popup::Screen { width: 800, height: 600 };
    let state = AppState::from_config(cfg);
    let spec = popup(&state, "/x", None).unwrap();
    assert!(spec.features.ends_with(",top=0,left=5"));
    assert!(popup(&state, "", None).is_err());
  }
}

//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::logic::*;
use crate::number::two_digits;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::util::{nl2br, selectors, unique_values};

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "helper_kit", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "helper_kit", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_to_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "helper_kit", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "helper_kit", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
pub async fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "helper_kit", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::invalid(format!("Invalid JSON: {}", e)),
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "kind": "internal", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::KvpParse { source } => {
      let record = kvp_parse(state, source.as_deref()).await;
      ServerWsMessage::Record { record }
    }

    ClientWsMessage::KvpGet { key, source } => match kvp_get(state, &key, source.as_deref()).await {
      Ok(value) => ServerWsMessage::Value { key, value },
      Err(e) => e.into(),
    },

    ClientWsMessage::KvpSet { updates, source } => {
      let out = kvp_set(state, updates, source.as_deref()).await;
      tracing::info!(target: "helper_kit::kvp", written = out.written, "WS kvp_set applied");
      kvp_reply(out)
    }

    ClientWsMessage::KvpRemove { key, source } => match kvp_remove(state, &key, source.as_deref()).await {
      Ok(out) => {
        tracing::info!(target: "helper_kit::kvp", %key, written = out.written, "WS kvp_remove applied");
        kvp_reply(out)
      }
      Err(e) => e.into(),
    },

    ClientWsMessage::Fragment => ServerWsMessage::Fragment { fragment: state.fragment().await },

    ClientWsMessage::Navigate { fragment } => {
      let fragment = state.navigate(&fragment).await;
      ServerWsMessage::Written { fragment }
    }

    ClientWsMessage::Format { template, markers } => match format_text(state, &template, &markers) {
      Ok(text) => ServerWsMessage::Text { text },
      Err(e) => e.into(),
    },

    ClientWsMessage::Truncate { text, max_chars, replace_with } =>
      match truncate_text(state, &text, max_chars, replace_with.as_deref()) {
        Ok(text) => ServerWsMessage::Text { text },
        Err(e) => e.into(),
      },

    ClientWsMessage::AddCommas { num } => ServerWsMessage::Text { text: commas(&num) },

    ClientWsMessage::TwoDigits { n } => ServerWsMessage::Text { text: two_digits(n) },

    ClientWsMessage::Unique { items } => ServerWsMessage::Items { items: unique_values(&items) },

    ClientWsMessage::Nl2br { text } => ServerWsMessage::Text { text: nl2br(&text) },

    ClientWsMessage::Selectors { selectors: list } => ServerWsMessage::Text { text: selectors(&list) },

    ClientWsMessage::Popup { url, options } => match popup(state, &url, options.as_ref()) {
      Ok(popup) => ServerWsMessage::Popup { popup },
      Err(e) => e.into(),
    },

    ClientWsMessage::SetDebug { on } => {
      state.console.set_debug(on);
      state.console.log("Debug logging enabled");
      ServerWsMessage::Debug { on: state.console.debug() }
    }
  }
}

fn kvp_reply(out: crate::protocol::KvpOut) -> ServerWsMessage {
  match (out.kvp, out.fragment) {
    (Some(kvp), _) => ServerWsMessage::Kvp { kvp },
    (None, fragment) => ServerWsMessage::Written { fragment: fragment.unwrap_or_default() },
  }
}

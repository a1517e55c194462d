//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HelperError;
use crate::kvp::KvpRecord;
use crate::popup::{PopOverrides, PopupSpec};
use crate::util::Markers;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    KvpParse {
        #[serde(default)]
        source: Option<String>,
    },
    KvpGet {
        key: String,
        #[serde(default)]
        source: Option<String>,
    },
    KvpSet {
        updates: KvpRecord,
        #[serde(default)]
        source: Option<String>,
    },
    KvpRemove {
        key: String,
        #[serde(default)]
        source: Option<String>,
    },
    Fragment,
    Navigate {
        fragment: String,
    },
    Format {
        template: String,
        markers: Markers,
    },
    Truncate {
        text: String,
        #[serde(rename = "maxChars")]
        max_chars: usize,
        #[serde(rename = "replaceWith", default)]
        replace_with: Option<String>,
    },
    AddCommas {
        num: Value,
    },
    TwoDigits {
        n: i64,
    },
    Unique {
        items: Vec<Value>,
    },
    Nl2br {
        text: String,
    },
    Selectors {
        selectors: Vec<String>,
    },
    Popup {
        url: String,
        #[serde(default)]
        options: Option<PopOverrides>,
    },
    SetDebug {
        on: bool,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Record {
        record: KvpRecord,
    },
    Value {
        key: String,
        value: String,
    },
    /// Result of a mutation on an explicit source string.
    Kvp {
        kvp: String,
    },
    /// A mutation (or navigation) replaced the ambient fragment.
    Written {
        fragment: String,
    },
    Fragment {
        fragment: String,
    },
    Text {
        text: String,
    },
    Items {
        items: Vec<Value>,
    },
    Popup {
        popup: PopupSpec,
    },
    Debug {
        on: bool,
    },
    Error {
        kind: String,
        message: String,
    },
}

impl ServerWsMessage {
    pub fn invalid(message: impl Into<String>) -> Self {
        ServerWsMessage::Error { kind: "invalid_argument".into(), message: message.into() }
    }
}

impl From<HelperError> for ServerWsMessage {
    fn from(e: HelperError) -> Self {
        ServerWsMessage::Error { kind: e.kind().into(), message: e.to_string() }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Default, Deserialize)]
pub struct KvpSourceIn {
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KvpKeyIn {
    pub key: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KvpSetIn {
    pub updates: KvpRecord,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValueOut {
    pub key: String,
    pub value: String,
}

/// `kvp` is set for explicit sources; `written` + `fragment` for ambient writes.
#[derive(Debug, Serialize, PartialEq)]
pub struct KvpOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kvp: Option<String>,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FragmentIo {
    pub fragment: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatIn {
    pub template: String,
    pub markers: Markers,
}

#[derive(Debug, Deserialize)]
pub struct TruncateIn {
    pub text: String,
    #[serde(rename = "maxChars")]
    pub max_chars: usize,
    #[serde(rename = "replaceWith", default)]
    pub replace_with: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommasIn {
    pub num: Value,
}

#[derive(Debug, Deserialize)]
pub struct TwoDigitsIn {
    pub n: i64,
}

#[derive(Debug, Deserialize)]
pub struct UniqueIn {
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ItemsOut {
    pub items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Nl2brIn {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectorsIn {
    pub selectors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PopupIn {
    pub url: String,
    #[serde(default)]
    pub options: Option<PopOverrides>,
}

#[derive(Debug, Serialize)]
pub struct TextOut {
    pub text: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
    pub kind: String,
}

//! Key/value-pair strings (`nav&key1=value1&key2=value2`) and the adapter that
//! reads and mutates them, by default against the ambient navigation fragment.
//!
//! Parsing rules:
//!   - one leading `#` is stripped, the rest is split on `&`
//!   - a segment with `=` is split on the first `=`; key and value are both
//!     percent-decoded; a repeated key overwrites in place
//!   - a segment without `=` is keyless: the first segment becomes `noKeyHash`,
//!     later ones are collected in `noKeys`
//!   - empty segments are dropped
//!
//! Parsing never fails. Malformed input yields an empty or partial record.

use std::fmt;

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::HelperError;
use crate::fragment::FragmentPort;

/// Bytes left untouched by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Parsed form of a key/value-pair string.
///
/// Serializes to JSON as a flat object of its pairs, plus `noKeyHash` and
/// `noKeys` members when those are present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvpRecord {
    #[serde(rename = "noKeyHash", default, skip_serializing_if = "Option::is_none")]
    pub no_key_hash: Option<String>,
    #[serde(rename = "noKeys", default, skip_serializing_if = "Vec::is_empty")]
    pub no_keys: Vec<String>,
    #[serde(flatten)]
    pub pairs: IndexMap<String, String>,
}

impl KvpRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.pairs.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining pairs.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.pairs.shift_remove(key)
    }

    /// Keyless segments after the first one, `None` when there were none.
    pub fn no_keys(&self) -> Option<&[String]> {
        if self.no_keys.is_empty() { None } else { Some(&self.no_keys) }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.no_key_hash.is_none() && self.no_keys.is_empty()
    }

    /// Shallow merge: pairs from `updates` overwrite or append, a `noKeyHash`
    /// in `updates` replaces ours, a non-empty `noKeys` replaces ours.
    pub fn merge(&mut self, updates: KvpRecord) {
        if updates.no_key_hash.is_some() {
            self.no_key_hash = updates.no_key_hash;
        }
        if !updates.no_keys.is_empty() {
            self.no_keys = updates.no_keys;
        }
        self.pairs.extend(updates.pairs);
    }
}

impl fmt::Display for KvpRecord {
    /// `noKeyHash`, then `key=value` pairs in order, then `noKeys`, joined by `&`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(hash) = &self.no_key_hash {
            write!(f, "{}", encode(hash))?;
            sep = "&";
        }
        for (key, value) in &self.pairs {
            write!(f, "{}{}={}", sep, encode(key), encode(value))?;
            sep = "&";
        }
        for orphan in &self.no_keys {
            write!(f, "{}{}", sep, encode(orphan))?;
            sep = "&";
        }
        Ok(())
    }
}

/// Parse a key/value-pair string into a record.
pub fn parse(source: &str) -> KvpRecord {
    let body = source.strip_prefix('#').unwrap_or(source);
    let mut record = KvpRecord::default();

    for (i, segment) in body.split('&').enumerate() {
        match segment.split_once('=') {
            Some((key, value)) => {
                record.pairs.insert(decode(key), decode(value));
            }
            None if segment.is_empty() => continue,
            None if i == 0 => record.no_key_hash = Some(decode(segment)),
            None => record.no_keys.push(decode(segment)),
        }
    }

    record
}

/// Value of `key` in the string `source`.
pub fn get(source: &str, key: &str) -> Result<String, HelperError> {
    take_value(parse(source), key)
}

fn take_value(mut record: KvpRecord, key: &str) -> Result<String, HelperError> {
    if key.is_empty() {
        return Err(HelperError::InvalidArgument { reason: "key must not be empty" });
    }
    record
        .pairs
        .swap_remove(key)
        .ok_or_else(|| HelperError::NotFound { key: key.to_string() })
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Outcome of a mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Written {
    /// An explicit source was given; this is the updated string.
    Returned(String),
    /// No source was given; the ambient fragment was overwritten.
    Ambient,
}

impl Written {
    pub fn into_returned(self) -> Option<String> {
        match self {
            Written::Returned(s) => Some(s),
            Written::Ambient => None,
        }
    }
}

/// KVP adapter over an injected fragment port.
///
/// Every operation takes an optional source string. With `Some`, it works on
/// that string and leaves the port alone; with `None`, it reads the port and,
/// for mutations, writes the result back exactly once.
#[derive(Debug)]
pub struct Kvp<P> {
    port: P,
}

impl<P: FragmentPort> Kvp<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn parse(&self, source: Option<&str>) -> KvpRecord {
        match source {
            Some(s) => parse(s),
            None => parse(&self.port.read()),
        }
    }

    pub fn get(&self, key: &str, source: Option<&str>) -> Result<String, HelperError> {
        take_value(self.parse(source), key)
    }

    #[instrument(level = "debug", skip(self, updates), fields(updates = updates.pairs.len(), ambient = source.is_none()))]
    pub fn set(&mut self, updates: KvpRecord, source: Option<&str>) -> Written {
        let mut record = self.parse(source);
        record.merge(updates);
        self.commit(&record, source)
    }

    #[instrument(level = "debug", skip(self), fields(ambient = source.is_none()))]
    pub fn remove(&mut self, key: &str, source: Option<&str>) -> Result<Written, HelperError> {
        if key.is_empty() {
            return Err(HelperError::InvalidArgument { reason: "key must not be empty" });
        }
        let mut record = self.parse(source);
        if record.remove(key).is_none() {
            debug!(target: "helper_kit::kvp", %key, "Key absent; nothing removed");
        }
        Ok(self.commit(&record, source))
    }

    fn commit(&mut self, record: &KvpRecord, source: Option<&str>) -> Written {
        let serialized = record.to_string();
        match source {
            Some(_) => Written::Returned(serialized),
            None => {
                self.port.write(&serialized);
                Written::Ambient
            }
        }
    }
}

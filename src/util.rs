//! Small text helpers used by front-end code: templating, truncation, line
//! breaks, selector lists and de-duplication.

use std::collections::HashSet;
use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default marker appended by `truncate` (an HTML ellipsis entity).
pub const DEFAULT_ELLIPSIS: &str = "&#8230;";

/// Values substituted into a template.
/// `{"kind": "map", "values": {"color": "red"}}` fills `{color}`;
/// `{"kind": "positional", "values": ["red"]}` fills `{0}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Markers {
  Map(IndexMap<String, String>),
  Positional(Vec<String>),
}

/// Replace placeholders in `template`. Returns `None` for an empty template
/// or when there is nothing to substitute positionally.
pub fn string_format(template: &str, markers: &Markers) -> Option<String> {
  match markers {
    Markers::Map(values) => format_map(template, values.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
    Markers::Positional(values) => format_positional(template, values),
  }
}

/// Replaces occurrences of `{key}` with the paired value.
/// Plain literal replacement; no nesting or escaping.
pub fn format_map<'a>(template: &str, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Option<String> {
  if template.is_empty() { return None; }
  let mut out = template.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  Some(out)
}

/// Replaces `{0}`, `{1}`, ... with the argument at that index.
pub fn format_positional<S: AsRef<str>>(template: &str, args: &[S]) -> Option<String> {
  if template.is_empty() || args.is_empty() { return None; }
  let mut out = template.to_string();
  for (i, arg) in args.iter().enumerate() {
    out = out.replace(&format!("{{{}}}", i), arg.as_ref());
  }
  Some(out)
}

/// Shorten `text` to fit `max_chars` characters, cutting at the last space
/// that leaves room for a three-character marker, or hard at that point when
/// there is no space. `None` for empty text. Text that already fits, or a
/// zero limit, comes back unchanged.
pub fn truncate(text: &str, max_chars: usize, replace_with: Option<&str>) -> Option<String> {
  if text.is_empty() { return None; }
  let len = text.chars().count();
  if max_chars == 0 || len <= max_chars { return Some(text.to_string()); }

  let max_fit = max_chars.saturating_sub(3);
  let head: Vec<char> = text.chars().take(max_fit + 1).collect();
  let cut = head.iter().rposition(|c| *c == ' ').unwrap_or(max_fit);

  let mut out: String = head[..cut].iter().collect();
  out.push_str(replace_with.unwrap_or(DEFAULT_ELLIPSIS));
  Some(out)
}

/// Replace every `\n` with an HTML `<br />`.
pub fn nl2br(text: &str) -> String {
  text.replace('\n', "<br />")
}

/// Join CSS selectors into one selector list.
pub fn selectors<S: AsRef<str>>(list: &[S]) -> String {
  list.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

/// First-occurrence de-duplication, comparing elements by their string form.
pub fn unique<T: Clone + Display>(items: &[T]) -> Vec<T> {
  unique_by(items, |item| item.to_string())
}

/// `unique` for loosely typed JSON input: `1` and `"1"` are the same element.
pub fn unique_values(items: &[Value]) -> Vec<Value> {
  unique_by(items, coerce_key)
}

fn unique_by<T: Clone>(items: &[T], key: impl Fn(&T) -> String) -> Vec<T> {
  let mut seen = HashSet::new();
  items.iter().filter(|&item| seen.insert(key(item))).cloned().collect()
}

/// String form of a JSON value as a browser would coerce it for an object key.
fn coerce_key(v: &Value) -> String {
  match v {
    Value::String(s) => s.clone(),
    Value::Array(items) => items.iter().map(coerce_key).collect::<Vec<_>>().join(","),
    Value::Object(_) => "[object Object]".into(),
    // `1.0` coerces to "1", `-0.0` to "0"
    Value::Number(n) if n.is_f64() => match n.as_f64() {
      Some(f) if f == 0.0 => "0".into(),
      Some(f) => f.to_string(),
      None => n.to_string(),
    },
    other => other.to_string(),
  }
}

//! Maps a raw `(status, body)` pair onto success or a single [`ApiError`].
//!
//! The service reports failures through an `errors` list whose entries are either
//! bare strings (`"API rate limit exceeded"`) or `[code, message]` pairs
//! (`["invalid_player_ids", "..."]`). Classification precedence:
//!
//! 1. any status above 499 is a server error,
//! 2. a non-empty `errors` list fails the call whatever the status,
//!    preferring the first entry that names a known code,
//! 3. an empty list with a 4xx status is a generic client error,
//! 4. everything else succeeds.

use serde_json::Value;

use crate::error::ApiError;

/// Error codes with a dedicated kind.
const KNOWN_CODES: &[(&str, fn(String) -> ApiError)] = &[
    ("API rate limit exceeded", ApiError::RateLimit),
    ("invalid_external_user_ids", ApiError::InvalidExternalUserIds),
    ("invalid_player_ids", ApiError::InvalidPlayerIds),
];

fn kind_for(code: &str) -> Option<fn(String) -> ApiError> {
    KNOWN_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, make)| *make)
}

/// One entry of the `errors` list.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorEntry {
    /// A plain string, possibly a known code.
    Bare(String),
    /// A `[code, message]` pair, or a single-key `{code: message}` object.
    Pair(String, String),
    /// Any other shape. Never matches a known code.
    Other(Value),
}

impl ErrorEntry {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(code) => ErrorEntry::Bare(code.clone()),
            Value::Array(items) if items.len() == 2 => match &items[0] {
                Value::String(code) => ErrorEntry::Pair(code.clone(), render(&items[1])),
                _ => ErrorEntry::Other(value.clone()),
            },
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                Some((code, message)) => ErrorEntry::Pair(code.clone(), render(message)),
                None => ErrorEntry::Other(value.clone()),
            },
            other => ErrorEntry::Other(other.clone()),
        }
    }

    /// The classified error when this entry names a known code.
    fn known_error(&self) -> Option<ApiError> {
        match self {
            ErrorEntry::Bare(code) => kind_for(code).map(|make| make(code.clone())),
            ErrorEntry::Pair(code, message) => kind_for(code).map(|make| make(message.clone())),
            ErrorEntry::Other(_) => None,
        }
    }
}

/// Strings as-is, anything else as its JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The `errors` list of a response body. Absent, malformed or non-object
/// bodies yield an empty list.
pub fn error_entries(body: Option<&str>) -> Vec<Value> {
    let parsed = body
        .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
        .unwrap_or(Value::Null);

    match parsed.get("errors") {
        Some(Value::Array(entries)) => entries.clone(),
        _ => Vec::new(),
    }
}

/// Decides whether a response is a success. On failure exactly one error is
/// returned, built from the first relevant `errors` entry.
pub fn classify(status: u16, body: Option<&str>) -> Result<(), ApiError> {
    let errors = error_entries(body);
    let first = errors.first().map(render);

    if status > 499 {
        return Err(ApiError::Server(
            first.unwrap_or_else(|| format!("Error code {}", status)),
        ));
    }

    if let Some(first) = first {
        let known = errors
            .iter()
            .find_map(|entry| ErrorEntry::from_value(entry).known_error());
        return Err(known.unwrap_or(ApiError::Client(first)));
    }

    if status > 399 {
        let message = format!("Error code {} {}", status, body.unwrap_or_default());
        return Err(ApiError::Client(message.trim_end().to_string()));
    }

    Ok(())
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Body field (and query parameter) carrying the application identifier.
pub const APP_ID_FIELD: &str = "app_id";

/// Turns a caller payload into a POST body: top-level nulls are dropped and
/// `app_id` is set, replacing any value the caller supplied.
pub fn prepare_body<P>(payload: &P, app_id: &str) -> Result<Map<String, Value>>
where
    P: Serialize + ?Sized,
{
    let fields = match serde_json::to_value(payload)? {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        other => return Err(Error::InvalidPayload(json_type(&other).to_string())),
    };

    let mut body: Map<String, Value> = fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect();
    body.insert(APP_ID_FIELD.to_string(), Value::String(app_id.to_string()));
    Ok(body)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Notification payload for `create_notification`. Unset fields serialize as
/// null and are stripped before sending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub contents: Option<BTreeMap<String, String>>,
    pub headings: Option<BTreeMap<String, String>>,
    pub subtitle: Option<BTreeMap<String, String>>,
    pub template_id: Option<String>,
    pub included_segments: Option<Vec<String>>,
    pub excluded_segments: Option<Vec<String>>,
    pub include_player_ids: Option<Vec<String>>,
    pub include_external_user_ids: Option<Vec<String>>,
    pub filters: Option<Vec<Value>>,
    pub data: Option<Value>,
    pub url: Option<String>,
    pub send_after: Option<String>,
    pub ttl: Option<u32>,
    pub priority: Option<u8>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message body for one language code.
    pub fn content<S: Into<String>>(mut self, language: S, text: S) -> Self {
        self.contents
            .get_or_insert_with(BTreeMap::new)
            .insert(language.into(), text.into());
        self
    }

    pub fn heading<S: Into<String>>(mut self, language: S, text: S) -> Self {
        self.headings
            .get_or_insert_with(BTreeMap::new)
            .insert(language.into(), text.into());
        self
    }

    pub fn included_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_segments = Some(segments.into_iter().map(Into::into).collect());
        self
    }

    pub fn include_player_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_player_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn include_external_user_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_external_user_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Paging for `fetch_notifications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationsQuery {
    pub page_limit: u32,
    pub page_offset: u32,
    /// Notification kind filter; the segment is left out of the path when unset.
    pub kind: Option<u8>,
}

impl Default for NotificationsQuery {
    fn default() -> Self {
        Self {
            page_limit: 50,
            page_offset: 0,
            kind: None,
        }
    }
}

impl NotificationsQuery {
    pub fn path(&self) -> String {
        let mut path = format!(
            "notifications?limit={}&offset={}",
            self.page_limit, self.page_offset
        );
        if let Some(kind) = self.kind {
            path.push_str(&format!("&kind={}", kind));
        }
        path
    }
}

/// Options for the players CSV export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvExport {
    pub extra_fields: Option<Vec<String>>,
    pub last_active_since: Option<DateTime<Utc>>,
    pub segment_name: Option<String>,
}

impl CsvExport {
    /// `last_active_since` goes out as a string of whole Unix seconds.
    pub fn to_payload(&self) -> Value {
        serde_json::json!({
            "extra_fields": self.extra_fields,
            "last_active_since": self
                .last_active_since
                .map(|since| since.timestamp().to_string()),
            "segment_name": self.segment_name,
        })
    }
}

//! JSON shapes exchanged with the WordPress REST API.
//!
//! WordPress and Pods are loose about field types: a blocklist may come back as a
//! comma-joined string, an array of strings, `false` or `null` depending on the plugin
//! version and whether the field was ever saved. Everything here decodes leniently.

use serde::Deserialize;
use serde_json::{Map, Value};
use staylist_common::{ListingId, ListingRecord};

/// A listing post as returned by `/wp/v2/<type>` or `/pods/v1/<type>`.
#[derive(Debug, Deserialize)]
pub struct WpListing {
    pub id: u64,
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Error body of a failed WordPress REST call.
#[derive(Debug, Deserialize)]
pub struct WpErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl WpErrorBody {
    /// Human-readable message from an error body, falling back to the raw text.
    pub fn describe(raw: &str) -> String {
        match serde_json::from_str::<WpErrorBody>(raw) {
            Ok(WpErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("{}: {}", code, message),
            Ok(WpErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ => raw.trim().to_string(),
        }
    }
}

impl WpListing {
    /// Converts the post into a [`ListingRecord`], reading the two blocklist fields by name.
    ///
    /// Fields are looked up at the top level first, then under `meta` and `acf`.
    pub fn into_record(self, admin_field: &str, host_field: &str) -> ListingRecord {
        let admin_blocked_days_raw = self.field_raw(admin_field);
        let host_blocked_days_raw = self.field_raw(host_field);
        ListingRecord {
            id: ListingId(self.id),
            title: title_text(&self.title, &self.fields),
            status: self.status.unwrap_or_default(),
            admin_blocked_days_raw,
            host_blocked_days_raw,
        }
    }

    fn field_raw(&self, name: &str) -> String {
        let nested = ["meta", "acf"]
            .iter()
            .filter_map(|group| self.fields.get(*group).and_then(Value::as_object))
            .find_map(|group| group.get(name));
        self.fields
            .get(name)
            .or(nested)
            .map(blocklist_value_to_raw)
            .unwrap_or_default()
    }
}

/// Flattens a blocklist field into its comma-joined form.
pub fn blocklist_value_to_raw(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.clone(),
        Value::Array(items) => items
            .iter()
            .flat_map(|item| match item {
                Value::String(raw) => raw.split(',').map(str::to_string).collect(),
                Value::Array(_) => vec![blocklist_value_to_raw(item)],
                _ => Vec::new(),
            })
            .map(|date| date.trim().to_string())
            .filter(|date| !date.is_empty())
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    }
}

fn title_text(title: &Value, fields: &Map<String, Value>) -> String {
    match title {
        Value::String(text) => text.clone(),
        Value::Object(parts) => parts
            .get("raw")
            .or_else(|| parts.get("rendered"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => fields
            .get("post_title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

//! Identity resolution for heterogeneous backend record shapes.
//!
//! The backend reports contacts, documents, and images with inconsistent
//! field names. One precedence-ordered coalescing function maps them all to
//! a single stable string key. Numeric group/user identifiers outrank
//! display names so that two contacts sharing a display name never alias.

use serde_json::Value;

use crate::types::{Contact, ContactKind};

/// Field precedence for identity resolution. Order is a design contract.
const IDENTITY_FIELDS: [&str; 7] = [
    "id",
    "contact_id",
    "group_id",
    "user_id",
    "name",
    "nickname",
    "group_name",
];

/// Fields considered for a human-readable label, most specific first.
const LABEL_FIELDS: [&str; 3] = ["name", "nickname", "group_name"];

/// Resolve a loosely-typed backend record to a stable identity string.
///
/// Returns the first non-empty field in precedence order, with numbers
/// coerced to their decimal representation. Returns an empty string when no
/// field is usable; callers must treat that as "unresolved" and exclude the
/// record from selectable lists.
pub fn resolve(raw: &Value) -> String {
    for field in IDENTITY_FIELDS {
        if let Some(text) = field_as_string(raw, field) {
            return text;
        }
    }
    String::new()
}

/// Resolve the display label for a record, falling back to the identity.
pub fn display_label(raw: &Value) -> String {
    for field in LABEL_FIELDS {
        if let Some(text) = field_as_string(raw, field) {
            return text;
        }
    }
    resolve(raw)
}

/// Normalize a raw contact record. Returns `None` when the identity cannot
/// be resolved, so unusable records never reach the selectable list.
pub fn normalize_contact(raw: &Value) -> Option<Contact> {
    let identity = resolve(raw);
    if identity.is_empty() {
        return None;
    }
    let kind = raw
        .get("type")
        .and_then(Value::as_str)
        .map(|t| match t {
            "group" => ContactKind::Group,
            "private" => ContactKind::Private,
            other => ContactKind::Other(other.to_string()),
        });
    Some(Contact {
        display_name: display_label(raw),
        raw_group_name: field_as_string(raw, "group_name"),
        identity,
        kind,
    })
}

fn field_as_string(raw: &Value, field: &str) -> Option<String> {
    match raw.get(field)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

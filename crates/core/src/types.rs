use serde::{Deserialize, Serialize};

/// Whether a contact is a group chat, a direct chat, or something the
/// backend invented that we pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Group,
    Private,
    #[serde(untagged)]
    Other(String),
}

impl ContactKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Group => "group",
            Self::Private => "private",
            Self::Other(raw) => raw,
        }
    }
}

/// A normalized contact. `identity` is derived by [`crate::identity::resolve`]
/// and is stable for the lifetime of a session once resolved; it is never
/// empty for a selectable contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub identity: String,
    pub display_name: String,
    pub kind: Option<ContactKind>,
    pub raw_group_name: Option<String>,
}

impl Contact {
    /// Label shown in the contact list: display name plus kind tag.
    pub fn label(&self) -> String {
        match &self.kind {
            Some(kind) => format!("{} · {}", self.display_name, kind.label().to_uppercase()),
            None => self.display_name.clone(),
        }
    }
}

/// Content type of a history record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    #[serde(untagged)]
    Other(String),
}

impl Default for ContentKind {
    fn default() -> Self {
        Self::Text
    }
}

impl ContentKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Other(other) => other,
        }
    }
}

/// One message in a contact's chat history, as returned by the backend.
///
/// Records arrive in non-decreasing chronological order and are never
/// re-sorted by the client — only truncated or filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Sender identity (resolved backend field, may be a display name).
    #[serde(default, alias = "name")]
    pub sender: String,
    /// Display timestamp string as supplied by the backend.
    #[serde(default)]
    pub time: String,
    /// Message body.
    #[serde(default, alias = "text")]
    pub text_body: String,
    /// Text extracted from attached documents or OCR'd images.
    #[serde(default)]
    pub extracted_content: Option<String>,
    #[serde(default)]
    pub content_type: ContentKind,
    /// Path of a locally saved media file, if any.
    #[serde(default, alias = "local_path")]
    pub local_resource_path: Option<String>,
}

impl HistoryRecord {
    /// The text a search query is matched against: body and extracted
    /// content, space-joined.
    pub fn searchable_text(&self) -> String {
        match self.extracted_content.as_deref() {
            Some(extra) if !extra.is_empty() => format!("{} {}", self.text_body, extra),
            _ => self.text_body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_label_includes_kind_tag() {
        let contact = Contact {
            identity: "42".to_string(),
            display_name: "Ops".to_string(),
            kind: Some(ContactKind::Group),
            raw_group_name: Some("Ops Group".to_string()),
        };
        assert_eq!(contact.label(), "Ops · GROUP");
    }

    #[test]
    fn searchable_text_joins_body_and_extracted_content() {
        let record = HistoryRecord {
            sender: "A".to_string(),
            time: "t1".to_string(),
            text_body: "see attached".to_string(),
            extracted_content: Some("quarterly report".to_string()),
            content_type: ContentKind::Text,
            local_resource_path: None,
        };
        assert_eq!(record.searchable_text(), "see attached quarterly report");
    }

    #[test]
    fn history_record_deserializes_backend_field_names() {
        let record: HistoryRecord = serde_json::from_str(
            r#"{"name":"alice","time":"2025-01-01 10:00","text":"hi","content_type":"text","local_path":null}"#,
        )
        .unwrap();
        assert_eq!(record.sender, "alice");
        assert_eq!(record.text_body, "hi");
        assert_eq!(record.content_type, ContentKind::Text);
    }

    #[test]
    fn unknown_content_type_is_preserved() {
        let record: HistoryRecord =
            serde_json::from_str(r#"{"name":"a","time":"t","text":"x","content_type":"sticker"}"#)
                .unwrap();
        assert_eq!(record.content_type, ContentKind::Other("sticker".to_string()));
    }
}

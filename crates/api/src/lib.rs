//! Shared API types for the messaging-bot backend.
//!
//! This crate is the single source of truth for the backend's request and
//! response shapes. The console and its tests import these types directly;
//! the raw contact/history records stay loosely typed (`serde_json::Value`)
//! because the backend reports them with inconsistent field names — identity
//! resolution normalizes them client-side.

use serde::{Deserialize, Serialize};

pub use botdesk_core::types::{Contact, ContactKind, ContentKind, HistoryRecord};

// ─── Envelopes ───────────────────────────────────────────────────────────────

/// Generic `{success, data}` envelope used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

/// History endpoint envelope; records arrive in chronological order.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<HistoryRecord>,
}

// ─── Summaries / notifications ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest {
    pub contact_id: String,
    pub limit: u32,
    pub target_lang: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub summary: Option<String>,
}

impl SummarizeResponse {
    /// A well-formed response with no usable payload is an explicit
    /// "no content" case, not an error.
    pub fn is_empty(&self) -> bool {
        self.summary.as_deref().is_none_or(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationRequest {
    pub contact_id: String,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationItem {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<NotificationItem>,
}

// ─── Documents / images ──────────────────────────────────────────────────────

/// One stored document or image attached to a contact's chat. The backend
/// reports these under varying field names, so both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRecord {
    #[serde(default, alias = "name")]
    pub file_name: String,
    #[serde(default, alias = "path")]
    pub file_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<FileRecord>,
}

// ─── Reply settings ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ReplySettingResponse {
    #[serde(default)]
    pub success: bool,
    /// Absent in some backend versions; callers treat absence as disabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl ReplySettingResponse {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}

// ─── Vector stores ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct VectorDbListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub databases: Vec<String>,
    #[serde(default)]
    pub current_db: Option<String>,
}

// ─── Test messages ───────────────────────────────────────────────────────────

/// Synthetic inbound message used to exercise the bot's auto-reply path.
/// Group messages carry group fields and an `is_at` flag; private messages
/// carry only the user id.
#[derive(Debug, Clone, Serialize)]
pub struct SaveMessageRequest {
    pub post_type: String,
    pub message_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub user_id: String,
    pub message_id: i64,
    pub raw_message: String,
    pub is_at: bool,
    pub sender: SenderInfo,
    pub time: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenderInfo {
    pub nickname: String,
}

impl SaveMessageRequest {
    pub fn group(contact_id: &str, raw_message: &str, message_id: i64, time: i64) -> Self {
        Self {
            post_type: "message".to_string(),
            message_type: "group".to_string(),
            group_id: Some(contact_id.to_string()),
            group_name: Some("Test Group".to_string()),
            user_id: contact_id.to_string(),
            message_id,
            raw_message: raw_message.to_string(),
            is_at: true,
            sender: SenderInfo {
                nickname: "Console Tester".to_string(),
            },
            time,
        }
    }

    pub fn private(contact_id: &str, raw_message: &str, message_id: i64, time: i64) -> Self {
        Self {
            post_type: "message".to_string(),
            message_type: "private".to_string(),
            group_id: None,
            group_name: None,
            user_id: contact_id.to_string(),
            message_id,
            raw_message: raw_message.to_string(),
            is_at: false,
            sender: SenderInfo {
                nickname: "Console Tester".to_string(),
            },
            time,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveMessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub reply: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_counts_as_no_content() {
        let resp: SummarizeResponse =
            serde_json::from_str(r#"{"success": true, "summary": "  "}"#).unwrap();
        assert!(resp.is_empty());
        let resp: SummarizeResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.is_empty());
        let resp: SummarizeResponse =
            serde_json::from_str(r#"{"success": true, "summary": "done"}"#).unwrap();
        assert!(!resp.is_empty());
    }

    #[test]
    fn reply_setting_defaults_to_disabled_when_enabled_is_absent() {
        let resp: ReplySettingResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(!resp.is_enabled());
    }

    #[test]
    fn group_save_message_carries_group_fields() {
        let req = SaveMessageRequest::group("42", "ping", 7, 1700000000);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["group_id"], "42");
        assert_eq!(value["is_at"], true);
        assert_eq!(value["message_type"], "group");
    }

    #[test]
    fn private_save_message_omits_group_fields() {
        let req = SaveMessageRequest::private("42", "ping", 7, 1700000000);
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("group_id").is_none());
        assert_eq!(value["is_at"], false);
    }
}

use std::time::Duration;

use botdesk_api::*;
use botdesk_core::identity;

use crate::error::ClientError;
use crate::retry::{retry_form_post, RetryConfig};

/// Typed HTTP client for the messaging-bot backend.
///
/// One method per endpoint; form-encoded POST bodies match what the backend
/// expects. Contact records are normalized through the identity resolver so
/// unresolvable entries never reach callers.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    // ── Contacts / history ────────────────────────────────────────────────

    pub async fn list_contacts(
        &self,
        type_filter: Option<&str>,
    ) -> Result<Vec<Contact>, ClientError> {
        let mut req = self.client.get(self.url("/msg/list"));
        if let Some(filter) = type_filter {
            req = req.query(&[("type_filter", filter)]);
        }
        let envelope: ListEnvelope = parse_response(req.send().await?).await?;
        Ok(envelope
            .data
            .iter()
            .filter_map(identity::normalize_contact)
            .collect())
    }

    pub async fn chat_history(&self, contact_id: &str) -> Result<Vec<HistoryRecord>, ClientError> {
        let resp = self
            .client
            .get(self.url("/chat/history"))
            .query(&[("contact_id", contact_id)])
            .send()
            .await?;
        let envelope: HistoryResponse = parse_response(resp).await?;
        Ok(envelope.data)
    }

    // ── Summaries / notifications ─────────────────────────────────────────

    pub async fn summarize_chat(
        &self,
        req: &SummarizeRequest,
    ) -> Result<SummarizeResponse, ClientError> {
        self.summarize("/msg/summarize", req).await
    }

    pub async fn chat_notifications(
        &self,
        req: &NotificationRequest,
    ) -> Result<NotificationResponse, ClientError> {
        let resp = self
            .client
            .post(self.url("/msg/notification"))
            .form(&[
                ("contact_id", req.contact_id.as_str()),
                ("limit", &req.limit.to_string()),
            ])
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Reply settings ────────────────────────────────────────────────────

    pub async fn reply_setting(
        &self,
        contact_id: &str,
    ) -> Result<ReplySettingResponse, ClientError> {
        let resp = self
            .client
            .get(self.url("/reply/settings"))
            .query(&[("contact_id", contact_id)])
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn set_reply_setting(
        &self,
        contact_id: &str,
        enabled: bool,
    ) -> Result<ReplySettingResponse, ClientError> {
        let resp = self
            .client
            .post(self.url("/reply/settings"))
            .form(&[
                ("contact_id", contact_id),
                ("enabled", if enabled { "true" } else { "false" }),
            ])
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Vector stores ─────────────────────────────────────────────────────

    pub async fn list_vector_dbs(&self) -> Result<VectorDbListResponse, ClientError> {
        let resp = self.client.get(self.url("/vector-db/list")).send().await?;
        parse_response(resp).await
    }

    pub async fn switch_vector_db(
        &self,
        db_path: &str,
    ) -> Result<VectorDbListResponse, ClientError> {
        let resp = self
            .client
            .post(self.url("/vector-db/switch"))
            .form(&[("db_path", db_path)])
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Documents / images ────────────────────────────────────────────────

    pub async fn list_docs(&self, contact_id: &str) -> Result<Vec<FileRecord>, ClientError> {
        let resp = self
            .client
            .get(self.url("/doc/list"))
            .query(&[("contact_id", contact_id)])
            .send()
            .await?;
        let envelope: FileListResponse = parse_response(resp).await?;
        Ok(envelope.data)
    }

    pub async fn list_images(&self, contact_id: &str) -> Result<Vec<FileRecord>, ClientError> {
        let resp = self
            .client
            .get(self.url("/image/list"))
            .query(&[("contact_id", contact_id)])
            .send()
            .await?;
        let envelope: FileListResponse = parse_response(resp).await?;
        Ok(envelope.data)
    }

    pub async fn summarize_docs(
        &self,
        req: &SummarizeRequest,
    ) -> Result<SummarizeResponse, ClientError> {
        self.summarize("/doc/summarize", req).await
    }

    /// Summaries run a model server-side; transient failures are retried
    /// with backoff.
    async fn summarize(
        &self,
        path: &str,
        req: &SummarizeRequest,
    ) -> Result<SummarizeResponse, ClientError> {
        let limit = req.limit.to_string();
        let resp = retry_form_post(
            &self.client,
            &self.url(path),
            &[
                ("contact_id", req.contact_id.as_str()),
                ("limit", limit.as_str()),
                ("target_lang", req.target_lang.as_str()),
            ],
            &RetryConfig::default(),
        )
        .await?;
        parse_response(resp).await
    }

    /// Translate a document; returns the translated file's bytes.
    pub async fn translate_doc(
        &self,
        file_path: &str,
        target_lang: &str,
    ) -> Result<Vec<u8>, ClientError> {
        self.translate("/doc/translate", file_path, target_lang).await
    }

    /// Translate an image; returns the translated file's bytes.
    pub async fn translate_image(
        &self,
        file_path: &str,
        target_lang: &str,
    ) -> Result<Vec<u8>, ClientError> {
        self.translate("/image/translate", file_path, target_lang)
            .await
    }

    async fn translate(
        &self,
        path: &str,
        file_path: &str,
        target_lang: &str,
    ) -> Result<Vec<u8>, ClientError> {
        let resp = retry_form_post(
            &self.client,
            &self.url(path),
            &[("file_path", file_path), ("target_lang", target_lang)],
            &RetryConfig::default(),
        )
        .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.bytes().await.map_err(ClientError::Decode)?.to_vec())
    }

    // ── Test messages ─────────────────────────────────────────────────────

    /// Feed a synthetic inbound message through the bot's auto-reply path.
    pub async fn save_message(
        &self,
        req: &SaveMessageRequest,
    ) -> Result<SaveMessageResponse, ClientError> {
        let resp = self
            .client
            .post(self.url("/message/save"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }
}

/// Parse an HTTP response: deserialize the body on 2xx, or return a status
/// error carrying the body text.
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }
    resp.json().await.map_err(ClientError::Decode)
}

//! Mutation dispatch: backend writes, their cache invalidations, and the
//! notifications they produce.
//!
//! Each mutation names the write, its payload, the cache keys to invalidate
//! on success, and its toast text. Invalidation and notification happen only
//! after the outcome is fully determined — never optimistically. On failure
//! the caches are left untouched, so the previously displayed values stay
//! visible. Concurrent mutations are not de-duplicated: unlike reads, writes
//! are not idempotent by default, and the caller decides whether to allow
//! overlap.

use std::time::Instant;

use botdesk_api::{FileRecord, NotificationItem, SummarizeResponse};

use crate::async_ops::AsyncCommand;
use crate::notify::ToastChannel;
use crate::stores::Stores;

/// A backend write requested from the console.
#[derive(Debug, Clone)]
pub enum Mutation {
    UpdateReplySetting {
        contact: String,
        enabled: bool,
    },
    SwitchVectorDb {
        db_path: String,
    },
    SummarizeChat {
        contact: String,
        limit: u32,
        target_lang: String,
    },
    FetchNotifications {
        contact: String,
        limit: u32,
    },
    SendTestMessage {
        contact: String,
        group: bool,
        text: String,
    },
    ListFiles {
        contact: String,
        kind: FileKind,
    },
    SummarizeDocs {
        contact: String,
        limit: u32,
        target_lang: String,
    },
    TranslateDoc {
        file_path: String,
        target_lang: String,
    },
    TranslateImage {
        file_path: String,
        target_lang: String,
    },
}

/// Which stored-file listing is being browsed; decides the translate
/// endpoint used for a selected entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Doc,
    Image,
}

/// Resolved result of a mutation, reported back to the event loop.
#[derive(Debug)]
pub enum MutationOutcome {
    ReplySettingUpdated {
        contact: String,
        result: Result<bool, String>,
    },
    VectorDbSwitched {
        result: Result<(), String>,
    },
    ChatSummary {
        result: Result<SummarizeResponse, String>,
    },
    Notifications {
        result: Result<Vec<NotificationItem>, String>,
    },
    TestMessageSent {
        result: Result<Option<String>, String>,
    },
    FilesListed {
        kind: FileKind,
        result: Result<Vec<FileRecord>, String>,
    },
    DocsSummary {
        result: Result<SummarizeResponse, String>,
    },
    /// `Ok` carries the saved local filename.
    FileTranslated {
        result: Result<String, String>,
    },
}

/// A view-level effect the outcome asks for (modal contents).
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// `None` means the backend answered with no usable summary — rendered
    /// as an explicit "no content" placeholder, not an error.
    ShowSummary(Option<String>),
    ShowNotifications(Vec<NotificationItem>),
    ShowFiles(FileKind, Vec<FileRecord>),
}

/// Apply a mutation outcome: invalidate the declared cache keys and push the
/// notification on success, or push an error notification and leave every
/// cache untouched on failure. Returns the refetch commands the invalidation
/// scheduled plus any modal effect.
pub fn apply_outcome(
    outcome: MutationOutcome,
    stores: &mut Stores,
    toasts: &mut ToastChannel,
    now: Instant,
) -> (Vec<AsyncCommand>, Option<UiEffect>) {
    let mut refetches = Vec::new();
    let mut effect = None;

    match outcome {
        MutationOutcome::ReplySettingUpdated { contact, result } => match result {
            Ok(enabled) => {
                refetches.push(AsyncCommand::FetchReplySetting(
                    stores.reply.invalidate(contact),
                ));
                let state = if enabled { "enabled" } else { "disabled" };
                toasts.success(format!("Auto-reply {state}"), now);
            }
            Err(e) => toasts.error(format!("Failed to update auto-reply: {e}"), now),
        },

        MutationOutcome::VectorDbSwitched { result } => match result {
            Ok(()) => {
                refetches.push(AsyncCommand::FetchVectorDbs(stores.vector_dbs.invalidate(())));
                toasts.success("Vector store switched", now);
            }
            Err(e) => toasts.error(format!("Failed to switch vector store: {e}"), now),
        },

        MutationOutcome::ChatSummary { result } => match result {
            Ok(resp) => {
                let summary = if resp.is_empty() { None } else { resp.summary };
                effect = Some(UiEffect::ShowSummary(summary));
            }
            Err(e) => toasts.error(format!("Failed to fetch summary: {e}"), now),
        },

        MutationOutcome::Notifications { result } => match result {
            Ok(items) => effect = Some(UiEffect::ShowNotifications(items)),
            Err(e) => toasts.error(format!("Failed to fetch notifications: {e}"), now),
        },

        MutationOutcome::TestMessageSent { result } => match result {
            Ok(Some(reply)) => toasts.info(format!("Bot replied: {reply}"), now),
            Ok(None) => toasts.info("Message delivered", now),
            Err(e) => toasts.error(format!("Failed to send message: {e}"), now),
        },

        MutationOutcome::FilesListed { kind, result } => match result {
            Ok(files) => effect = Some(UiEffect::ShowFiles(kind, files)),
            Err(e) => toasts.error(format!("Failed to list files: {e}"), now),
        },

        MutationOutcome::DocsSummary { result } => match result {
            Ok(resp) => {
                let summary = if resp.is_empty() { None } else { resp.summary };
                effect = Some(UiEffect::ShowSummary(summary));
            }
            Err(e) => toasts.error(format!("Failed to fetch summary: {e}"), now),
        },

        MutationOutcome::FileTranslated { result } => match result {
            Ok(name) => toasts.success(format!("Translation saved as {name}"), now),
            Err(e) => toasts.error(format!("Translation failed: {e}"), now),
        },
    }

    (refetches, effect)
}

//! Commands that require async I/O (network calls), executed on the tokio
//! runtime. Each result is tagged with the fetch ticket it was issued
//! against so the caches can discard superseded responses.

use std::path::Path;

use botdesk_api::{
    NotificationRequest, SaveMessageRequest, SummarizeRequest, VectorDbListResponse,
};
use botdesk_api_client::ApiClient;
use botdesk_core::files::translated_filename;
use botdesk_core::types::{Contact, HistoryRecord};
use tracing::debug;

use crate::cache::FetchTicket;
use crate::dispatch::{FileKind, Mutation, MutationOutcome};
use crate::stores::ContactsKey;

#[derive(Debug, Clone)]
pub enum AsyncCommand {
    FetchContacts(FetchTicket<ContactsKey>),
    FetchHistory(FetchTicket<String>),
    FetchReplySetting(FetchTicket<String>),
    FetchVectorDbs(FetchTicket<()>),
    Mutate(Mutation),
}

#[derive(Debug)]
pub enum CommandResult {
    Contacts(FetchTicket<ContactsKey>, Result<Vec<Contact>, String>),
    History(FetchTicket<String>, Result<Vec<HistoryRecord>, String>),
    ReplySetting(FetchTicket<String>, Result<bool, String>),
    VectorDbs(FetchTicket<()>, Result<VectorDbListResponse, String>),
    Mutated(MutationOutcome),
}

pub async fn execute(cmd: AsyncCommand, client: &ApiClient, downloads_dir: &Path) -> CommandResult {
    match cmd {
        AsyncCommand::FetchContacts(ticket) => {
            debug!(filter = ?ticket.key, "fetching contacts");
            let result = client
                .list_contacts(ticket.key.as_deref())
                .await
                .map_err(|e| e.to_string());
            CommandResult::Contacts(ticket, result)
        }

        AsyncCommand::FetchHistory(ticket) => {
            debug!(contact = %ticket.key, seq = ticket.seq, "fetching history");
            let result = client
                .chat_history(&ticket.key)
                .await
                .map_err(|e| e.to_string());
            CommandResult::History(ticket, result)
        }

        AsyncCommand::FetchReplySetting(ticket) => {
            let result = client
                .reply_setting(&ticket.key)
                .await
                .map(|resp| resp.is_enabled())
                .map_err(|e| e.to_string());
            CommandResult::ReplySetting(ticket, result)
        }

        AsyncCommand::FetchVectorDbs(ticket) => {
            let result = client.list_vector_dbs().await.map_err(|e| e.to_string());
            CommandResult::VectorDbs(ticket, result)
        }

        AsyncCommand::Mutate(mutation) => {
            CommandResult::Mutated(run_mutation(mutation, client, downloads_dir).await)
        }
    }
}

/// Execute one backend write. At most one network call per invocation.
async fn run_mutation(
    mutation: Mutation,
    client: &ApiClient,
    downloads_dir: &Path,
) -> MutationOutcome {
    match mutation {
        Mutation::UpdateReplySetting { contact, enabled } => {
            let result = client
                .set_reply_setting(&contact, enabled)
                .await
                .map(|resp| resp.enabled.unwrap_or(enabled))
                .map_err(|e| e.to_string());
            MutationOutcome::ReplySettingUpdated { contact, result }
        }

        Mutation::SwitchVectorDb { db_path } => {
            let result = client
                .switch_vector_db(&db_path)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string());
            MutationOutcome::VectorDbSwitched { result }
        }

        Mutation::SummarizeChat {
            contact,
            limit,
            target_lang,
        } => {
            let result = client
                .summarize_chat(&SummarizeRequest {
                    contact_id: contact,
                    limit,
                    target_lang,
                })
                .await
                .map_err(|e| e.to_string());
            MutationOutcome::ChatSummary { result }
        }

        Mutation::FetchNotifications { contact, limit } => {
            let result = client
                .chat_notifications(&NotificationRequest {
                    contact_id: contact,
                    limit,
                })
                .await
                .map(|resp| resp.data)
                .map_err(|e| e.to_string());
            MutationOutcome::Notifications { result }
        }

        Mutation::SendTestMessage {
            contact,
            group,
            text,
        } => {
            let now = chrono::Utc::now();
            let text = if text.is_empty() {
                "[empty message]".to_string()
            } else {
                text
            };
            let req = if group {
                SaveMessageRequest::group(&contact, &text, now.timestamp_millis(), now.timestamp())
            } else {
                SaveMessageRequest::private(&contact, &text, now.timestamp_millis(), now.timestamp())
            };
            let result = client
                .save_message(&req)
                .await
                .map(|resp| resp.reply.filter(|r| !r.trim().is_empty()))
                .map_err(|e| e.to_string());
            MutationOutcome::TestMessageSent { result }
        }

        Mutation::ListFiles { contact, kind } => {
            let result = match kind {
                FileKind::Doc => client.list_docs(&contact).await,
                FileKind::Image => client.list_images(&contact).await,
            }
            .map_err(|e| e.to_string());
            MutationOutcome::FilesListed { kind, result }
        }

        Mutation::SummarizeDocs {
            contact,
            limit,
            target_lang,
        } => {
            let result = client
                .summarize_docs(&SummarizeRequest {
                    contact_id: contact,
                    limit,
                    target_lang,
                })
                .await
                .map_err(|e| e.to_string());
            MutationOutcome::DocsSummary { result }
        }

        Mutation::TranslateDoc {
            file_path,
            target_lang,
        } => {
            let result = translate_and_save(
                client.translate_doc(&file_path, &target_lang).await,
                &file_path,
                downloads_dir,
            );
            MutationOutcome::FileTranslated { result }
        }

        Mutation::TranslateImage {
            file_path,
            target_lang,
        } => {
            let result = translate_and_save(
                client.translate_image(&file_path, &target_lang).await,
                &file_path,
                downloads_dir,
            );
            MutationOutcome::FileTranslated { result }
        }
    }
}

/// Save translated bytes under `<stem>_translated.<ext>` in the downloads
/// directory.
fn translate_and_save(
    bytes: Result<Vec<u8>, botdesk_api_client::ClientError>,
    original_path: &str,
    downloads_dir: &Path,
) -> Result<String, String> {
    let bytes = bytes.map_err(|e| e.to_string())?;
    let name = translated_filename(original_path);
    let target = downloads_dir.join(&name);
    std::fs::create_dir_all(downloads_dir).map_err(|e| e.to_string())?;
    std::fs::write(&target, bytes).map_err(|e| e.to_string())?;
    Ok(name)
}

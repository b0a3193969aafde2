//! Application state and the reactions that coordinate it.
//!
//! The `App` owns the resource caches, the search state, and the UI-only
//! derived state (selection, scroll anchor, modal visibility). All network
//! work is expressed as pending `AsyncCommand`s which the event loop spawns
//! onto the runtime; results come back through `apply_command_result`.

use std::time::Instant;

use botdesk_api::{FileRecord, NotificationItem};
use botdesk_core::search;
use botdesk_core::types::{Contact, HistoryRecord};
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

use crate::async_ops::{AsyncCommand, CommandResult};
use crate::config::ConsoleConfig;
use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::dispatch::{self, FileKind, Mutation, UiEffect};
use crate::notify::ToastChannel;
use crate::stores::Stores;

/// Which panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Contacts,
    Search,
    Actions,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Contacts => Self::Search,
            Self::Search => Self::Actions,
            Self::Actions => Self::Contacts,
        }
    }
}

/// Modal overlay contents.
#[derive(Debug)]
pub enum Modal {
    /// `None` renders the explicit "no content" placeholder.
    Summary(Option<String>),
    Notifications(Vec<NotificationItem>),
    /// Browsable list of stored docs or images for the selected contact.
    Files {
        kind: FileKind,
        files: Vec<FileRecord>,
        cursor: usize,
    },
}

pub struct App {
    pub config: ConsoleConfig,
    pub stores: Stores,
    pub toasts: ToastChannel,
    pub focus: Focus,

    // ── Contacts panel ────────────────────────────────────────────────
    pub type_filter: Option<String>,
    pub contacts_state: ListState,
    pub selected_contact: Option<String>,

    // ── History / search panel ────────────────────────────────────────
    pub query_input: String,
    pub committed_query: String,
    /// Indices into the selected contact's cached history; derived only
    /// from the committed query, never from an intermediate keystroke.
    pub search_results: Vec<usize>,
    pub debouncer: Debouncer,
    pub history_state: ListState,

    // ── Actions panel ─────────────────────────────────────────────────
    pub vector_db_cursor: usize,
    pub test_message: String,
    pub editing_test_message: bool,
    pub mutation_pending: bool,

    pub modal: Option<Modal>,
    pending_commands: Vec<AsyncCommand>,
}

impl App {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            stores: Stores::new(),
            toasts: ToastChannel::new(),
            focus: Focus::Contacts,
            type_filter: None,
            contacts_state: ListState::default(),
            selected_contact: None,
            query_input: String::new(),
            committed_query: String::new(),
            search_results: Vec::new(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            history_state: ListState::default(),
            vector_db_cursor: 0,
            test_message: String::new(),
            editing_test_message: false,
            mutation_pending: false,
            modal: None,
            pending_commands: Vec::new(),
        }
    }

    /// Initial fetches issued on startup.
    pub fn bootstrap(&mut self) {
        self.request_contacts();
        if let Some(ticket) = self.stores.vector_dbs.fetch_if_needed(()) {
            self.pending_commands.push(AsyncCommand::FetchVectorDbs(ticket));
        }
    }

    pub fn take_pending_commands(&mut self) -> Vec<AsyncCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    // ── Derived views ─────────────────────────────────────────────────

    pub fn contacts(&self) -> &[Contact] {
        self.stores
            .contacts
            .value(&self.type_filter)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn selected_history(&self) -> &[HistoryRecord] {
        self.selected_contact
            .as_ref()
            .and_then(|c| self.stores.history.value(c))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn search_active(&self) -> bool {
        !self.committed_query.trim().is_empty()
    }

    /// The records the history panel renders: search results when a query is
    /// committed, otherwise the most recent window of the full history (the
    /// empty-query path bypasses the search engine entirely).
    pub fn visible_history(&self) -> Vec<&HistoryRecord> {
        let history = self.selected_history();
        if self.search_active() {
            self.search_results
                .iter()
                .filter_map(|&i| history.get(i))
                .collect()
        } else {
            let window = self.config.ui.history_window;
            let start = history.len().saturating_sub(window);
            history[start..].iter().collect()
        }
    }

    // ── Requests ──────────────────────────────────────────────────────

    fn request_contacts(&mut self) {
        if let Some(ticket) = self.stores.contacts.fetch_if_needed(self.type_filter.clone()) {
            self.pending_commands.push(AsyncCommand::FetchContacts(ticket));
        }
    }

    fn request_contact_data(&mut self, contact: &str) {
        if let Some(ticket) = self.stores.history.fetch_if_needed(contact.to_string()) {
            self.pending_commands.push(AsyncCommand::FetchHistory(ticket));
        }
        if let Some(ticket) = self.stores.reply.fetch_if_needed(contact.to_string()) {
            self.pending_commands
                .push(AsyncCommand::FetchReplySetting(ticket));
        }
    }

    fn push_mutation(&mut self, mutation: Mutation) {
        self.mutation_pending = true;
        self.pending_commands.push(AsyncCommand::Mutate(mutation));
    }

    // ── Reactions (named state transitions) ───────────────────────────

    /// Select a contact: clears the query and any in-flight debounce, and
    /// clears dependent derived panels keyed to the previous contact.
    /// Responses for the old contact's keys stay cached under the old key
    /// and are simply not rendered.
    pub fn select_contact(&mut self, identity: String) {
        if self.selected_contact.as_deref() == Some(identity.as_str()) {
            return;
        }
        self.query_input.clear();
        self.committed_query.clear();
        self.search_results.clear();
        self.debouncer.cancel();
        self.modal = None;
        self.selected_contact = Some(identity.clone());
        self.request_contact_data(&identity);
        self.on_history_updated();
    }

    /// History cache updated while no query is active: the scroll anchor
    /// moves to the end of the rendered sequence (newest message visible).
    pub fn on_history_updated(&mut self) {
        let len = self.visible_history().len();
        if len == 0 {
            self.history_state.select(None);
        } else {
            self.history_state.select(Some(len - 1));
        }
    }

    /// Search results updated: the scroll anchor resets to the start.
    pub fn on_search_updated(&mut self) {
        *self.history_state.offset_mut() = 0;
        self.history_state
            .select(if self.visible_history().is_empty() {
                None
            } else {
                Some(0)
            });
    }

    /// Commit the current query and recompute results from the cached
    /// history. Called when the debounce window fires and when the cache
    /// content changes under an active query.
    fn recompute_search(&mut self) {
        self.committed_query = self.query_input.clone();
        if !self.search_active() {
            self.search_results.clear();
            self.on_history_updated();
            return;
        }
        let history = self.selected_history();
        let limit = self.config.ui.search_limit;
        let matched = search::search(history, &self.committed_query, limit);
        // Store indices so results stay tied to the cache value they came from.
        let mut results = Vec::with_capacity(matched.len());
        let mut cursor = 0usize;
        for record in matched {
            while cursor < history.len() {
                if std::ptr::eq(&history[cursor], record) {
                    results.push(cursor);
                    cursor += 1;
                    break;
                }
                cursor += 1;
            }
        }
        self.search_results = results;
        self.on_search_updated();
    }

    // ── Tick ──────────────────────────────────────────────────────────

    pub fn tick(&mut self, now: Instant) {
        if self.debouncer.fire_if_ready(now) {
            self.recompute_search();
        }
        self.toasts.tick(now);
    }

    // ── Command results ───────────────────────────────────────────────

    pub fn apply_command_result(&mut self, result: CommandResult, now: Instant) {
        match result {
            CommandResult::Contacts(ticket, result) => match result {
                Ok(contacts) => {
                    let applied = self.stores.contacts.apply_success(&ticket, contacts);
                    if applied && ticket.key == self.type_filter {
                        self.clamp_contact_cursor();
                    }
                }
                Err(e) => {
                    self.stores.contacts.apply_error(&ticket, e);
                }
            },

            CommandResult::History(ticket, result) => match result {
                Ok(records) => {
                    let for_selected = self.selected_contact.as_deref() == Some(&ticket.key);
                    if self.stores.history.apply_success(&ticket, records) && for_selected {
                        if self.search_active() {
                            self.recompute_search();
                        } else {
                            self.on_history_updated();
                        }
                    }
                }
                Err(e) => {
                    self.stores.history.apply_error(&ticket, e);
                }
            },

            CommandResult::ReplySetting(ticket, result) => match result {
                Ok(enabled) => {
                    self.stores.reply.apply_success(&ticket, enabled);
                }
                Err(e) => {
                    self.stores.reply.apply_error(&ticket, e);
                }
            },

            CommandResult::VectorDbs(ticket, result) => match result {
                Ok(resp) => {
                    if self.stores.vector_dbs.apply_success(&ticket, resp) {
                        let count = self
                            .stores
                            .vector_dbs
                            .value(&())
                            .map(|v| v.databases.len())
                            .unwrap_or(0);
                        self.vector_db_cursor = self.vector_db_cursor.min(count.saturating_sub(1));
                    }
                }
                Err(e) => {
                    self.stores.vector_dbs.apply_error(&ticket, e);
                }
            },

            CommandResult::Mutated(outcome) => {
                self.mutation_pending = false;
                let (refetches, effect) =
                    dispatch::apply_outcome(outcome, &mut self.stores, &mut self.toasts, now);
                self.pending_commands.extend(refetches);
                match effect {
                    Some(UiEffect::ShowSummary(summary)) => {
                        self.modal = Some(Modal::Summary(summary));
                    }
                    Some(UiEffect::ShowNotifications(items)) => {
                        self.modal = Some(Modal::Notifications(items));
                    }
                    Some(UiEffect::ShowFiles(kind, files)) => {
                        self.modal = Some(Modal::Files {
                            kind,
                            files,
                            cursor: 0,
                        });
                    }
                    None => {}
                }
            }
        }
    }

    fn clamp_contact_cursor(&mut self) {
        let len = self.contacts().len();
        match self.contacts_state.selected() {
            Some(_) if len == 0 => self.contacts_state.select(None),
            Some(i) if i >= len => self.contacts_state.select(Some(len - 1)),
            None if len > 0 => self.contacts_state.select(Some(0)),
            _ => {}
        }
    }

    // ── Key handling ──────────────────────────────────────────────────

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> bool {
        if self.modal.is_some() {
            self.handle_modal_key(key);
            return false;
        }

        if self.editing_test_message {
            return self.handle_test_message_key(key);
        }

        if self.focus == Focus::Search {
            match key {
                KeyCode::Char(c) => {
                    self.query_input.push(c);
                    self.debouncer.note_input(now);
                    return false;
                }
                KeyCode::Backspace => {
                    self.query_input.pop();
                    if self.query_input.trim().is_empty() {
                        // Empty query bypasses the engine with no latency.
                        self.debouncer.cancel();
                        self.committed_query.clear();
                        self.search_results.clear();
                        self.on_history_updated();
                    } else {
                        self.debouncer.note_input(now);
                    }
                    return false;
                }
                KeyCode::Esc => {
                    self.clear_query();
                    return false;
                }
                KeyCode::Tab => {
                    self.focus = self.focus.next();
                    return false;
                }
                _ => return false,
            }
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            _ => match self.focus {
                Focus::Contacts => self.handle_contacts_key(key),
                Focus::Actions => self.handle_actions_key(key),
                Focus::Search => {}
            },
        }
        false
    }

    fn handle_modal_key(&mut self, key: KeyCode) {
        let Some(modal) = &mut self.modal else {
            return;
        };
        match modal {
            Modal::Files {
                kind,
                files,
                cursor,
            } => match key {
                KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    if !files.is_empty() {
                        *cursor = (*cursor + 1).min(files.len() - 1);
                    }
                }
                KeyCode::Enter => {
                    let Some(file) = files.get(*cursor) else {
                        self.modal = None;
                        return;
                    };
                    let file_path = file.file_path.clone();
                    let target_lang = self.config.ui.target_lang.clone();
                    let mutation = match kind {
                        FileKind::Doc => Mutation::TranslateDoc {
                            file_path,
                            target_lang,
                        },
                        FileKind::Image => Mutation::TranslateImage {
                            file_path,
                            target_lang,
                        },
                    };
                    self.modal = None;
                    self.push_mutation(mutation);
                }
                KeyCode::Char('m') if *kind == FileKind::Doc => {
                    if let Some(contact) = self.selected_contact.clone() {
                        self.modal = None;
                        let target_lang = self.config.ui.target_lang.clone();
                        self.push_mutation(Mutation::SummarizeDocs {
                            contact,
                            limit: 20,
                            target_lang,
                        });
                    }
                }
                KeyCode::Esc | KeyCode::Char('q') => self.modal = None,
                _ => {}
            },
            Modal::Summary(_) | Modal::Notifications(_) => {
                if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.modal = None;
                }
            }
        }
    }

    fn clear_query(&mut self) {
        self.query_input.clear();
        self.committed_query.clear();
        self.search_results.clear();
        self.debouncer.cancel();
        self.on_history_updated();
    }

    fn handle_contacts_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.move_contact_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_contact_cursor(1),
            KeyCode::Enter => {
                if let Some(identity) = self
                    .contacts_state
                    .selected()
                    .and_then(|i| self.contacts().get(i))
                    .map(|c| c.identity.clone())
                {
                    self.select_contact(identity);
                }
            }
            KeyCode::Char('f') => self.cycle_type_filter(),
            KeyCode::Char('r') => {
                let ticket = self.stores.contacts.invalidate(self.type_filter.clone());
                self.pending_commands.push(AsyncCommand::FetchContacts(ticket));
            }
            _ => {}
        }
    }

    fn move_contact_cursor(&mut self, delta: i64) {
        let len = self.contacts().len();
        if len == 0 {
            return;
        }
        let current = self.contacts_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.contacts_state.select(Some(next));
    }

    /// Cycle all → group → private. The old key's entry stays cached, so
    /// returning to a previous filter renders instantly.
    fn cycle_type_filter(&mut self) {
        self.type_filter = match self.type_filter.as_deref() {
            None => Some("group".to_string()),
            Some("group") => Some("private".to_string()),
            Some(_) => None,
        };
        self.request_contacts();
        self.clamp_contact_cursor();
    }

    fn handle_actions_key(&mut self, key: KeyCode) {
        let Some(contact) = self.selected_contact.clone() else {
            return;
        };
        if self.mutation_pending && !matches!(key, KeyCode::Char('t')) {
            return;
        }
        match key {
            KeyCode::Char('s') => self.push_mutation(Mutation::SummarizeChat {
                contact,
                limit: 100,
                target_lang: self.config.ui.target_lang.clone(),
            }),
            KeyCode::Char('n') => self.push_mutation(Mutation::FetchNotifications {
                contact,
                limit: 80,
            }),
            KeyCode::Char('a') => {
                let current = self.stores.reply.value(&contact).copied().unwrap_or(false);
                self.push_mutation(Mutation::UpdateReplySetting {
                    contact,
                    enabled: !current,
                });
            }
            KeyCode::Up => self.vector_db_cursor = self.vector_db_cursor.saturating_sub(1),
            KeyCode::Down => {
                let count = self
                    .stores
                    .vector_dbs
                    .value(&())
                    .map(|v| v.databases.len())
                    .unwrap_or(0);
                if count > 0 {
                    self.vector_db_cursor = (self.vector_db_cursor + 1).min(count - 1);
                }
            }
            KeyCode::Enter => {
                if let Some(db) = self
                    .stores
                    .vector_dbs
                    .value(&())
                    .and_then(|v| v.databases.get(self.vector_db_cursor))
                    .cloned()
                {
                    self.push_mutation(Mutation::SwitchVectorDb { db_path: db });
                }
            }
            KeyCode::Char('d') => self.push_mutation(Mutation::ListFiles {
                contact,
                kind: FileKind::Doc,
            }),
            KeyCode::Char('i') => self.push_mutation(Mutation::ListFiles {
                contact,
                kind: FileKind::Image,
            }),
            KeyCode::Char('t') => self.editing_test_message = true,
            _ => {}
        }
    }

    fn handle_test_message_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => self.test_message.push(c),
            KeyCode::Backspace => {
                self.test_message.pop();
            }
            KeyCode::Esc => self.editing_test_message = false,
            KeyCode::Enter => {
                if let Some(contact) = self.selected_contact.clone() {
                    let group = self
                        .contacts()
                        .iter()
                        .find(|c| c.identity == contact)
                        .map(|c| {
                            matches!(c.kind, Some(botdesk_core::types::ContactKind::Group))
                        })
                        .unwrap_or(true);
                    let text = std::mem::take(&mut self.test_message);
                    self.push_mutation(Mutation::SendTestMessage {
                        contact,
                        group,
                        text,
                    });
                }
                self.editing_test_message = false;
            }
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FetchStatus;
    use botdesk_core::types::ContentKind;
    use std::time::Duration;

    fn record(sender: &str, text: &str, time: &str) -> HistoryRecord {
        HistoryRecord {
            sender: sender.to_string(),
            time: time.to_string(),
            text_body: text.to_string(),
            extracted_content: None,
            content_type: ContentKind::Text,
            local_resource_path: None,
        }
    }

    fn app_with_history(contact: &str, records: Vec<HistoryRecord>) -> App {
        let mut app = App::new(ConsoleConfig::default());
        app.selected_contact = Some(contact.to_string());
        let ticket = app
            .stores
            .history
            .fetch_if_needed(contact.to_string())
            .expect("fetch");
        assert!(app.stores.history.apply_success(&ticket, records));
        app
    }

    fn type_query(app: &mut App, query: &str, now: Instant) {
        app.focus = Focus::Search;
        for c in query.chars() {
            app.handle_key(KeyCode::Char(c), now);
        }
    }

    #[test]
    fn history_update_without_query_anchors_scroll_to_newest() {
        let mut app = app_with_history(
            "42",
            vec![record("A", "one", "t1"), record("B", "two", "t2")],
        );
        app.on_history_updated();
        assert_eq!(app.history_state.selected(), Some(1));
    }

    #[test]
    fn committed_search_anchors_scroll_to_start() {
        let start = Instant::now();
        let mut app = app_with_history(
            "42",
            vec![
                record("A", "hello world", "t1"),
                record("B", "goodbye", "t2"),
                record("C", "hello again", "t3"),
            ],
        );
        type_query(&mut app, "hello", start);

        // Before the quiescence window: nothing is committed.
        app.tick(start + Duration::from_millis(100));
        assert!(!app.search_active());
        assert_eq!(app.visible_history().len(), 3);

        app.tick(start + Duration::from_millis(700));
        assert!(app.search_active());
        let visible = app.visible_history();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].sender, "A");
        assert_eq!(app.history_state.selected(), Some(0));
    }

    #[test]
    fn rapid_keystrokes_commit_only_the_final_query() {
        let start = Instant::now();
        let mut app = app_with_history(
            "42",
            vec![record("A", "alpha", "t1"), record("B", "alphabet", "t2")],
        );
        app.focus = Focus::Search;
        app.handle_key(KeyCode::Char('a'), start);
        app.handle_key(KeyCode::Char('l'), start + Duration::from_millis(100));
        app.handle_key(
            KeyCode::Char('p'),
            start + Duration::from_millis(200),
        );
        app.query_input.push_str("habet");
        app.debouncer.note_input(start + Duration::from_millis(250));

        app.tick(start + Duration::from_millis(540));
        assert!(!app.search_active());
        app.tick(start + Duration::from_millis(560));
        assert_eq!(app.committed_query, "alphabet");
        assert_eq!(app.visible_history().len(), 1);
    }

    #[test]
    fn switching_contact_cancels_pending_debounce_and_clears_panels() {
        let start = Instant::now();
        let mut app = app_with_history("42", vec![record("A", "hello", "t1")]);
        type_query(&mut app, "hello", start);
        assert!(app.debouncer.is_pending());
        app.modal = Some(Modal::Summary(Some("old".to_string())));

        app.select_contact("43".to_string());
        assert!(!app.debouncer.is_pending());
        assert!(app.query_input.is_empty());
        assert!(app.modal.is_none());

        // The debounce for "42" must never publish under "43".
        app.tick(start + Duration::from_millis(1000));
        assert!(!app.search_active());
        assert!(app.search_results.is_empty());
    }

    #[test]
    fn stale_history_for_previous_contact_is_not_rendered() {
        let mut app = App::new(ConsoleConfig::default());
        app.selected_contact = Some("42".to_string());
        let old_ticket = app
            .stores
            .history
            .fetch_if_needed("42".to_string())
            .expect("fetch");

        app.select_contact("43".to_string());
        let new_ticket = app
            .take_pending_commands()
            .into_iter()
            .find_map(|cmd| match cmd {
                AsyncCommand::FetchHistory(t) => Some(t),
                _ => None,
            })
            .expect("history fetch for 43");

        // The old contact's response arrives late; it lands under "42".
        app.apply_command_result(
            CommandResult::History(old_ticket, Ok(vec![record("A", "old", "t1")])),
            Instant::now(),
        );
        assert!(app.visible_history().is_empty());

        app.apply_command_result(
            CommandResult::History(new_ticket, Ok(vec![record("B", "new", "t2")])),
            Instant::now(),
        );
        let visible = app.visible_history();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].sender, "B");
        // "42" stays cached for instant back-navigation.
        assert!(app.stores.history.value(&"42".to_string()).is_some());
    }

    #[test]
    fn history_refresh_under_active_query_recomputes_results() {
        let start = Instant::now();
        let mut app = app_with_history("42", vec![record("A", "hello", "t1")]);
        type_query(&mut app, "hello", start);
        app.tick(start + Duration::from_millis(400));
        assert_eq!(app.visible_history().len(), 1);

        let ticket = app.stores.history.invalidate("42".to_string());
        app.apply_command_result(
            CommandResult::History(
                ticket,
                Ok(vec![
                    record("A", "hello", "t1"),
                    record("B", "hello twice", "t2"),
                ]),
            ),
            start + Duration::from_millis(500),
        );
        assert_eq!(app.visible_history().len(), 2);
        assert_eq!(app.history_state.selected(), Some(0));
    }

    #[test]
    fn clearing_the_query_bypasses_the_engine_without_latency() {
        let start = Instant::now();
        let mut app = app_with_history(
            "42",
            vec![record("A", "hello", "t1"), record("B", "bye", "t2")],
        );
        type_query(&mut app, "hello", start);
        app.tick(start + Duration::from_millis(400));
        assert_eq!(app.visible_history().len(), 1);

        app.focus = Focus::Search;
        app.handle_key(KeyCode::Esc, start + Duration::from_millis(500));
        // Full history is back immediately, anchored to the newest record.
        assert_eq!(app.visible_history().len(), 2);
        assert_eq!(app.history_state.selected(), Some(1));
    }

    #[test]
    fn failed_history_read_keeps_showing_the_cached_value() {
        let mut app = app_with_history("42", vec![record("A", "hello", "t1")]);
        let ticket = app.stores.history.invalidate("42".to_string());
        app.apply_command_result(
            CommandResult::History(ticket, Err("connect timeout".to_string())),
            Instant::now(),
        );
        assert_eq!(app.visible_history().len(), 1);
        let entry = app
            .stores
            .history
            .snapshot(&"42".to_string())
            .expect("entry");
        assert_eq!(entry.status, FetchStatus::Error);
    }

    #[test]
    fn listed_docs_open_a_modal_and_enter_requests_translation() {
        let now = Instant::now();
        let mut app = App::new(ConsoleConfig::default());
        app.selected_contact = Some("42".to_string());
        app.focus = Focus::Actions;

        app.handle_key(KeyCode::Char('d'), now);
        let commands = app.take_pending_commands();
        assert!(matches!(
            commands.as_slice(),
            [AsyncCommand::Mutate(Mutation::ListFiles {
                kind: FileKind::Doc,
                ..
            })]
        ));

        app.apply_command_result(
            CommandResult::Mutated(crate::dispatch::MutationOutcome::FilesListed {
                kind: FileKind::Doc,
                result: Ok(vec![FileRecord {
                    file_name: "report.pdf".to_string(),
                    file_path: "/data/docs/report.pdf".to_string(),
                }]),
            }),
            now,
        );
        assert!(matches!(app.modal, Some(Modal::Files { .. })));

        app.handle_key(KeyCode::Enter, now);
        assert!(app.modal.is_none());
        let commands = app.take_pending_commands();
        match commands.as_slice() {
            [AsyncCommand::Mutate(Mutation::TranslateDoc { file_path, .. })] => {
                assert_eq!(file_path, "/data/docs/report.pdf");
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn default_view_shows_only_the_most_recent_window() {
        let records: Vec<_> = (0..300)
            .map(|i| record("A", &format!("msg {i}"), &format!("t{i}")))
            .collect();
        let mut app = app_with_history("42", records);
        app.config.ui.history_window = 200;
        let visible = app.visible_history();
        assert_eq!(visible.len(), 200);
        assert_eq!(visible[0].text_body, "msg 100");
    }
}

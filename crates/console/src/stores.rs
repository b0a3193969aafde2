//! The console's server-backed resource caches.
//!
//! One typed cache per resource kind; the key is the request parameter tuple.
//! Switching contact or type filter changes the key, which the caches treat
//! as a distinct entity — the old entry stays cached for instant
//! back-navigation while the new key triggers its own fetch.

use botdesk_api::VectorDbListResponse;
use botdesk_core::types::{Contact, HistoryRecord};

use crate::cache::ResourceCache;

/// Contacts are keyed by the optional type filter ("group"/"private").
pub type ContactsKey = Option<String>;

#[derive(Default)]
pub struct Stores {
    pub contacts: ResourceCache<ContactsKey, Vec<Contact>>,
    pub history: ResourceCache<String, Vec<HistoryRecord>>,
    pub reply: ResourceCache<String, bool>,
    pub vector_dbs: ResourceCache<(), VectorDbListResponse>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }
}

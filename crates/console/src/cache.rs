//! Keyed store of asynchronously fetched values with staleness and
//! invalidation semantics.
//!
//! Every fetch is issued against a ticket carrying the key and a per-key
//! monotonically increasing sequence number. A response whose sequence number
//! is not the latest issued for its key is dropped silently, so out-of-order
//! network completion can never overwrite newer state. There is at most one
//! in-flight fetch per key: `fetch_if_needed` is idempotent while an entry is
//! loading or already populated.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// State of one cached resource.
///
/// `value` survives a failed refresh (stale-but-shown): an error flags the
/// entry but keeps the last-known-good data visible.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub status: FetchStatus,
    pub value: Option<T>,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    seq_issued: u64,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            value: None,
            error: None,
            fetched_at: None,
            seq_issued: 0,
        }
    }
}

/// Authorization to run one fetch for one key. Responses must present their
/// ticket back to the cache, which discards superseded sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    pub key: K,
    pub seq: u64,
}

pub struct ResourceCache<K, T> {
    entries: HashMap<K, CacheEntry<T>>,
}

impl<K, T> Default for ResourceCache<K, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, T> ResourceCache<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fetch ticket unless the key is already loading or populated.
    /// A previously errored entry is retried on the next subscription.
    pub fn fetch_if_needed(&mut self, key: K) -> Option<FetchTicket<K>> {
        let entry = self.entries.entry(key.clone()).or_default();
        match entry.status {
            FetchStatus::Loading | FetchStatus::Success => None,
            FetchStatus::Idle | FetchStatus::Error => Some(Self::issue(entry, key)),
        }
    }

    /// Force a refetch: transition to loading and issue exactly one ticket.
    /// Any response still in flight for this key is superseded.
    pub fn invalidate(&mut self, key: K) -> FetchTicket<K> {
        let entry = self.entries.entry(key.clone()).or_default();
        Self::issue(entry, key)
    }

    fn issue(entry: &mut CacheEntry<T>, key: K) -> FetchTicket<K> {
        entry.seq_issued += 1;
        entry.status = FetchStatus::Loading;
        FetchTicket {
            key,
            seq: entry.seq_issued,
        }
    }

    /// Apply a successful response. Returns false when the ticket was
    /// superseded and the response was discarded.
    pub fn apply_success(&mut self, ticket: &FetchTicket<K>, value: T) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if ticket.seq != entry.seq_issued {
            return false;
        }
        entry.status = FetchStatus::Success;
        entry.value = Some(value);
        entry.error = None;
        entry.fetched_at = Some(Utc::now());
        true
    }

    /// Apply a failed response. The last-known-good value is kept.
    pub fn apply_error(&mut self, ticket: &FetchTicket<K>, message: String) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if ticket.seq != entry.seq_issued {
            return false;
        }
        entry.status = FetchStatus::Error;
        entry.error = Some(message);
        true
    }

    pub fn snapshot(&self, key: &K) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    pub fn value(&self, key: &K) -> Option<&T> {
        self.entries.get(key).and_then(|e| e.value.as_ref())
    }

    pub fn is_loading(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.status == FetchStatus::Loading)
    }

    pub fn error(&self, key: &K) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_fetch_in_flight_per_key() {
        let mut cache: ResourceCache<&str, u32> = ResourceCache::new();
        let ticket = cache.fetch_if_needed("contacts").expect("first fetch");
        assert!(cache.fetch_if_needed("contacts").is_none());
        assert!(cache.is_loading(&"contacts"));

        assert!(cache.apply_success(&ticket, 1));
        // Populated entries are not refetched without invalidation.
        assert!(cache.fetch_if_needed("contacts").is_none());
    }

    #[test]
    fn distinct_keys_fetch_independently() {
        let mut cache: ResourceCache<String, u32> = ResourceCache::new();
        assert!(cache.fetch_if_needed("42".to_string()).is_some());
        assert!(cache.fetch_if_needed("43".to_string()).is_some());
        // The first key's entry is untouched by the second.
        assert!(cache.is_loading(&"42".to_string()));
        assert!(cache.is_loading(&"43".to_string()));
    }

    #[test]
    fn stale_response_is_dropped_silently() {
        let mut cache: ResourceCache<&str, u32> = ResourceCache::new();
        let first = cache.fetch_if_needed("history").expect("fetch");
        let second = cache.invalidate("history");

        // Out-of-order completion: the newer response lands first.
        assert!(cache.apply_success(&second, 2));
        assert!(!cache.apply_success(&first, 1));
        assert_eq!(cache.value(&"history"), Some(&2));
    }

    #[test]
    fn stale_error_is_dropped_too() {
        let mut cache: ResourceCache<&str, u32> = ResourceCache::new();
        let first = cache.fetch_if_needed("history").expect("fetch");
        let second = cache.invalidate("history");

        assert!(cache.apply_success(&second, 2));
        assert!(!cache.apply_error(&first, "timeout".to_string()));
        let entry = cache.snapshot(&"history").expect("entry");
        assert_eq!(entry.status, FetchStatus::Success);
        assert!(entry.error.is_none());
    }

    #[test]
    fn error_keeps_last_known_good_value() {
        let mut cache: ResourceCache<&str, u32> = ResourceCache::new();
        let ticket = cache.fetch_if_needed("reply").expect("fetch");
        assert!(cache.apply_success(&ticket, 7));

        let refetch = cache.invalidate("reply");
        assert!(cache.apply_error(&refetch, "502".to_string()));

        let entry = cache.snapshot(&"reply").expect("entry");
        assert_eq!(entry.status, FetchStatus::Error);
        assert_eq!(entry.value, Some(7));
        assert_eq!(entry.error.as_deref(), Some("502"));
    }

    #[test]
    fn errored_entry_is_retried_on_next_subscription() {
        let mut cache: ResourceCache<&str, u32> = ResourceCache::new();
        let ticket = cache.fetch_if_needed("vector-dbs").expect("fetch");
        assert!(cache.apply_error(&ticket, "down".to_string()));
        assert!(cache.fetch_if_needed("vector-dbs").is_some());
    }

    #[test]
    fn invalidate_then_refetch_restores_the_same_value() {
        // Idempotence against an unchanged backend.
        let mut cache: ResourceCache<&str, u32> = ResourceCache::new();
        let ticket = cache.fetch_if_needed("contacts").expect("fetch");
        assert!(cache.apply_success(&ticket, 11));

        let refetch = cache.invalidate("contacts");
        assert!(cache.is_loading(&"contacts"));
        assert!(cache.apply_success(&refetch, 11));
        assert_eq!(cache.value(&"contacts"), Some(&11));
        assert_eq!(
            cache.snapshot(&"contacts").expect("entry").status,
            FetchStatus::Success
        );
    }

    #[test]
    fn invalidate_while_loading_supersedes_the_in_flight_fetch() {
        let mut cache: ResourceCache<&str, u32> = ResourceCache::new();
        let first = cache.fetch_if_needed("history").expect("fetch");
        let second = cache.invalidate("history");
        assert!(second.seq > first.seq);
        assert!(!cache.apply_success(&first, 1));
        assert!(cache.apply_success(&second, 2));
    }
}

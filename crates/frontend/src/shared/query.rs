//! Query cache keyed by `(resource, params...)`.
//!
//! `QueryStore` is the pure bookkeeping: at most one fetch in flight per key,
//! cached data reused until invalidated, and a per-key sequence number so
//! that only the latest issued fetch may write its result. `QueryClient`
//! wraps the store in a signal and `use_query` drives fetches from it.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::shared::request;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self(vec![resource.into()])
    }

    pub fn with(mut self, param: impl Into<String>) -> Self {
        self.0.push(param.into());
        self
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &[String]) -> bool {
        self.0.len() >= prefix.len() && self.0[..prefix.len()] == *prefix
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Which cached entries a mutation makes stale
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    Exact(QueryKey),
    Prefix(Vec<String>),
}

impl Invalidation {
    /// Every key of one resource
    pub fn resource(resource: &str) -> Self {
        Invalidation::Prefix(vec![resource.to_string()])
    }

    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Invalidation::Exact(exact) => exact == key,
            Invalidation::Prefix(prefix) => key.starts_with(prefix),
        }
    }
}

/// Status of one key as seen by screens
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    /// No key yet (query disabled)
    Disabled,
    /// Enabled but the fetch has not started
    Pending,
    Loading,
    Failed(Option<String>),
    Loaded(Value),
}

impl QueryStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryStatus::Pending | QueryStatus::Loading)
    }

    /// Number of entries of a loaded list, `None` for anything else
    pub fn loaded_len(&self) -> Option<usize> {
        match self {
            QueryStatus::Loaded(Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Entry {
    data: Option<Value>,
    error: Option<String>,
    failed: bool,
    in_flight: bool,
    stale: bool,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct QueryStore {
    entries: HashMap<QueryKey, Entry>,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a read of `key` should start a fetch
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(entry) => !entry.in_flight && (entry.stale || (entry.data.is_none() && !entry.failed)),
        }
    }

    /// Start a fetch for `key`; `None` when one is already in flight or the
    /// cached data is still fresh
    pub fn begin(&mut self, key: &QueryKey) -> Option<u64> {
        if !self.needs_fetch(key) {
            return None;
        }
        let entry = self.entries.entry(key.clone()).or_default();
        entry.seq += 1;
        entry.in_flight = true;
        Some(entry.seq)
    }

    /// Record a finished fetch; results of superseded fetches are dropped
    pub fn complete(&mut self, key: &QueryKey, seq: u64, result: Result<Value, String>) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.seq != seq {
            return false;
        }
        entry.in_flight = false;
        entry.stale = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
                entry.failed = false;
            }
            Err(message) => {
                entry.data = None;
                entry.error = Some(message).filter(|m| !m.is_empty());
                entry.failed = true;
            }
        }
        true
    }

    /// Mark matching entries stale; an in-flight fetch of such a key is
    /// superseded by the next read
    pub fn invalidate(&mut self, invalidation: &Invalidation) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if invalidation.matches(key) {
                entry.stale = true;
                entry.in_flight = false;
                entry.failed = false;
                entry.seq += 1;
                count += 1;
            }
        }
        count
    }

    /// A failed entry is retried when a screen reads it again
    pub fn retry_failed(&mut self, key: &QueryKey) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if entry.failed && !entry.in_flight => {
                entry.stale = true;
                true
            }
            _ => false,
        }
    }

    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        match self.entries.get(key) {
            None => QueryStatus::Pending,
            Some(entry) if entry.in_flight => QueryStatus::Loading,
            Some(entry) if entry.stale => QueryStatus::Pending,
            Some(entry) if entry.failed => QueryStatus::Failed(entry.error.clone()),
            Some(entry) => entry
                .data
                .clone()
                .map(QueryStatus::Loaded)
                .unwrap_or(QueryStatus::Pending),
        }
    }
}

/// Reactive handle on the shared store, provided once at the app root
#[derive(Clone, Copy)]
pub struct QueryClient {
    store: RwSignal<QueryStore>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            store: RwSignal::new(QueryStore::new()),
        }
    }

    pub fn invalidate(&self, invalidation: &Invalidation) {
        let count = self
            .store
            .try_update(|s| s.invalidate(invalidation))
            .unwrap_or_default();
        log::debug!("invalidated {} cached queries ({:?})", count, invalidation);
    }

    /// Forget everything, e.g. on logout
    pub fn clear(&self) {
        self.store.set(QueryStore::new());
    }

    fn fetch(&self, key: QueryKey, path: String) {
        let Some(seq) = self.store.try_update(|s| s.begin(&key)).flatten() else {
            return;
        };
        let store = self.store;
        spawn_local(async move {
            let result = request::get::<Value>(&path)
                .await
                .map(|r| r.payload)
                .map_err(|e| {
                    log::warn!("query {} failed: {}", key, e);
                    e.user_message()
                });
            store.update(|s| {
                s.complete(&key, seq, result);
            });
        });
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_client() -> QueryClient {
    expect_context::<QueryClient>()
}

/// One cacheable GET: the key it is stored under and the path it is read from
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub key: QueryKey,
    pub path: String,
}

impl Query {
    pub fn new(key: QueryKey, path: impl Into<String>) -> Self {
        Self {
            key,
            path: path.into(),
        }
    }
}

/// Status of the query's own key. Readers are only notified when that
/// status changes, not on every write to the store.
pub fn key_status(store: RwSignal<QueryStore>, query: Memo<Option<Query>>) -> Memo<QueryStatus> {
    Memo::new(move |_| match query.get() {
        None => QueryStatus::Disabled,
        Some(query) => store.with(|s| s.status(&query.key)),
    })
}

/// Typed view on one cached query
pub struct QueryHandle<T> {
    query: Memo<Option<Query>>,
    status: Memo<QueryStatus>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for QueryHandle<T> {}

impl<T: DeserializeOwned> QueryHandle<T> {
    pub fn status(&self) -> QueryStatus {
        self.status.get()
    }

    pub fn data(&self) -> Option<T> {
        decode(self.status.get())
    }

    /// Current data without subscribing to later changes
    pub fn data_untracked(&self) -> Option<T> {
        decode(self.status.get_untracked())
    }

    pub fn key(&self) -> Option<QueryKey> {
        self.query.get().map(|q| q.key)
    }
}

fn decode<T: DeserializeOwned>(status: QueryStatus) -> Option<T> {
    match status {
        QueryStatus::Loaded(value) => match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                log::error!("cached payload does not decode: {}", e);
                None
            }
        },
        _ => None,
    }
}

/// Subscribe to a query; `source` returning `None` keeps it disabled
/// (no fetch is issued)
pub fn use_query<T, F>(source: F) -> QueryHandle<T>
where
    T: DeserializeOwned,
    F: Fn() -> Option<Query> + Send + Sync + 'static,
{
    let client = use_query_client();
    let query = Memo::new(move |_| source());

    if let Some(query) = query.get_untracked() {
        client.store.update(|s| {
            s.retry_failed(&query.key);
        });
    }

    Effect::new(move |_| {
        let Some(query) = query.get() else {
            return;
        };
        if client.store.with(|s| s.needs_fetch(&query.key)) {
            client.fetch(query.key, query.path);
        }
    });

    QueryHandle {
        query,
        status: key_status(client.store, query),
        _marker: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(parts: &[&str]) -> QueryKey {
        let mut key = QueryKey::new(parts[0]);
        for p in &parts[1..] {
            key = key.with(*p);
        }
        key
    }

    #[test]
    fn test_same_key_is_fetched_once() {
        let mut store = QueryStore::new();
        let k = key(&["branches", "list"]);

        assert_eq!(store.begin(&k), Some(1));
        assert_eq!(store.begin(&k), None);
        assert_eq!(store.status(&k), QueryStatus::Loading);

        assert!(store.complete(&k, 1, Ok(json!([{"id": "b-1"}]))));
        assert_eq!(store.begin(&k), None);
        assert_eq!(store.status(&k).loaded_len(), Some(1));
    }

    #[test]
    fn test_latest_sequence_wins() {
        let mut store = QueryStore::new();
        let k = key(&["orders", "status=new"]);

        let first = store.begin(&k).unwrap();
        store.invalidate(&Invalidation::Exact(k.clone()));
        let second = store.begin(&k).unwrap();
        assert!(second > first);

        assert!(!store.complete(&k, first, Ok(json!(["stale"]))));
        assert_eq!(store.status(&k), QueryStatus::Loading);
        assert!(store.complete(&k, second, Ok(json!(["fresh"]))));
        assert_eq!(store.status(&k), QueryStatus::Loaded(json!(["fresh"])));
    }

    #[test]
    fn test_exact_and_prefix_invalidation() {
        let mut store = QueryStore::new();
        let pending = key(&["call-us", "pending"]);
        let closed = key(&["call-us", "closed"]);
        let branches = key(&["branches", "list"]);
        for k in [&pending, &closed, &branches] {
            let seq = store.begin(k).unwrap();
            assert!(store.complete(k, seq, Ok(json!([]))));
        }

        assert_eq!(store.invalidate(&Invalidation::resource("call-us")), 2);
        assert!(store.needs_fetch(&pending));
        assert!(store.needs_fetch(&closed));
        assert!(!store.needs_fetch(&branches));

        assert_eq!(store.invalidate(&Invalidation::Exact(branches.clone())), 1);
        assert!(store.needs_fetch(&branches));
        assert_eq!(store.status(&branches), QueryStatus::Pending);
    }

    #[test]
    fn test_failure_is_terminal_until_invalidated() {
        let mut store = QueryStore::new();
        let k = key(&["agents", "a-1"]);
        let seq = store.begin(&k).unwrap();
        store.complete(&k, seq, Err("Agent not found".into()));

        assert_eq!(
            store.status(&k),
            QueryStatus::Failed(Some("Agent not found".into()))
        );
        assert!(!store.needs_fetch(&k));

        assert!(store.retry_failed(&k));
        assert!(store.needs_fetch(&k));
    }

    #[test]
    fn test_prefix_does_not_match_longer_resource_name() {
        let inv = Invalidation::resource("call-us");
        assert!(inv.matches(&key(&["call-us"])));
        assert!(!inv.matches(&key(&["call-us-archive", "x"])));
        assert_eq!(key(&["orders", "status=new"]).to_string(), "orders/status=new");
    }

    #[test]
    fn test_unrelated_key_does_not_notify_readers() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        Owner::new().with(|| {
            let store = RwSignal::new(QueryStore::new());
            let branch = key(&["branches", "item", "b-1"]);
            let query = {
                let branch = branch.clone();
                Memo::new(move |_| Some(Query::new(branch.clone(), "/api/branches/b-1")))
            };
            let status = key_status(store, query);

            let runs = Arc::new(AtomicUsize::new(0));
            let reader = {
                let runs = runs.clone();
                Memo::new(move |_| {
                    runs.fetch_add(1, Ordering::SeqCst);
                    status.get()
                })
            };
            assert_eq!(reader.get(), QueryStatus::Pending);
            assert_eq!(runs.load(Ordering::SeqCst), 1);

            store.update(|s| {
                s.begin(&key(&["orders", "list"]));
            });
            assert_eq!(reader.get(), QueryStatus::Pending);
            assert_eq!(runs.load(Ordering::SeqCst), 1);

            store.update(|s| {
                s.begin(&branch);
            });
            assert_eq!(reader.get(), QueryStatus::Loading);
            assert_eq!(runs.load(Ordering::SeqCst), 2);
        });
    }
}

//! Short-lived in-process response cache.
//!
//! Entries are keyed by a caller-chosen string and fingerprinted with the
//! request options and the team scope they were fetched under, so the same
//! endpoint queried with different parameters or for a different team never
//! shares a slot. Every entry expires after its TTL.
//!
//! Expiry is enforced twice: a timer task removes the entry when it fires
//! (when a tokio runtime is available), and every lookup checks the entry's
//! deadline. Overwriting or clearing an entry aborts its timer, and a timer
//! only removes the entry generation it was scheduled for.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::Result;
use crate::query::QueryParams;
use crate::response::ApiResponse;

/// Lifetime of an entry when the caller does not choose one.
pub const DEFAULT_TTL: Duration = Duration::from_millis(1000);

static GLOBAL: Lazy<ResponseCache> = Lazy::new(ResponseCache::new);

/// Request options an entry was stored under.
///
/// Compared structurally: two option sets holding the same values are equal
/// regardless of the order their keys were inserted in.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet(Value);

impl OptionSet {
    /// No options.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Capture any serializable options bag.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize + ?Sized>(options: &T) -> Result<Self> {
        Ok(Self::from(serde_json::to_value(options)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for OptionSet {
    fn from(value: Value) -> Self {
        Self(canonicalize(value))
    }
}

impl From<&QueryParams> for OptionSet {
    fn from(query: &QueryParams) -> Self {
        let map = query
            .pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value)))
            .collect();
        Self(Value::Object(map))
    }
}

/// Rebuild every object with its keys in sorted order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, canonicalize(value)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Deadlines past this horizon are clamped to it.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

fn deadline(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl).unwrap_or(now + FAR_FUTURE)
}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    options: OptionSet,
    scope: Option<String>,
    expires_at: Instant,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// How a lookup compares its scope with the stored one.
#[derive(Clone, Copy)]
enum ScopeMatch<'a> {
    /// Any stored scope is accepted.
    Any,
    /// The stored scope must equal this one, including "no scope".
    Exactly(Option<&'a str>),
}

impl Entry {
    fn matches(&self, options: Option<&OptionSet>, scope: ScopeMatch<'_>) -> bool {
        if let Some(options) = options {
            if *options != self.options {
                return false;
            }
        }
        match scope {
            ScopeMatch::Any => true,
            ScopeMatch::Exactly(scope) => self.scope.as_deref() == scope,
        }
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct Registry {
    entries: Mutex<HashMap<String, Entry>>,
    generation: AtomicU64,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remove `key` if it still holds the entry scheduled as `generation`.
    fn expire(&self, key: &str, generation: u64) {
        let mut entries = self.lock();
        if entries.get(key).map(|e| e.generation) != Some(generation) {
            return;
        }
        if let Some(mut entry) = entries.remove(key) {
            // The running timer is this task; detach instead of aborting it.
            drop(entry.timer.take());
            tracing::debug!(key, "cache entry expired");
        }
    }
}

/// TTL-based memoization of responses under a composite fingerprint.
///
/// [`ResponseCache::global`] is the process-wide instance used by resource
/// modules; [`ResponseCache::new`] builds an independent one. Clones share
/// the same registry.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Arc<Registry>,
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.inner.lock().len())
            .finish()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// Create an empty, independent cache.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Registry {
                entries: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// The process-wide cache.
    pub fn global() -> &'static ResponseCache {
        &GLOBAL
    }

    /// Look up `key`.
    ///
    /// Returns `None` when there is no live entry, when `options` is given
    /// and differs from the stored options, when `scope` is given and
    /// differs from the stored scope, or when the stored value is not a `T`.
    pub fn get<T>(&self, key: &str, options: Option<&OptionSet>, scope: Option<&str>) -> Option<T>
    where
        T: Clone + 'static,
    {
        let scope = match scope {
            Some(scope) => ScopeMatch::Exactly(Some(scope)),
            None => ScopeMatch::Any,
        };
        self.lookup(key, options, scope)
    }

    fn lookup<T>(&self, key: &str, options: Option<&OptionSet>, scope: ScopeMatch<'_>) -> Option<T>
    where
        T: Clone + 'static,
    {
        let mut entries = self.inner.lock();

        let expired = entries.get(key)?.expires_at <= Instant::now();
        if expired {
            entries.remove(key);
            tracing::trace!(key, "cache miss (expired)");
            return None;
        }

        let entry = entries.get(key)?;
        if !entry.matches(options, scope) {
            tracing::trace!(key, "cache miss (fingerprint)");
            return None;
        }

        let value = entry.value.downcast_ref::<T>().cloned();
        tracing::trace!(key, hit = value.is_some(), "cache lookup");
        value
    }

    /// Store `value` under `key`, replacing any previous entry and its
    /// expiry timer. Returns `value`.
    pub fn set<T>(
        &self,
        key: impl Into<String>,
        value: T,
        options: OptionSet,
        scope: Option<&str>,
        ttl: Duration,
    ) -> T
    where
        T: Clone + Send + Sync + 'static,
    {
        let key = key.into();
        let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);
        let timer = self.schedule_expiry(key.clone(), generation, ttl);

        let entry = Entry {
            value: Arc::new(value.clone()),
            options,
            scope: scope.map(str::to_string),
            expires_at: deadline(ttl),
            generation,
            timer,
        };

        tracing::debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "cache set");
        let previous = self.inner.lock().insert(key, entry);
        drop(previous);
        value
    }

    /// Drop the entry under `key`, canceling its expiry. No-op if absent.
    pub fn clear(&self, key: &str) {
        if self.inner.lock().remove(key).is_some() {
            tracing::debug!(key, "cache entry cleared");
        }
    }

    /// Drop every entry.
    pub fn reset(&self) {
        self.inner.lock().clear();
    }

    /// Number of stored entries, including ones past their deadline that
    /// have not been collected yet.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-through lookup for API calls.
    ///
    /// Returns the cached document when the fingerprint matches; otherwise
    /// awaits `fetch` and caches the document if the call succeeded.
    /// Failures and transport errors are never cached.
    ///
    /// Unlike [`get`](Self::get), the scope must match exactly: an unscoped
    /// caller never receives a response cached for a team.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `fetch`.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &str,
        options: OptionSet,
        scope: Option<&str>,
        ttl: Duration,
        fetch: F,
    ) -> Result<ApiResponse<T>>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ApiResponse<T>>>,
    {
        if let Some(document) = self.lookup::<T>(key, Some(&options), ScopeMatch::Exactly(scope)) {
            tracing::debug!(key, "serving cached response");
            return Ok(ApiResponse::Success { document });
        }

        let response = fetch().await?;
        Ok(match response {
            ApiResponse::Success { document } => ApiResponse::Success {
                document: self.set(key, document, options, scope, ttl),
            },
            failure => failure,
        })
    }

    fn schedule_expiry(&self, key: String, generation: u64, ttl: Duration) -> Option<JoinHandle<()>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let registry: Weak<Registry> = Arc::downgrade(&self.inner);
        Some(handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(registry) = registry.upgrade() {
                registry.expire(&key, generation);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_before_set_misses() {
        let cache = ResponseCache::new();
        assert_eq!(cache.get::<i32>("x", None, None), None);
    }

    #[test]
    fn test_set_returns_value_and_hits() {
        let cache = ResponseCache::new();
        let options = OptionSet::from(json!({ "page": 1 }));

        let stored = cache.set("x", 7, options.clone(), Some("team-a"), DEFAULT_TTL);

        assert_eq!(stored, 7);
        assert_eq!(cache.get::<i32>("x", Some(&options), Some("team-a")), Some(7));
        assert_eq!(cache.get::<i32>("x", None, None), Some(7));
    }

    #[test]
    fn test_options_compare_structurally() {
        let cache = ResponseCache::new();
        let stored = OptionSet::from(json!({ "a": 1, "b": { "c": 2, "d": 3 } }));
        cache.set("x", "v".to_string(), stored, None, DEFAULT_TTL);

        let mut reordered = Map::new();
        reordered.insert("b".into(), json!({ "d": 3, "c": 2 }));
        reordered.insert("a".into(), json!(1));
        let reordered = OptionSet::from(Value::Object(reordered));
        assert_eq!(cache.get::<String>("x", Some(&reordered), None).as_deref(), Some("v"));

        let different = OptionSet::from(json!({ "a": 2, "b": { "c": 2, "d": 3 } }));
        assert_eq!(cache.get::<String>("x", Some(&different), None), None);
    }

    #[test]
    fn test_scope_mismatch_misses() {
        let cache = ResponseCache::new();
        cache.set("x", 1u8, OptionSet::empty(), Some("team-a"), DEFAULT_TTL);

        assert_eq!(cache.get::<u8>("x", None, Some("team-b")), None);
        assert_eq!(cache.get::<u8>("x", None, Some("team-a")), Some(1));
    }

    #[test]
    fn test_unscoped_entry_misses_for_scoped_lookup() {
        let cache = ResponseCache::new();
        cache.set("x", 1u8, OptionSet::empty(), None, DEFAULT_TTL);
        assert_eq!(cache.get::<u8>("x", None, Some("team-a")), None);
    }

    #[test]
    fn test_wrong_type_misses() {
        let cache = ResponseCache::new();
        cache.set("x", 1u8, OptionSet::empty(), None, DEFAULT_TTL);
        assert_eq!(cache.get::<String>("x", None, None), None);
    }

    #[test]
    fn test_clear_missing_key_is_noop() {
        let cache = ResponseCache::new();
        cache.clear("nothing-here");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_then_get_misses() {
        let cache = ResponseCache::new();
        let options = OptionSet::empty();
        cache.set("x", 1, options.clone(), None, DEFAULT_TTL);
        cache.clear("x");
        assert_eq!(cache.get::<i32>("x", Some(&options), None), None);
    }

    #[test]
    fn test_deadline_enforced_without_runtime() {
        let cache = ResponseCache::new();
        cache.set("x", 1, OptionSet::empty(), None, Duration::from_millis(50));
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get::<i32>("x", None, None), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unbounded_ttl_keeps_entry() {
        let cache = ResponseCache::new();
        assert_eq!(cache.set("x", 1u8, OptionSet::empty(), None, Duration::MAX), 1);
        assert_eq!(cache.get::<u8>("x", None, None), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_ttl_with_runtime() {
        let cache = ResponseCache::new();
        cache.set("x", 1u8, OptionSet::empty(), None, Duration::MAX);
        tokio::time::advance(Duration::from_secs(86400)).await;
        assert_eq!(cache.get::<u8>("x", None, None), Some(1));
        cache.clear("x");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_query_params_option_set() {
        let a = QueryParams::new().filter("state", "live").set("sort", "name");
        let b = QueryParams::new().set("sort", "name").filter("state", "live");
        assert_eq!(OptionSet::from(&a), OptionSet::from(&b));
        assert_ne!(OptionSet::from(&a), OptionSet::empty());
    }
}

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Keys of the client-side query cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Accumulated result pages for one search query
    Movies(String),
    Favorites,
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKey::Movies(query) => write!(f, "movies:{}", query),
            QueryKey::Favorites => write!(f, "favorites"),
        }
    }
}

/// Client-side cache of fetched query results, stored as JSON values.
///
/// Shared by the hooks; a mutation invalidates the keys it affects and the next
/// read fetches again. A fetch that started before an invalidation of its key
/// cannot store its result afterwards (see `generation` and `set_if_fresh`).
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<Entries>,
}

#[derive(Default)]
struct Entries {
    values: HashMap<QueryKey, Value>,
    /// Clock value of the last invalidation of each key
    invalidated_at: HashMap<QueryKey, u64>,
    cleared_at: u64,
    clock: u64,
}

impl Entries {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the cached value for `key`, if present and of the expected shape
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.read();
        let value = entries.values.get(key)?;

        match serde_json::from_value(value.clone()) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding cache entry with unexpected shape");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &QueryKey, value: &T) {
        if let Some(value) = to_value(key, value) {
            self.write().values.insert(key.clone(), value);
        }
    }

    /// Current cache clock; take it before starting a fetch and pass it to `set_if_fresh`
    pub fn generation(&self) -> u64 {
        self.read().clock
    }

    /// Stores `value` unless `key` was invalidated (or the cache cleared) after
    /// `since`. Returns whether the value was stored.
    pub fn set_if_fresh<T: Serialize>(&self, key: &QueryKey, value: &T, since: u64) -> bool {
        let Some(value) = to_value(key, value) else {
            return false;
        };

        let mut entries = self.write();
        let invalidated_at = entries.invalidated_at.get(key).copied().unwrap_or(0);
        if invalidated_at > since || entries.cleared_at > since {
            tracing::debug!(key = %key, "Dropping result fetched before invalidation");
            return false;
        }

        entries.values.insert(key.clone(), value);
        true
    }

    /// Drops the entry for `key`; returns whether one existed
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut entries = self.write();
        let now = entries.tick();
        entries.invalidated_at.insert(key.clone(), now);
        let removed = entries.values.remove(key).is_some();

        if removed {
            tracing::debug!(key = %key, "Invalidated query");
        }
        removed
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.read().values.contains_key(key)
    }

    pub fn clear(&self) {
        let mut entries = self.write();
        entries.cleared_at = entries.tick();
        entries.values.clear();
        entries.invalidated_at.clear();
    }
}

fn to_value<T: Serialize>(key: &QueryKey, value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Cache serialization error");
            None
        }
    }
}

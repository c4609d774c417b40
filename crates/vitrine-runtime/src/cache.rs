//! Caches for loaded extension sets and resolved page layouts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::{debug, trace};
use vitrine_framework::PageSections;

use crate::config::{CacheConfig, Profile};
use crate::snapshot::ExtensionSet;

/// Whether and how long loaded sets are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub enabled: bool,
    pub ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CachePolicy {
    /// Every load resolves again.
    pub const DISABLED: Self = Self {
        enabled: false,
        ttl: Duration::ZERO,
    };

    /// The development profile never caches.
    pub fn from_config(config: &CacheConfig, profile: &Profile) -> Self {
        Self {
            enabled: config.enabled && !profile.is_development(),
            ttl: config.ttl(),
        }
    }
}

type PendingLoad = Shared<BoxFuture<'static, Arc<ExtensionSet>>>;

struct CacheEntry {
    created: Instant,
    load: PendingLoad,
}

/// TTL cache of loaded sets keyed by the ordered identifier list.
///
/// An entry is inserted as soon as a load starts, so concurrent callers for
/// the same list await the same future instead of resolving twice.
#[derive(Clone)]
pub struct LoadCache {
    policy: CachePolicy,
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl std::fmt::Debug for LoadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCache")
            .field("policy", &self.policy)
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

impl LoadCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the cached set for `ids`, starting `load` on a miss.
    pub async fn get_or_load<F>(&self, ids: Vec<String>, load: F) -> Arc<ExtensionSet>
    where
        F: FnOnce(Vec<String>) -> BoxFuture<'static, Arc<ExtensionSet>>,
    {
        if !self.policy.enabled {
            trace!("Extension cache bypassed");
            return load(ids).await;
        }

        let key = ids.join(",");
        let pending = {
            let mut entries = self.entries.lock();
            match entries.get(&key) {
                Some(entry) if entry.created.elapsed() < self.policy.ttl => {
                    debug!(plugins = %key, "Extension cache hit");
                    entry.load.clone()
                }
                _ => {
                    debug!(plugins = %key, "Extension cache miss");
                    let pending = load(ids).shared();
                    entries.insert(
                        key,
                        CacheEntry {
                            created: Instant::now(),
                            load: pending.clone(),
                        },
                    );
                    pending
                }
            }
        };
        pending.await
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        debug!(count = entries.len(), "Extension cache invalidated");
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Memoized page layouts keyed by set generation and page.
///
/// Only layouts for the most recent generation are kept.
#[derive(Debug, Default)]
pub struct SectionCache {
    inner: Mutex<SectionCacheInner>,
}

#[derive(Debug, Default)]
struct SectionCacheInner {
    generation: Option<u64>,
    pages: HashMap<String, Arc<PageSections>>,
}

impl SectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the layout of `page` for `generation`, computing it once.
    pub fn get_or_insert_with<F>(&self, generation: u64, page: &str, resolve: F) -> Arc<PageSections>
    where
        F: FnOnce() -> PageSections,
    {
        let mut inner = self.inner.lock();
        if inner.generation != Some(generation) {
            inner.generation = Some(generation);
            inner.pages.clear();
        }
        if let Some(sections) = inner.pages.get(page) {
            return sections.clone();
        }
        trace!(page = %page, generation, "Resolving page sections");
        let sections = Arc::new(resolve());
        inner.pages.insert(page.to_string(), sections.clone());
        sections
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.generation = None;
        inner.pages.clear();
    }
}

//! Resolution of configured plugin identifiers into a loaded [`ExtensionSet`].
//!
//! The [`ExtensionLoader`] asks an [`ExtensionSource`] for each identifier and
//! isolates every failure: unknown identifiers, failing or panicking loaders,
//! malformed descriptors and disabled extensions are logged, recorded in the
//! set's [`LoadReport`] and skipped. Loading never fails as a whole.

use std::collections::HashMap;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use tracing::{Instrument, debug, info, info_span, warn};
use vitrine_core::{
    BoxError, DEFAULT_PRIORITY, EXTENSION_REGISTRY, Extension, ExtensionError, LoadFn,
    sort_by_priority,
};

use crate::cache::{CachePolicy, LoadCache};
use crate::snapshot::{ExtensionSet, LoadReport};

/// Where extension descriptors come from.
#[async_trait]
pub trait ExtensionSource: Send + Sync {
    /// Resolves `id`. `None` means no plugin with that identifier exists.
    async fn resolve(&self, id: &str) -> Option<Result<Extension, BoxError>>;
}

type BoxLoader = Arc<dyn Fn() -> BoxFuture<'static, Result<Extension, BoxError>> + Send + Sync>;

/// Registration table mapping plugin identifiers to loader functions.
///
/// Duplicate identifiers keep the first registration.
#[derive(Clone, Default)]
pub struct LoaderTable {
    loaders: HashMap<String, BoxLoader>,
    order: Vec<String>,
}

impl LoaderTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from every `#[register_extension]` in the binary.
    pub fn collect_all() -> Self {
        let mut table = Self::new();
        for entry in EXTENSION_REGISTRY.iter() {
            table.insert(entry.id, Arc::new(entry.load));
        }
        debug!(count = table.len(), "Collected registered extensions");
        table
    }

    /// Registers a loader function.
    pub fn with(mut self, id: impl Into<String>, load: LoadFn) -> Self {
        self.insert(id, Arc::new(load));
        self
    }

    /// Registers a loader closure.
    pub fn with_loader<F>(mut self, id: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<Extension, BoxError>> + Send + Sync + 'static,
    {
        self.insert(id, Arc::new(load));
        self
    }

    fn insert(&mut self, id: impl Into<String>, load: BoxLoader) {
        let id = id.into();
        if self.loaders.contains_key(&id) {
            warn!(plugin_id = %id, "Duplicate extension registration, keeping the first");
            return;
        }
        self.order.push(id.clone());
        self.loaders.insert(id, load);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.loaders.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl std::fmt::Debug for LoaderTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderTable")
            .field("ids", &self.order)
            .finish()
    }
}

#[async_trait]
impl ExtensionSource for LoaderTable {
    async fn resolve(&self, id: &str) -> Option<Result<Extension, BoxError>> {
        let load = self.loaders.get(id)?.clone();
        Some(load().await)
    }
}

/// Loads extension sets, caching them per identifier list.
#[derive(Clone)]
pub struct ExtensionLoader {
    source: Arc<dyn ExtensionSource>,
    configured: Arc<[String]>,
    cache: LoadCache,
}

impl std::fmt::Debug for ExtensionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionLoader")
            .field("configured", &self.configured)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl ExtensionLoader {
    /// Creates a loader over `source` with the default cache policy.
    pub fn new(source: impl ExtensionSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn ExtensionSource>) -> Self {
        Self {
            source,
            configured: Arc::from(Vec::new()),
            cache: LoadCache::new(CachePolicy::default()),
        }
    }

    /// Creates a loader over every registered extension.
    pub fn from_registry() -> Self {
        Self::new(LoaderTable::collect_all())
    }

    /// Identifiers loaded when [`load`](Self::load) gets `None`.
    pub fn with_plugins<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configured = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cache(mut self, policy: CachePolicy) -> Self {
        self.cache = LoadCache::new(policy);
        self
    }

    pub fn configured(&self) -> &[String] {
        &self.configured
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.cache.policy()
    }

    /// Loads `ids`, or the configured identifiers when `None`.
    ///
    /// Results are cached per ordered identifier list. Concurrent calls for
    /// the same list share one in-flight load.
    pub async fn load(&self, ids: Option<&[String]>) -> Arc<ExtensionSet> {
        let ids: Vec<String> = ids.unwrap_or(self.configured.as_ref()).to_vec();
        let source = self.source.clone();
        self.cache
            .get_or_load(ids, move |ids| {
                resolve_all(source, ids).map(Arc::new).boxed()
            })
            .await
    }

    /// Drops every cached set; the next load resolves again.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

/// Resolves `ids` in parallel and assembles the ordered set.
pub async fn resolve_all(source: Arc<dyn ExtensionSource>, ids: Vec<String>) -> ExtensionSet {
    let span = info_span!("load_extensions", count = ids.len());
    async move {
        let mut seen = HashSet::new();
        let unique: Vec<String> = ids
            .into_iter()
            .filter(|id| {
                let fresh = seen.insert(id.clone());
                if !fresh {
                    debug!(plugin_id = %id, "Plugin listed twice, loading once");
                }
                fresh
            })
            .collect();

        let results = join_all(unique.iter().map(|id| resolve_one(source.as_ref(), id))).await;

        let mut report = LoadReport::default();
        let mut extensions = Vec::with_capacity(results.len());
        for (id, result) in unique.iter().zip(results) {
            match result {
                Ok(ext) if !ext.is_enabled() => {
                    debug!(plugin_id = %id, "Extension disabled, skipping");
                    report.record_disabled(id);
                }
                Ok(ext) => extensions.push(Arc::new(ext)),
                Err(err) => {
                    warn!(plugin_id = %id, error = %err, "Skipping extension");
                    report.record_skipped(err);
                }
            }
        }

        sort_by_priority(&mut extensions, DEFAULT_PRIORITY);

        info!(
            loaded = extensions.len(),
            skipped = report.skipped().len(),
            disabled = report.disabled().len(),
            "Extensions loaded"
        );
        ExtensionSet::new(extensions, report)
    }
    .instrument(span)
    .await
}

async fn resolve_one(source: &dyn ExtensionSource, id: &str) -> Result<Extension, ExtensionError> {
    let resolved = AssertUnwindSafe(source.resolve(id)).catch_unwind().await;
    let ext = match resolved {
        Ok(Some(Ok(ext))) => ext,
        Ok(Some(Err(err))) => return Err(ExtensionError::load_failed(id, err)),
        Ok(None) => return Err(ExtensionError::unknown(id)),
        Err(_) => return Err(ExtensionError::load_failed(id, "loader panicked")),
    };

    ext.validate()
        .map_err(|err| ExtensionError::malformed(id, malformed_reason(err)))?;

    if ext.id() != id {
        debug!(plugin_id = %id, descriptor_id = %ext.id(), "Descriptor id differs from plugin id");
    }
    Ok(ext)
}

fn malformed_reason(err: ExtensionError) -> String {
    match err {
        ExtensionError::Malformed { reason, .. } => reason,
        other => other.to_string(),
    }
}

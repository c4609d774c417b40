use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use vitrine_core::{BoxError, Extension, ExtensionError};
use vitrine_macros::register_extension;
use vitrine_runtime::{CachePolicy, ExtensionLoader, ExtensionSource, LoaderTable};

#[register_extension("freight")]
async fn freight() -> Extension {
    Extension::new("freight").priority(150)
}

#[register_extension("loyalty")]
fn loyalty() -> Result<Extension, BoxError> {
    Ok(Extension::new("loyalty"))
}

#[register_extension("broken")]
fn broken() -> Result<Extension, BoxError> {
    Err("missing export".into())
}

/// Counts resolutions and yields once so concurrent loads overlap.
struct CountingSource {
    table: LoaderTable,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            table: LoaderTable::collect_all(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtensionSource for CountingSource {
    async fn resolve(&self, id: &str) -> Option<Result<Extension, BoxError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.table.resolve(id).await
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn registry_collects_annotated_loaders() {
    let table = LoaderTable::collect_all();
    assert!(table.contains("freight"));
    assert!(table.contains("loyalty"));
    assert!(table.contains("broken"));
}

#[tokio::test]
async fn unknown_identifier_is_skipped() {
    let loader = ExtensionLoader::from_registry();
    let set = loader.load(Some(&ids(&["unknown", "freight"]))).await;

    assert_eq!(set.ids(), ["freight"]);
    assert_eq!(set.report().skipped(), [ExtensionError::unknown("unknown")]);
}

#[tokio::test]
async fn failing_plugin_does_not_block_others() {
    let loader = ExtensionLoader::from_registry();
    let set = loader
        .load(Some(&ids(&["broken", "loyalty", "freight"])))
        .await;

    assert_eq!(set.ids(), ["freight", "loyalty"]);
    assert_eq!(set.report().skipped().len(), 1);
    assert_eq!(set.report().skipped()[0].plugin_id(), "broken");
}

#[tokio::test]
async fn configured_list_is_the_default() {
    let loader = ExtensionLoader::from_registry().with_plugins(["loyalty"]);
    let set = loader.load(None).await;
    assert_eq!(set.ids(), ["loyalty"]);
}

#[tokio::test]
async fn cached_set_is_reused_within_ttl() {
    let source = CountingSource::new();
    let loader = ExtensionLoader::from_arc(source.clone());
    let list = ids(&["freight", "loyalty"]);

    let first = loader.load(Some(&list)).await;
    let second = loader.load(Some(&list)).await;

    assert_eq!(source.calls(), 2);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_loads_share_one_resolution() {
    let source = CountingSource::new();
    let loader = ExtensionLoader::from_arc(source.clone());
    let list = ids(&["freight"]);

    let (a, b, c) = tokio::join!(
        loader.load(Some(&list)),
        loader.load(Some(&list)),
        loader.load(Some(&list)),
    );

    assert_eq!(source.calls(), 1);
    assert!(Arc::ptr_eq(&a, &b) && Arc::ptr_eq(&b, &c));
}

#[tokio::test]
async fn expired_entry_is_reloaded() {
    let source = CountingSource::new();
    let loader = ExtensionLoader::from_arc(source.clone()).with_cache(CachePolicy {
        enabled: true,
        ttl: Duration::from_millis(30),
    });
    let list = ids(&["freight"]);

    let first = loader.load(Some(&list)).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    let second = loader.load(Some(&list)).await;

    assert_eq!(source.calls(), 2);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_ne!(first.generation(), second.generation());
}

#[tokio::test]
async fn disabled_cache_resolves_every_time() {
    let source = CountingSource::new();
    let loader = ExtensionLoader::from_arc(source.clone()).with_cache(CachePolicy::DISABLED);
    let list = ids(&["freight"]);

    loader.load(Some(&list)).await;
    loader.load(Some(&list)).await;

    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn invalidate_forces_reload() {
    let source = CountingSource::new();
    let loader = ExtensionLoader::from_arc(source.clone());
    let list = ids(&["loyalty"]);

    loader.load(Some(&list)).await;
    loader.invalidate();
    loader.load(Some(&list)).await;

    assert_eq!(source.calls(), 2);
}

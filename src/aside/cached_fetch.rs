//! Cache-aside wrapper around an async fetch function.

use std::future::Future;
use std::hash::Hash;

use crate::aside::{CacheObserver, TracingObserver};
use crate::cache::SharedCache;

/// Checks the cache before calling `fetch`, and stores fetched values back.
///
/// Concurrent misses on the same key each run `fetch`; the last write wins.
pub struct CachedFetch<K, V, F, O = TracingObserver> {
    cache: SharedCache<K, V>,
    fetch: F,
    observer: O,
}

impl<K, V, F> CachedFetch<K, V, F, TracingObserver> {
    /// Wraps `fetch` with hit/miss logging through `tracing`.
    pub fn new(cache: SharedCache<K, V>, fetch: F) -> Self {
        Self::with_observer(cache, fetch, TracingObserver)
    }
}

impl<K, V, F, O> CachedFetch<K, V, F, O> {
    pub fn with_observer(cache: SharedCache<K, V>, fetch: F, observer: O) -> Self {
        Self {
            cache,
            fetch,
            observer,
        }
    }

    /// Handle to the underlying cache.
    pub fn cache(&self) -> &SharedCache<K, V> {
        &self.cache
    }
}

impl<K, V, F, O> CachedFetch<K, V, F, O>
where
    K: Hash + Eq + Clone,
    V: Clone,
    O: CacheObserver<K>,
{
    /// Returns the cached value for `key`, fetching and caching it on a miss.
    ///
    /// The cache lock is released before `fetch` is awaited.
    pub async fn call<Fut>(&self, key: K) -> V
    where
        F: Fn(K) -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.cache.get(&key) {
            self.observer.on_hit(&key);
            return value;
        }

        self.observer.on_miss(&key);
        let value = (self.fetch)(key.clone()).await;
        self.cache.set(key, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl CacheObserver<String> for Arc<RecordingObserver> {
        fn on_hit(&self, key: &String) {
            self.events.lock().push(format!("hit:{}", key));
        }

        fn on_miss(&self, key: &String) {
            self.events.lock().push(format!("miss:{}", key));
        }
    }

    fn shared() -> SharedCache<String, String> {
        SharedCache::new(10, Duration::from_secs(60)).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_once_per_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cached = CachedFetch::new(shared(), move |query: String| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                format!("result for {}", query)
            }
        });

        assert_eq!(cached.call("test".to_string()).await, "result for test");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(cached.call("test".to_string()).await, "result for test");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(cached.call("other".to_string()).await, "result for other");
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let stats = cached.cache().stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.size, 2);
    }

    #[tokio::test]
    async fn test_observer_sees_hits_and_misses() {
        let observer = Arc::new(RecordingObserver::default());
        let cached = CachedFetch::with_observer(
            shared(),
            |query: String| async move { query.to_uppercase() },
            Arc::clone(&observer),
        );

        cached.call("a".to_string()).await;
        cached.call("a".to_string()).await;
        cached.call("b".to_string()).await;

        assert_eq!(
            *observer.events.lock(),
            vec!["miss:a".to_string(), "hit:a".to_string(), "miss:b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_refetches_after_delete() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cached = CachedFetch::with_observer(
            shared(),
            move |query: String| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move { format!("{}#{}", query, n) }
            },
            crate::aside::NoopObserver,
        );

        assert_eq!(cached.call("q".to_string()).await, "q#0");
        cached.cache().delete("q");
        assert_eq!(cached.call("q".to_string()).await, "q#1");
    }
}

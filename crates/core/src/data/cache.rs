use crate::data::DataSource;
use crate::domain::dataset::Dataset;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub source: &'static str,
    pub dataset: Arc<Dataset>,
    pub loaded_at: DateTime<Utc>,
}

/// Memoizes one [`DataSource`]. The first `get` loads; later calls hand out the
/// same `Arc` until `refresh` replaces it.
pub struct DatasetCache {
    source: Arc<dyn DataSource>,
    entry: RwLock<Option<LoadedDataset>>,
}

impl fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetCache")
            .field("source", &self.source.name())
            .finish_non_exhaustive()
    }
}

impl DatasetCache {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            entry: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> anyhow::Result<LoadedDataset> {
        if let Some(entry) = self.entry.read().await.as_ref() {
            return Ok(entry.clone());
        }

        let mut guard = self.entry.write().await;
        // Another request may have loaded while we waited for the write lock.
        if let Some(entry) = guard.as_ref() {
            return Ok(entry.clone());
        }

        let loaded = self.load().await?;
        *guard = Some(loaded.clone());
        Ok(loaded)
    }

    /// Reloads from the source. On failure the previous entry is kept.
    pub async fn refresh(&self) -> anyhow::Result<LoadedDataset> {
        let loaded = self.load().await?;
        *self.entry.write().await = Some(loaded.clone());
        tracing::info!(source = loaded.source, loaded_at = %loaded.loaded_at, "dataset refreshed");
        Ok(loaded)
    }

    async fn load(&self) -> anyhow::Result<LoadedDataset> {
        let source = self.source.name();
        let dataset = self
            .source
            .load()
            .await
            .with_context(|| format!("failed to load dataset from {source}"))?;
        dataset
            .validate()
            .with_context(|| format!("dataset from {source} failed validation"))?;

        tracing::info!(
            source,
            portfolios = dataset.portfolios.len(),
            sectors = dataset.sectors.len(),
            documents = dataset.documents.len(),
            alerts = dataset.alerts.len(),
            "dataset loaded"
        );

        Ok(LoadedDataset {
            source,
            dataset: Arc::new(dataset),
            loaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticDataSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        loads: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl DataSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn load(&self) -> anyhow::Result<Dataset> {
            let n = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
            let mut ds = Dataset::sample();
            ds.recommendations.push(format!("load #{n}"));
            Ok(ds)
        }
    }

    struct BrokenSource;

    #[async_trait::async_trait]
    impl DataSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn load(&self) -> anyhow::Result<Dataset> {
            let mut ds = Dataset::sample();
            ds.portfolios[0].risk_score = 42.0;
            Ok(ds)
        }
    }

    /// Valid on the first load, invalid afterwards.
    #[derive(Default)]
    struct DegradingSource {
        loads: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl DataSource for DegradingSource {
        fn name(&self) -> &'static str {
            "degrading"
        }

        async fn load(&self) -> anyhow::Result<Dataset> {
            let mut ds = Dataset::sample();
            if self.loads.fetch_add(1, Ordering::SeqCst) > 0 {
                ds.sectors[0].name.clear();
            }
            Ok(ds)
        }
    }

    #[tokio::test]
    async fn get_memoizes_the_first_load() {
        let source = Arc::new(CountingSource::default());
        let cache = DatasetCache::new(source.clone());

        let a = cache.get().await.unwrap();
        let b = cache.get().await.unwrap();

        assert!(Arc::ptr_eq(&a.dataset, &b.dataset));
        assert_eq!(a.loaded_at, b.loaded_at);
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_reloads_and_replaces_entry() {
        let source = Arc::new(CountingSource::default());
        let cache = DatasetCache::new(source.clone());

        let first = cache.get().await.unwrap();
        let refreshed = cache.refresh().await.unwrap();
        let after = cache.get().await.unwrap();

        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
        assert!(Arc::ptr_eq(&refreshed.dataset, &after.dataset));
        assert!(refreshed.loaded_at >= first.loaded_at);
        assert_eq!(
            after.dataset.recommendations.last().map(String::as_str),
            Some("load #2")
        );
    }

    #[tokio::test]
    async fn static_refresh_keeps_rows_identical() {
        let cache = DatasetCache::new(Arc::new(StaticDataSource));
        let first = cache.get().await.unwrap();
        let second = cache.refresh().await.unwrap();
        assert_eq!(*first.dataset, *second.dataset);
        assert_eq!(second.source, "demo_dataset");
    }

    #[tokio::test]
    async fn invalid_dataset_is_rejected() {
        let cache = DatasetCache::new(Arc::new(BrokenSource));
        let err = cache.get().await.unwrap_err();
        assert!(format!("{err:#}").contains("failed validation"));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_entry() {
        let source = Arc::new(DegradingSource::default());
        let cache = DatasetCache::new(source.clone());

        let before = cache.get().await.unwrap();
        let err = cache.refresh().await.unwrap_err();
        assert!(format!("{err:#}").contains("failed validation"));

        let after = cache.get().await.unwrap();
        assert!(Arc::ptr_eq(&before.dataset, &after.dataset));
        assert_eq!(before.loaded_at, after.loaded_at);
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }
}

pub mod cache;
mod sample;

use crate::domain::dataset::Dataset;

/// Where a dashboard's dataset comes from. The demo only ships the static
/// source; a live backend plugs in here and gets memoization and refresh from
/// [`cache::DatasetCache`] for free.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load(&self) -> anyhow::Result<Dataset>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataSource;

#[async_trait::async_trait]
impl DataSource for StaticDataSource {
    fn name(&self) -> &'static str {
        "demo_dataset"
    }

    async fn load(&self) -> anyhow::Result<Dataset> {
        Ok(Dataset::sample())
    }
}

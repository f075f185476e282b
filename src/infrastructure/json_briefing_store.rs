// JSON file briefing store
use crate::application::briefing_store::BriefingStore;
use crate::domain::briefing::BriefingRecord;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Keeps only the latest briefing; each save overwrites the file.
pub struct JsonBriefingStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonBriefingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl BriefingStore for JsonBriefingStore {
    async fn save(&self, record: &BriefingRecord) -> anyhow::Result<()> {
        let body = serde_json::to_vec_pretty(record).context("Failed to serialize briefing")?;

        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("Failed to write briefing to {}", self.path.display()))?;

        tracing::info!("Saved briefing for {} to {}", record.zone, self.path.display());
        Ok(())
    }
}

// Port for persisting the latest briefing
use crate::domain::briefing::BriefingRecord;
use async_trait::async_trait;

#[async_trait]
pub trait BriefingStore: Send + Sync {
    /// Replace any previously saved briefing
    async fn save(&self, record: &BriefingRecord) -> anyhow::Result<()>;
}

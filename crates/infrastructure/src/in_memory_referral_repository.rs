use async_trait::async_trait;
use tokio::sync::RwLock;

use gatewise_application::ReferralRepository;
use gatewise_core::{AppResult, UserId};
use gatewise_domain::ReferralRecord;

/// In-memory adapter for referral reads, for tests and local development.
#[derive(Default)]
pub struct InMemoryReferralRepository {
    records: RwLock<Vec<ReferralRecord>>,
}

impl InMemoryReferralRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record to the stored collection.
    pub async fn append_record(&self, record: ReferralRecord) {
        self.records.write().await.push(record);
    }
}

#[async_trait]
impl ReferralRepository for InMemoryReferralRepository {
    async fn list_for_referrer(&self, referrer: UserId) -> AppResult<Vec<ReferralRecord>> {
        let records = self.records.read().await;
        let mut listed: Vec<ReferralRecord> = records
            .iter()
            .filter(|record| record.referrer_user_id == referrer)
            .cloned()
            .collect();

        listed.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });

        Ok(listed)
    }
}

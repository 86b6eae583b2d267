use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use gatewise_application::ReferralRepository;
use gatewise_core::{AppResult, UserId};
use gatewise_domain::{ReferralRecord, RewardStatus};

use crate::RestCollectionClient;

const REFERRALS_COLLECTION: &str = "referrals";

/// Remote-store-backed repository for referral rows.
#[derive(Clone)]
pub struct RestReferralRepository {
    client: RestCollectionClient,
}

impl RestReferralRepository {
    /// Creates a repository over the provided store client.
    #[must_use]
    pub fn new(client: RestCollectionClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ReferralRow {
    id: Uuid,
    referrer_user_id: Uuid,
    referred_user_id: Option<Uuid>,
    reward_status: String,
    created_at: DateTime<Utc>,
}

impl From<ReferralRow> for ReferralRecord {
    fn from(row: ReferralRow) -> Self {
        Self {
            id: row.id,
            referrer_user_id: UserId::from_uuid(row.referrer_user_id),
            referred_user_id: row.referred_user_id.map(UserId::from_uuid),
            reward_status: RewardStatus::parse(row.reward_status.as_str()),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ReferralRepository for RestReferralRepository {
    async fn list_for_referrer(&self, referrer: UserId) -> AppResult<Vec<ReferralRecord>> {
        let rows: Vec<ReferralRow> = self
            .client
            .collection(REFERRALS_COLLECTION)
            .eq("referrer_user_id", referrer.to_string().as_str())
            .order_desc("created_at")
            .fetch()
            .await?;

        Ok(rows.into_iter().map(ReferralRecord::from).collect())
    }
}

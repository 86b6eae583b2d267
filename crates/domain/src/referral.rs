use chrono::{DateTime, Utc};
use gatewise_core::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ReferralCode;

/// Reward payout progress for one referral.
///
/// The store may hold status values this layer does not enumerate; those are
/// carried verbatim in `Other` rather than failing the read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RewardStatus {
    /// Referral registered, reward not yet granted.
    Pending,
    /// Reward granted and available to the referrer.
    Earned,
    /// Reward granted and spent by the referrer.
    Redeemed,
    /// Status value not known to this layer.
    Other(String),
}

impl RewardStatus {
    /// Parses a stored status value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "PENDING" => Self::Pending,
            "EARNED" => Self::Earned,
            "REDEEMED" => Self::Redeemed,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Earned => "EARNED",
            Self::Redeemed => "REDEEMED",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Whether the referral converted into a granted reward.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Earned | Self::Redeemed)
    }
}

/// One row from the hosted `referrals` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralRecord {
    /// Stable referral identifier.
    pub id: Uuid,
    /// User whose code was used.
    pub referrer_user_id: UserId,
    /// Referred user, once they have an account.
    pub referred_user_id: Option<UserId>,
    /// Reward payout progress.
    pub reward_status: RewardStatus,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Aggregate view over one user's referrals.
///
/// Never persisted; recomputed from the current record set on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralStats {
    /// Referral code the aggregate belongs to.
    pub referral_code: ReferralCode,
    /// All referrals registered against the code.
    pub total_referred: usize,
    /// Referrals whose reward was earned or redeemed.
    pub successful_referrals: usize,
    /// Referrals still awaiting a reward grant.
    pub pending_rewards: usize,
    /// Referrals whose reward is earned and unspent.
    pub earned_rewards: usize,
}

impl ReferralStats {
    /// Computes the aggregate counters over a user's referral records.
    #[must_use]
    pub fn from_records(referral_code: ReferralCode, records: &[ReferralRecord]) -> Self {
        let successful_referrals = records
            .iter()
            .filter(|record| record.reward_status.is_successful())
            .count();
        let pending_rewards = records
            .iter()
            .filter(|record| record.reward_status == RewardStatus::Pending)
            .count();
        let earned_rewards = records
            .iter()
            .filter(|record| record.reward_status == RewardStatus::Earned)
            .count();

        Self {
            referral_code,
            total_referred: records.len(),
            successful_referrals,
            pending_rewards,
            earned_rewards,
        }
    }
}

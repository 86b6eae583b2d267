use std::sync::Arc;

use async_trait::async_trait;

use gatewise_core::{AppError, AppResult, UserId};
use gatewise_domain::{ReferralCode, ReferralRecord, ReferralStats};

use crate::AuthSnapshot;

/// Cache key for one user's referral stats.
///
/// Carries the referral code next to the user id so a changed code (or a
/// switched account) never serves a stale aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferralStatsKey {
    /// Owner of the aggregate.
    pub user_id: UserId,
    /// Referral code the aggregate was computed for.
    pub referral_code: ReferralCode,
}

/// Repository port for reading the hosted `referrals` collection.
///
/// Implementations return every row whose `referrer_user_id` matches,
/// ordered by `created_at` descending, with no row cap.
#[async_trait]
pub trait ReferralRepository: Send + Sync {
    /// Lists all referrals registered against one referrer.
    async fn list_for_referrer(&self, referrer: UserId) -> AppResult<Vec<ReferralRecord>>;
}

/// Cache port for referral listings and derived stats.
#[async_trait]
pub trait ReferralCache: Send + Sync {
    /// Returns a cached listing for the referrer, if a fresh one exists.
    async fn get_referrals(&self, referrer: UserId) -> AppResult<Option<Vec<ReferralRecord>>>;

    /// Stores a listing under the referrer's id.
    async fn set_referrals(
        &self,
        referrer: UserId,
        records: Vec<ReferralRecord>,
        ttl_seconds: u32,
    ) -> AppResult<()>;

    /// Returns cached stats for the key, if fresh ones exist.
    async fn get_stats(&self, key: &ReferralStatsKey) -> AppResult<Option<ReferralStats>>;

    /// Stores stats under the composite key.
    async fn set_stats(
        &self,
        key: ReferralStatsKey,
        stats: ReferralStats,
        ttl_seconds: u32,
    ) -> AppResult<()>;
}

/// Application service for referral reads and the derived stats aggregate.
#[derive(Clone)]
pub struct ReferralService {
    repository: Arc<dyn ReferralRepository>,
    cache: Arc<dyn ReferralCache>,
    cache_ttl_seconds: u32,
}

impl ReferralService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ReferralRepository>,
        cache: Arc<dyn ReferralCache>,
        cache_ttl_seconds: u32,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Returns the signed-in user's referrals, newest first.
    ///
    /// Fails without touching the repository when no user is signed in.
    pub async fn list_referrals(
        &self,
        snapshot: &AuthSnapshot,
    ) -> AppResult<Vec<ReferralRecord>> {
        let Some(user) = snapshot.user() else {
            return Err(AppError::Unauthorized(
                "listing referrals requires a signed-in user".to_owned(),
            ));
        };
        let referrer = user.id();

        if let Some(records) = self.cache.get_referrals(referrer).await? {
            return Ok(records);
        }

        let records = self.repository.list_for_referrer(referrer).await?;

        self.cache
            .set_referrals(referrer, records.clone(), self.cache_ttl_seconds)
            .await?;

        Ok(records)
    }

    /// Computes the signed-in user's referral stats.
    ///
    /// Requires the user identity, the resolved profile, and a settled
    /// session all at once; each check runs before any query. Remote
    /// failures surface unchanged and never populate partial stats.
    pub async fn referral_stats(&self, snapshot: &AuthSnapshot) -> AppResult<ReferralStats> {
        let Some(user) = snapshot.user() else {
            return Err(AppError::Unauthorized(
                "referral stats require a signed-in user".to_owned(),
            ));
        };
        let Some(profile) = snapshot.profile() else {
            return Err(AppError::Unauthorized(
                "referral stats require a resolved profile".to_owned(),
            ));
        };
        if snapshot.is_loading() {
            return Err(AppError::Unauthorized(
                "referral stats require a settled session".to_owned(),
            ));
        }

        let key = ReferralStatsKey {
            user_id: user.id(),
            referral_code: profile.referral_code().clone(),
        };

        if let Some(stats) = self.cache.get_stats(&key).await? {
            return Ok(stats);
        }

        let records = self.repository.list_for_referrer(user.id()).await?;
        let stats = ReferralStats::from_records(profile.referral_code().clone(), &records);

        self.cache
            .set_stats(key, stats.clone(), self.cache_ttl_seconds)
            .await?;

        Ok(stats)
    }
}

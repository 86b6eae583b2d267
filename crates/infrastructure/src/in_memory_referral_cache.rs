use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use gatewise_application::{ReferralCache, ReferralStatsKey};
use gatewise_core::{AppResult, UserId};
use gatewise_domain::{ReferralRecord, ReferralStats};

#[derive(Debug, Clone)]
struct ListingCacheEntry {
    records: Vec<ReferralRecord>,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
struct StatsCacheEntry {
    stats: ReferralStats,
    expires_at: Instant,
}

fn expiry_for(ttl_seconds: u32) -> Instant {
    let now = Instant::now();
    now.checked_add(Duration::from_secs(u64::from(ttl_seconds)))
        .unwrap_or(now)
}

/// In-memory cache adapter for referral listings and derived stats.
///
/// Listings are keyed by referrer id; stats by referrer id plus referral
/// code, so a switched account or changed code misses cleanly.
#[derive(Default)]
pub struct InMemoryReferralCache {
    listings: RwLock<HashMap<UserId, ListingCacheEntry>>,
    stats: RwLock<HashMap<ReferralStatsKey, StatsCacheEntry>>,
}

impl InMemoryReferralCache {
    /// Creates an empty in-memory referral cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReferralCache for InMemoryReferralCache {
    async fn get_referrals(&self, referrer: UserId) -> AppResult<Option<Vec<ReferralRecord>>> {
        {
            let listings = self.listings.read().await;
            if let Some(entry) = listings.get(&referrer) {
                if entry.expires_at > Instant::now() {
                    return Ok(Some(entry.records.clone()));
                }
            } else {
                return Ok(None);
            }
        }

        let mut listings = self.listings.write().await;
        if listings
            .get(&referrer)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            listings.remove(&referrer);
        }

        Ok(None)
    }

    async fn set_referrals(
        &self,
        referrer: UserId,
        records: Vec<ReferralRecord>,
        ttl_seconds: u32,
    ) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        self.listings.write().await.insert(
            referrer,
            ListingCacheEntry {
                records,
                expires_at: expiry_for(ttl_seconds),
            },
        );

        Ok(())
    }

    async fn get_stats(&self, key: &ReferralStatsKey) -> AppResult<Option<ReferralStats>> {
        {
            let stats = self.stats.read().await;
            if let Some(entry) = stats.get(key) {
                if entry.expires_at > Instant::now() {
                    return Ok(Some(entry.stats.clone()));
                }
            } else {
                return Ok(None);
            }
        }

        let mut stats = self.stats.write().await;
        if stats
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            stats.remove(key);
        }

        Ok(None)
    }

    async fn set_stats(
        &self,
        key: ReferralStatsKey,
        stats: ReferralStats,
        ttl_seconds: u32,
    ) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        self.stats.write().await.insert(
            key,
            StatsCacheEntry {
                stats,
                expires_at: expiry_for(ttl_seconds),
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gatewise_application::{ReferralCache, ReferralStatsKey};
    use gatewise_core::UserId;
    use gatewise_domain::{ReferralCode, ReferralStats};

    use super::InMemoryReferralCache;

    fn stats_for(code: &str) -> ReferralStats {
        let Ok(referral_code) = ReferralCode::new(code) else {
            panic!("test referral code must be valid");
        };
        ReferralStats::from_records(referral_code, &[])
    }

    fn key_for(user_id: UserId, code: &str) -> ReferralStatsKey {
        let Ok(referral_code) = ReferralCode::new(code) else {
            panic!("test referral code must be valid");
        };
        ReferralStatsKey {
            user_id,
            referral_code,
        }
    }

    #[tokio::test]
    async fn stats_miss_when_the_referral_code_differs() {
        let cache = InMemoryReferralCache::new();
        let user_id = UserId::new();

        let stored = cache
            .set_stats(key_for(user_id, "FRIEND-42"), stats_for("FRIEND-42"), 60)
            .await;
        assert!(stored.is_ok());

        let hit = cache.get_stats(&key_for(user_id, "FRIEND-42")).await;
        assert!(hit.is_ok());
        assert!(hit.unwrap_or_default().is_some());

        let rotated_code = cache.get_stats(&key_for(user_id, "FRIEND-43")).await;
        assert!(rotated_code.is_ok());
        assert!(rotated_code.unwrap_or_default().is_none());

        let other_user = cache.get_stats(&key_for(UserId::new(), "FRIEND-42")).await;
        assert!(other_user.is_ok());
        assert!(other_user.unwrap_or_default().is_none());
    }

    #[tokio::test]
    async fn listings_are_keyed_by_referrer() {
        let cache = InMemoryReferralCache::new();
        let referrer = UserId::new();

        assert!(cache.set_referrals(referrer, Vec::new(), 60).await.is_ok());

        let hit = cache.get_referrals(referrer).await;
        assert!(hit.is_ok());
        assert!(hit.unwrap_or_default().is_some());

        let miss = cache.get_referrals(UserId::new()).await;
        assert!(miss.is_ok());
        assert!(miss.unwrap_or_default().is_none());
    }

    #[tokio::test]
    async fn zero_ttl_disables_storage() {
        let cache = InMemoryReferralCache::new();
        let referrer = UserId::new();

        assert!(cache.set_referrals(referrer, Vec::new(), 0).await.is_ok());

        let cached = cache.get_referrals(referrer).await;
        assert!(cached.is_ok());
        assert!(cached.unwrap_or_default().is_none());
    }
}

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use gatewise_application::{AuditLogCache, AuditLogFilter};
use gatewise_core::AppResult;
use gatewise_domain::AuditLogRecord;

#[derive(Debug, Clone)]
struct AuditLogCacheEntry {
    entries: Vec<AuditLogRecord>,
    expires_at: Instant,
}

/// In-memory cache adapter for audit log listings, keyed by filter.
#[derive(Default)]
pub struct InMemoryAuditLogCache {
    entries: RwLock<HashMap<AuditLogFilter, AuditLogCacheEntry>>,
}

impl InMemoryAuditLogCache {
    /// Creates an empty in-memory audit log cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogCache for InMemoryAuditLogCache {
    async fn get_entries(
        &self,
        filter: &AuditLogFilter,
    ) -> AppResult<Option<Vec<AuditLogRecord>>> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(filter) {
                if entry.expires_at > Instant::now() {
                    return Ok(Some(entry.entries.clone()));
                }
            } else {
                return Ok(None);
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(filter)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(filter);
        }

        Ok(None)
    }

    async fn set_entries(
        &self,
        filter: AuditLogFilter,
        listing: Vec<AuditLogRecord>,
        ttl_seconds: u32,
    ) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(u64::from(ttl_seconds)))
            .unwrap_or(now);

        self.entries.write().await.insert(
            filter,
            AuditLogCacheEntry {
                entries: listing,
                expires_at,
            },
        );

        Ok(())
    }
}

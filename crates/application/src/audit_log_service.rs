use std::sync::Arc;

use async_trait::async_trait;

use gatewise_core::AppResult;
use gatewise_domain::AuditLogRecord;

/// Row cap applied when a filter does not set its own limit.
pub const DEFAULT_AUDIT_LOG_LIMIT: usize = 100;

/// Query parameters for audit log listing.
///
/// The full filter is the cache key: distinct filter combinations are cached
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AuditLogFilter {
    /// Optional equality filter on the action category.
    pub action: Option<String>,
    /// Optional equality filter on the entity type.
    pub entity_type: Option<String>,
    /// Maximum rows returned; defaults to [`DEFAULT_AUDIT_LOG_LIMIT`].
    pub limit: Option<usize>,
}

impl AuditLogFilter {
    /// Returns the row cap this filter resolves to.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_AUDIT_LOG_LIMIT)
    }
}

/// Repository port for reading the hosted `audit_logs` collection.
///
/// Implementations return entries matching the filter's equality predicates,
/// ordered by `created_at` descending and capped at
/// [`AuditLogFilter::effective_limit`].
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Lists the most recent entries matching the filter.
    async fn list_entries(&self, filter: &AuditLogFilter) -> AppResult<Vec<AuditLogRecord>>;
}

/// Cache port for audit log listings, keyed by the full filter.
#[async_trait]
pub trait AuditLogCache: Send + Sync {
    /// Returns a cached listing for the filter, if a fresh one exists.
    async fn get_entries(
        &self,
        filter: &AuditLogFilter,
    ) -> AppResult<Option<Vec<AuditLogRecord>>>;

    /// Stores a listing under the filter key.
    async fn set_entries(
        &self,
        filter: AuditLogFilter,
        entries: Vec<AuditLogRecord>,
        ttl_seconds: u32,
    ) -> AppResult<()>;
}

/// Application service for audit log reads.
#[derive(Clone)]
pub struct AuditLogService {
    repository: Arc<dyn AuditLogRepository>,
    cache: Arc<dyn AuditLogCache>,
    cache_ttl_seconds: u32,
}

impl AuditLogService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repository: Arc<dyn AuditLogRepository>,
        cache: Arc<dyn AuditLogCache>,
        cache_ttl_seconds: u32,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Returns audit entries for the filter, newest first.
    ///
    /// Remote failures surface unchanged and leave the cache untouched.
    pub async fn list_audit_logs(
        &self,
        filter: AuditLogFilter,
    ) -> AppResult<Vec<AuditLogRecord>> {
        if let Some(entries) = self.cache.get_entries(&filter).await? {
            return Ok(entries);
        }

        let entries = self.repository.list_entries(&filter).await?;

        self.cache
            .set_entries(filter, entries.clone(), self.cache_ttl_seconds)
            .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use gatewise_core::{AppError, AppResult};
    use gatewise_domain::AuditLogRecord;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use super::{
        AuditLogCache, AuditLogFilter, AuditLogRepository, AuditLogService,
        DEFAULT_AUDIT_LOG_LIMIT,
    };

    fn entry(action: &str) -> AuditLogRecord {
        AuditLogRecord {
            id: Uuid::new_v4(),
            actor_user_id: None,
            action: action.to_owned(),
            entity_type: "user".to_owned(),
            entity_id: None,
            detail: None,
            created_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct FakeAuditLogRepository {
        entries: Vec<AuditLogRecord>,
        calls: Mutex<usize>,
        fail: bool,
    }

    #[async_trait]
    impl AuditLogRepository for FakeAuditLogRepository {
        async fn list_entries(
            &self,
            _filter: &AuditLogFilter,
        ) -> AppResult<Vec<AuditLogRecord>> {
            *self.calls.lock().await += 1;
            if self.fail {
                return Err(AppError::Remote("connection reset".to_owned()));
            }
            Ok(self.entries.clone())
        }
    }

    #[derive(Default)]
    struct FakeAuditLogCache {
        entries: Mutex<HashMap<AuditLogFilter, Vec<AuditLogRecord>>>,
    }

    #[async_trait]
    impl AuditLogCache for FakeAuditLogCache {
        async fn get_entries(
            &self,
            filter: &AuditLogFilter,
        ) -> AppResult<Option<Vec<AuditLogRecord>>> {
            Ok(self.entries.lock().await.get(filter).cloned())
        }

        async fn set_entries(
            &self,
            filter: AuditLogFilter,
            entries: Vec<AuditLogRecord>,
            _ttl_seconds: u32,
        ) -> AppResult<()> {
            self.entries.lock().await.insert(filter, entries);
            Ok(())
        }
    }

    #[test]
    fn filter_defaults_to_standard_cap() {
        assert_eq!(AuditLogFilter::default().effective_limit(), DEFAULT_AUDIT_LOG_LIMIT);

        let filter = AuditLogFilter {
            limit: Some(5),
            ..AuditLogFilter::default()
        };
        assert_eq!(filter.effective_limit(), 5);
    }

    #[tokio::test]
    async fn repeated_query_is_served_from_cache() {
        let repository = Arc::new(FakeAuditLogRepository {
            entries: vec![entry("LOGIN")],
            ..FakeAuditLogRepository::default()
        });
        let service = AuditLogService::new(
            repository.clone(),
            Arc::new(FakeAuditLogCache::default()),
            60,
        );
        let filter = AuditLogFilter {
            action: Some("LOGIN".to_owned()),
            ..AuditLogFilter::default()
        };

        let first = service.list_audit_logs(filter.clone()).await;
        let second = service.list_audit_logs(filter).await;

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(*repository.calls.lock().await, 1);
    }

    #[tokio::test]
    async fn distinct_filters_are_cached_independently() {
        let repository = Arc::new(FakeAuditLogRepository {
            entries: vec![entry("LOGIN")],
            ..FakeAuditLogRepository::default()
        });
        let service = AuditLogService::new(
            repository.clone(),
            Arc::new(FakeAuditLogCache::default()),
            60,
        );

        let by_action = AuditLogFilter {
            action: Some("LOGIN".to_owned()),
            ..AuditLogFilter::default()
        };
        let unfiltered = AuditLogFilter::default();

        assert!(service.list_audit_logs(by_action).await.is_ok());
        assert!(service.list_audit_logs(unfiltered).await.is_ok());
        assert_eq!(*repository.calls.lock().await, 2);
    }

    #[tokio::test]
    async fn remote_failure_surfaces_and_is_not_cached() {
        let repository = Arc::new(FakeAuditLogRepository {
            fail: true,
            ..FakeAuditLogRepository::default()
        });
        let cache = Arc::new(FakeAuditLogCache::default());
        let service = AuditLogService::new(repository.clone(), cache.clone(), 60);

        let result = service.list_audit_logs(AuditLogFilter::default()).await;

        assert!(matches!(result, Err(AppError::Remote(_))));
        assert!(cache.entries.lock().await.is_empty());

        // The next call must hit the repository again, not a stale cache slot.
        let retried = service.list_audit_logs(AuditLogFilter::default()).await;
        assert!(retried.is_err());
        assert_eq!(*repository.calls.lock().await, 2);
    }
}

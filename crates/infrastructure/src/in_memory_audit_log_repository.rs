use async_trait::async_trait;
use tokio::sync::RwLock;

use gatewise_application::{AuditLogFilter, AuditLogRepository};
use gatewise_core::AppResult;
use gatewise_domain::AuditLogRecord;

/// In-memory adapter for audit log reads, for tests and local development.
#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    entries: RwLock<Vec<AuditLogRecord>>,
}

impl InMemoryAuditLogRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry to the stored collection.
    pub async fn append_entry(&self, entry: AuditLogRecord) {
        self.entries.write().await.push(entry);
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn list_entries(&self, filter: &AuditLogFilter) -> AppResult<Vec<AuditLogRecord>> {
        let entries = self.entries.read().await;
        let mut listed: Vec<AuditLogRecord> = entries
            .iter()
            .filter(|entry| {
                filter
                    .action
                    .as_ref()
                    .is_none_or(|action| &entry.action == action)
            })
            .filter(|entry| {
                filter
                    .entity_type
                    .as_ref()
                    .is_none_or(|entity_type| &entry.entity_type == entity_type)
            })
            .cloned()
            .collect();

        listed.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        listed.truncate(filter.effective_limit());

        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use gatewise_application::{AuditLogFilter, AuditLogRepository};
    use gatewise_domain::AuditLogRecord;
    use uuid::Uuid;

    use super::InMemoryAuditLogRepository;

    fn entry(action: &str, age_minutes: i64) -> AuditLogRecord {
        AuditLogRecord {
            id: Uuid::new_v4(),
            actor_user_id: None,
            action: action.to_owned(),
            entity_type: "user".to_owned(),
            entity_id: None,
            detail: None,
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn action_filter_and_limit_return_newest_matches() {
        let repository = InMemoryAuditLogRepository::new();
        for age in 0..10 {
            repository.append_entry(entry("LOGIN", age)).await;
            repository.append_entry(entry("LOGOUT", age)).await;
        }

        let listed = repository
            .list_entries(&AuditLogFilter {
                action: Some("LOGIN".to_owned()),
                entity_type: None,
                limit: Some(5),
            })
            .await;

        assert!(listed.is_ok());
        let listed = listed.unwrap_or_default();
        assert_eq!(listed.len(), 5);
        assert!(listed.iter().all(|entry| entry.action == "LOGIN"));
        assert!(
            listed
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
    }

    #[tokio::test]
    async fn unfiltered_query_caps_at_the_default_and_keeps_the_newest() {
        let repository = InMemoryAuditLogRepository::new();
        for age in 0..150 {
            repository.append_entry(entry("LOGIN", age)).await;
        }

        let listed = repository.list_entries(&AuditLogFilter::default()).await;

        assert!(listed.is_ok());
        let listed = listed.unwrap_or_default();
        assert_eq!(listed.len(), 100);
        let oldest_kept = Utc::now() - Duration::minutes(100);
        assert!(listed.iter().all(|entry| entry.created_at >= oldest_kept));
    }

    #[tokio::test]
    async fn entity_type_filter_is_an_equality_predicate() {
        let repository = InMemoryAuditLogRepository::new();
        repository.append_entry(entry("UPDATE", 1)).await;
        let mut referral_entry = entry("UPDATE", 2);
        referral_entry.entity_type = "referral".to_owned();
        repository.append_entry(referral_entry).await;

        let listed = repository
            .list_entries(&AuditLogFilter {
                action: None,
                entity_type: Some("referral".to_owned()),
                limit: None,
            })
            .await;

        assert!(listed.is_ok());
        let listed = listed.unwrap_or_default();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].entity_type, "referral");
    }
}

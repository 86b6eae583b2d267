use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use gatewise_application::{AuditLogFilter, AuditLogRepository};
use gatewise_core::{AppResult, UserId};
use gatewise_domain::AuditLogRecord;

use crate::RestCollectionClient;

const AUDIT_LOGS_COLLECTION: &str = "audit_logs";

/// Remote-store-backed repository for audit log read models.
#[derive(Clone)]
pub struct RestAuditLogRepository {
    client: RestCollectionClient,
}

impl RestAuditLogRepository {
    /// Creates a repository over the provided store client.
    #[must_use]
    pub fn new(client: RestCollectionClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct AuditLogRow {
    id: Uuid,
    actor_user_id: Option<Uuid>,
    action: String,
    entity_type: String,
    entity_id: Option<String>,
    detail: Option<Value>,
    created_at: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLogRecord {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: row.id,
            actor_user_id: row.actor_user_id.map(UserId::from_uuid),
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            detail: row.detail,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AuditLogRepository for RestAuditLogRepository {
    async fn list_entries(&self, filter: &AuditLogFilter) -> AppResult<Vec<AuditLogRecord>> {
        let mut select = self
            .client
            .collection(AUDIT_LOGS_COLLECTION)
            .order_desc("created_at")
            .limit(filter.effective_limit());

        if let Some(action) = &filter.action {
            select = select.eq("action", action.as_str());
        }
        if let Some(entity_type) = &filter.entity_type {
            select = select.eq("entity_type", entity_type.as_str());
        }

        let rows: Vec<AuditLogRow> = select.fetch().await?;

        Ok(rows.into_iter().map(AuditLogRecord::from).collect())
    }
}

use chrono::{DateTime, Utc};
use gatewise_core::UserId;
use serde_json::Value;
use uuid::Uuid;

/// One entry from the hosted `audit_logs` collection.
///
/// Entries are written by the backend; this layer only reads them. Any
/// returned set is ordered by `created_at` descending.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogRecord {
    /// Stable event identifier.
    pub id: Uuid,
    /// User that performed the action, when the backend attributed one.
    pub actor_user_id: Option<UserId>,
    /// Stable action category, e.g. `LOGIN` or `REFERRAL_REDEEMED`.
    pub action: String,
    /// Kind of entity the action touched.
    pub entity_type: String,
    /// Identifier of the touched entity, when one applies.
    pub entity_id: Option<String>,
    /// Opaque structured detail attached by the backend.
    pub detail: Option<Value>,
    /// Event timestamp.
    pub created_at: DateTime<Utc>,
}

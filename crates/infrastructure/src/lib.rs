//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_log_cache;
mod in_memory_audit_log_repository;
mod in_memory_referral_cache;
mod in_memory_referral_repository;
mod rest_audit_log_repository;
mod rest_collection_client;
mod rest_referral_repository;

pub use in_memory_audit_log_cache::InMemoryAuditLogCache;
pub use in_memory_audit_log_repository::InMemoryAuditLogRepository;
pub use in_memory_referral_cache::InMemoryReferralCache;
pub use in_memory_referral_repository::InMemoryReferralRepository;
pub use rest_audit_log_repository::RestAuditLogRepository;
pub use rest_collection_client::{RemoteStoreConfig, RestCollectionClient};
pub use rest_referral_repository::RestReferralRepository;

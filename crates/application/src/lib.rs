//! Application services and ports for the Gatewise query layer.

#![forbid(unsafe_code)]

mod audit_log_service;
mod auth_state;
mod referral_service;
mod route_guard;

pub use audit_log_service::{
    AuditLogCache, AuditLogFilter, AuditLogRepository, AuditLogService, DEFAULT_AUDIT_LOG_LIMIT,
};
pub use auth_state::{AuthSnapshot, AuthStateFeed};
pub use referral_service::{
    ReferralCache, ReferralRepository, ReferralService, ReferralStatsKey,
};
pub use route_guard::{ROOT_PATH, RedirectTarget, RouteDecision, RouteGuard};

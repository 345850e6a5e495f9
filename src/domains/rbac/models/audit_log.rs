use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Audit log entry (audit_log 테이블)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuditLog {
    pub log_id: Uuid,
    /// Acting user
    pub user_id: Uuid,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// 감사 로그 생성 요청
#[derive(Debug, Clone)]
pub struct AuditLogCreate {
    pub user_id: Uuid,
    pub action: String,
    pub description: String,
}

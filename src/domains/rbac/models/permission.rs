use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Permission entity (permission 테이블)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Permission {
    pub permission_id: Uuid,
    pub name: String,
    pub description: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// 역할-권한 연결 (role_permission 테이블)
/// Role-to-permission link
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RolePermission {
    pub id: i64,
    pub role_id: Uuid,
    pub permission_id: Uuid,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

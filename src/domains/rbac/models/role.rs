use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role entity (role 테이블)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub role_id: Uuid,
    pub name: String,
    pub description: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// 사용자-역할 연결 (user_role 테이블)
/// User-to-role link. Plain record with two foreign keys; traverse it with join queries.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRole {
    pub id: i64,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 계정 모델 (user_account 테이블)
/// User account model (user_account table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

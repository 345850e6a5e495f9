use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Refresh Token 모델 (DB 저장용)
/// Refresh Token model (for database storage)
///
/// `refresh_token` holds the SHA-256 digest of the issued token, never the token itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: i64,
    pub refresh_token: String,
    pub used: bool,
    /// Expiry as unix epoch seconds.
    pub exp: i64,
    pub user_id: Uuid,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl RefreshToken {
    /// 만료 여부 확인
    /// Whether the token is expired at `now` (epoch seconds)
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Refresh Token 생성 요청 (새 토큰 발급 시)
/// Refresh Token creation request (when issuing new token)
#[derive(Debug)]
pub struct RefreshTokenCreate {
    pub user_id: Uuid,
    pub refresh_token: String,
    pub exp: i64,
}

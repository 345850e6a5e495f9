use sqlx::{PgPool, Row, postgres::PgRow};
use anyhow::{Context, Result};
use uuid::Uuid;
use crate::domains::auth::models::refresh_token::{RefreshToken, RefreshTokenCreate};

/// Refresh Token Repository
/// Refresh Token 데이터베이스 작업 처리
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Refresh Token 생성 (저장)
    /// Create and store refresh token
    pub async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshToken> {
        let row = sqlx::query(
            r#"
            INSERT INTO refresh_token (refresh_token, used, exp, user_id)
            VALUES ($1, FALSE, $2, $3)
            RETURNING id, refresh_token, used, exp, user_id, create_time, update_time
            "#,
        )
        .bind(&data.refresh_token)
        .bind(data.exp)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create refresh token")?;

        Ok(map_refresh_token(&row))
    }

    /// Refresh Token 조회
    /// Find refresh token by its stored digest
    pub async fn find_by_token(&self, refresh_token: &str) -> Result<Option<RefreshToken>> {
        let row = sqlx::query(
            r#"
            SELECT id, refresh_token, used, exp, user_id, create_time, update_time
            FROM refresh_token
            WHERE refresh_token = $1
            "#,
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find refresh token")?;

        Ok(row.as_ref().map(map_refresh_token))
    }

    /// Refresh Token 사용 처리 (used = true)
    /// Flip `used` on an unused token. Returns false if the token is unknown or was already used,
    /// so two concurrent consumers cannot both succeed.
    pub async fn mark_used(&self, refresh_token: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_token
            SET used = TRUE
            WHERE refresh_token = $1 AND used = FALSE
            "#,
        )
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .context("Failed to mark refresh token as used")?;

        Ok(result.rows_affected() == 1)
    }

    /// 사용자의 모든 Refresh Token 사용 처리 (로그아웃 시)
    /// Mark every unused token of a user as used
    pub async fn mark_all_used_for_user(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_token
            SET used = TRUE
            WHERE user_id = $1 AND used = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to mark all refresh tokens as used for user")?;

        Ok(result.rows_affected())
    }

    /// 만료된 토큰 삭제 (정리 작업)
    /// Delete tokens whose `exp` is at or before `now` (epoch seconds)
    pub async fn delete_expired(&self, now: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_token
            WHERE exp <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to delete expired refresh tokens")?;

        Ok(result.rows_affected())
    }

    /// 특정 사용자의 Refresh Token 목록
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>> {
        let rows = sqlx::query(
            r#"
            SELECT id, refresh_token, used, exp, user_id, create_time, update_time
            FROM refresh_token
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list refresh tokens for user")?;

        Ok(rows.iter().map(map_refresh_token).collect())
    }
}

fn map_refresh_token(row: &PgRow) -> RefreshToken {
    RefreshToken {
        id: row.get("id"),
        refresh_token: row.get("refresh_token"),
        used: row.get("used"),
        exp: row.get("exp"),
        user_id: row.get("user_id"),
        create_time: row.get("create_time"),
        update_time: row.get("update_time"),
    }
}

use sqlx::{PgPool, Row, postgres::PgRow};
use anyhow::{Context, Result};
use uuid::Uuid;
use crate::domains::auth::models::user::User;

pub struct UserRepository {
    pool: PgPool
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 사용자 생성 (user_id는 여기서 발급, 타임스탬프는 DB 기본값)
    // Create user; create_time/update_time come from column defaults
    pub async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO user_account (user_id, email, hashed_password)
            VALUES ($1, $2, $3)
            RETURNING user_id, email, hashed_password, create_time, update_time
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create user")?;

        Ok(map_user(&row))
    }

    // 이메일로 사용자 조회 (로그인용)
    // Get user by email (for login)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, hashed_password, create_time, update_time
            FROM user_account
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        Ok(row.as_ref().map(map_user))
    }

    // ID로 사용자 조회
    // Get user by ID
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, hashed_password, create_time, update_time
            FROM user_account
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        Ok(row.as_ref().map(map_user))
    }

    /// 비밀번호 해시 변경
    /// Replace the stored password hash. Returns false if the user does not exist.
    pub async fn update_password(&self, user_id: Uuid, hashed_password: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE user_account
            SET hashed_password = $2
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(hashed_password)
        .execute(&self.pool)
        .await
        .context("Failed to update password")?;

        Ok(result.rows_affected() == 1)
    }

    /// 사용자 삭제 (refresh_token, user_role, audit_log는 CASCADE로 삭제됨)
    /// Delete user; tokens, role links and audit rows go with it
    pub async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_account WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected() == 1)
    }
}

fn map_user(row: &PgRow) -> User {
    User {
        user_id: row.get("user_id"),
        email: row.get("email"),
        hashed_password: row.get("hashed_password"),
        create_time: row.get("create_time"),
        update_time: row.get("update_time"),
    }
}

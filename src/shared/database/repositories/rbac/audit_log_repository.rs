use chrono::Utc;
use sqlx::{Executor, PgPool, Postgres};
use anyhow::{Context, Result};
use uuid::Uuid;
use crate::domains::rbac::models::{AuditLog, AuditLogCreate};

pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 감사 로그 기록 (timestamp는 기록 시점)
    pub async fn record(&self, data: AuditLogCreate) -> Result<AuditLog> {
        Self::insert(&self.pool, data).await
    }

    /// Record on any executor, so the entry can share a transaction with the change it describes
    pub async fn insert<'e, E>(executor: E, data: AuditLogCreate) -> Result<AuditLog>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_log (log_id, user_id, action, "timestamp", description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING log_id, user_id, action, "timestamp", description, create_time, update_time
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(&data.action)
        .bind(Utc::now())
        .bind(&data.description)
        .fetch_one(executor)
        .await
        .context("Failed to record audit log")
    }

    /// Newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AuditLog>> {
        sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT log_id, user_id, action, "timestamp", description, create_time, update_time
            FROM audit_log
            WHERE user_id = $1
            ORDER BY "timestamp" DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list audit logs for user")
    }
}

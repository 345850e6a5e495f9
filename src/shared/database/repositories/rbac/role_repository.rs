use sqlx::{Executor, PgPool, Postgres};
use anyhow::{Context, Result};
use uuid::Uuid;
use crate::domains::rbac::models::{Role, UserRole};

/// Role Repository
/// role / user_role 테이블 작업
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_role(&self, name: &str, description: &str) -> Result<Role> {
        Self::insert_role(&self.pool, name, description).await
    }

    /// 역할 생성 (풀 또는 트랜잭션에서 실행)
    /// Insert a role on any executor, e.g. `&mut Transaction<'_, Postgres>`
    pub async fn insert_role<'e, E>(executor: E, name: &str, description: &str) -> Result<Role>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO role (role_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING role_id, name, description, create_time, update_time
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .context("Failed to create role")
    }

    pub async fn get_role_by_id(&self, role_id: Uuid) -> Result<Option<Role>> {
        sqlx::query_as::<_, Role>(
            r#"
            SELECT role_id, name, description, create_time, update_time
            FROM role
            WHERE role_id = $1
            "#,
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch role by id")
    }

    pub async fn get_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        sqlx::query_as::<_, Role>(
            r#"
            SELECT role_id, name, description, create_time, update_time
            FROM role
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch role by name")
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            r#"
            SELECT role_id, name, description, create_time, update_time
            FROM role
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list roles")
    }

    /// 역할 삭제 (user_role, role_permission은 CASCADE)
    pub async fn delete_role(&self, role_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM role WHERE role_id = $1")
            .bind(role_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete role")?;

        Ok(result.rows_affected() == 1)
    }

    /// 사용자에게 역할 부여
    /// Link a user to a role. Returns `None` when the link already exists.
    pub async fn assign_to_user(&self, user_id: Uuid, role_id: Uuid) -> Result<Option<UserRole>> {
        Self::insert_user_role(&self.pool, user_id, role_id).await
    }

    pub async fn insert_user_role<'e, E>(
        executor: E,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<Option<UserRole>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, UserRole>(
            r#"
            INSERT INTO user_role (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT uq_user_role DO NOTHING
            RETURNING id, user_id, role_id, create_time, update_time
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .fetch_optional(executor)
        .await
        .context("Failed to assign role to user")
    }

    pub async fn revoke_from_user(&self, user_id: Uuid, role_id: Uuid) -> Result<bool> {
        Self::delete_user_role(&self.pool, user_id, role_id).await
    }

    pub async fn delete_user_role<'e, E>(executor: E, user_id: Uuid, role_id: Uuid) -> Result<bool>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM user_role WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(executor)
            .await
            .context("Failed to revoke role from user")?;

        Ok(result.rows_affected() == 1)
    }

    /// 사용자의 역할 목록 (user_role 조인)
    /// Roles held by a user, via an explicit join on user_role
    pub async fn list_roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            r#"
            SELECT r.role_id, r.name, r.description, r.create_time, r.update_time
            FROM role r
            JOIN user_role ur ON ur.role_id = r.role_id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list roles for user")
    }
}

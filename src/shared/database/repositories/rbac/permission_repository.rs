use sqlx::{Executor, PgPool, Postgres};
use anyhow::{Context, Result};
use uuid::Uuid;
use crate::domains::rbac::models::{Permission, RolePermission};

/// Permission Repository
/// permission / role_permission 테이블 작업
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_permission(&self, name: &str, description: &str) -> Result<Permission> {
        Self::insert_permission(&self.pool, name, description).await
    }

    pub async fn insert_permission<'e, E>(
        executor: E,
        name: &str,
        description: &str,
    ) -> Result<Permission>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Permission>(
            r#"
            INSERT INTO permission (permission_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING permission_id, name, description, create_time, update_time
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .context("Failed to create permission")
    }

    pub async fn get_permission_by_name(&self, name: &str) -> Result<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            r#"
            SELECT permission_id, name, description, create_time, update_time
            FROM permission
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch permission by name")
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            r#"
            SELECT permission_id, name, description, create_time, update_time
            FROM permission
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list permissions")
    }

    pub async fn delete_permission(&self, permission_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM permission WHERE permission_id = $1")
            .bind(permission_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete permission")?;

        Ok(result.rows_affected() == 1)
    }

    /// 역할에 권한 부여
    /// Link a permission to a role. Returns `None` when the link already exists.
    pub async fn grant_to_role(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<Option<RolePermission>> {
        Self::insert_role_permission(&self.pool, role_id, permission_id).await
    }

    pub async fn insert_role_permission<'e, E>(
        executor: E,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<Option<RolePermission>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, RolePermission>(
            r#"
            INSERT INTO role_permission (role_id, permission_id)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT uq_role_permission DO NOTHING
            RETURNING id, role_id, permission_id, create_time, update_time
            "#,
        )
        .bind(role_id)
        .bind(permission_id)
        .fetch_optional(executor)
        .await
        .context("Failed to grant permission to role")
    }

    pub async fn revoke_from_role(&self, role_id: Uuid, permission_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM role_permission WHERE role_id = $1 AND permission_id = $2",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&self.pool)
        .await
        .context("Failed to revoke permission from role")?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn list_permissions_for_role(&self, role_id: Uuid) -> Result<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            r#"
            SELECT p.permission_id, p.name, p.description, p.create_time, p.update_time
            FROM permission p
            JOIN role_permission rp ON rp.permission_id = p.permission_id
            WHERE rp.role_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list permissions for role")
    }

    /// 사용자의 유효 권한 (user_role -> role_permission 조인)
    /// Effective permissions of a user across all of their roles, each listed once
    pub async fn list_permissions_for_user(&self, user_id: Uuid) -> Result<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            r#"
            SELECT DISTINCT p.permission_id, p.name, p.description, p.create_time, p.update_time
            FROM permission p
            JOIN role_permission rp ON rp.permission_id = p.permission_id
            JOIN user_role ur ON ur.role_id = rp.role_id
            WHERE ur.user_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list permissions for user")
    }
}

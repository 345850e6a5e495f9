use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::domains::rbac::models::{AuditLog, AuditLogCreate, Permission, Role};
use crate::shared::database::{
    AuditLogRepository, Database, PermissionRepository, RoleRepository, UserRepository,
};
use crate::shared::errors::{RbacError, is_unique_violation};

// 접근 제어 서비스
// AccessService: roles, permissions and grants. Every mutation is written to audit_log
// under the acting user, in the same transaction as the change.
#[derive(Clone)]
pub struct AccessService {
    db: Database,
}

impl AccessService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create_role(
        &self,
        actor: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Role, RbacError> {
        let mut tx = self.begin().await?;

        let role = RoleRepository::insert_role(&mut tx, name, description)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RbacError::RoleAlreadyExists { name: name.to_string() }
                } else {
                    RbacError::DatabaseError(format!("Failed to create role: {:#}", e))
                }
            })?;

        Self::audit(&mut tx, actor, "role.create", format!("Created role {}", role.name)).await?;
        Self::commit(tx).await?;
        Ok(role)
    }

    pub async fn create_permission(
        &self,
        actor: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Permission, RbacError> {
        let mut tx = self.begin().await?;

        let permission = PermissionRepository::insert_permission(&mut tx, name, description)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RbacError::PermissionAlreadyExists { name: name.to_string() }
                } else {
                    RbacError::DatabaseError(format!("Failed to create permission: {:#}", e))
                }
            })?;

        Self::audit(
            &mut tx,
            actor,
            "permission.create",
            format!("Created permission {}", permission.name),
        )
        .await?;
        Self::commit(tx).await?;
        Ok(permission)
    }

    /// 사용자에게 역할 부여 (이미 있으면 그대로 성공)
    /// Assign a role to a user. Assigning a role the user already holds is a no-op.
    pub async fn assign_role(
        &self,
        actor: Uuid,
        user_id: Uuid,
        role_name: &str,
    ) -> Result<(), RbacError> {
        let user_exists = UserRepository::new(self.db.pool().clone())
            .get_user_by_id(user_id)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?
            .is_some();
        if !user_exists {
            return Err(RbacError::UserNotFound { id: user_id });
        }

        let role = self.find_role(role_name).await?;

        let mut tx = self.begin().await?;
        let created = RoleRepository::insert_user_role(&mut tx, user_id, role.role_id)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to assign role: {:#}", e)))?;

        if created.is_some() {
            Self::audit(
                &mut tx,
                actor,
                "role.assign",
                format!("Assigned role {} to user {}", role.name, user_id),
            )
            .await?;
        }
        Self::commit(tx).await?;

        if created.is_some() {
            info!(user_id = %user_id, role = %role.name, "Role assigned");
        }
        Ok(())
    }

    pub async fn revoke_role(
        &self,
        actor: Uuid,
        user_id: Uuid,
        role_name: &str,
    ) -> Result<bool, RbacError> {
        let role = self.find_role(role_name).await?;

        let mut tx = self.begin().await?;
        let removed = RoleRepository::delete_user_role(&mut tx, user_id, role.role_id)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to revoke role: {:#}", e)))?;

        if removed {
            Self::audit(
                &mut tx,
                actor,
                "role.revoke",
                format!("Revoked role {} from user {}", role.name, user_id),
            )
            .await?;
        }
        Self::commit(tx).await?;
        Ok(removed)
    }

    /// 역할에 권한 부여 (이미 있으면 그대로 성공)
    pub async fn grant_permission(
        &self,
        actor: Uuid,
        role_name: &str,
        permission_name: &str,
    ) -> Result<(), RbacError> {
        let role = self.find_role(role_name).await?;
        let permission = self.find_permission(permission_name).await?;

        let mut tx = self.begin().await?;
        let created = PermissionRepository::insert_role_permission(
            &mut tx,
            role.role_id,
            permission.permission_id,
        )
        .await
        .map_err(|e| RbacError::DatabaseError(format!("Failed to grant permission: {:#}", e)))?;

        if created.is_some() {
            Self::audit(
                &mut tx,
                actor,
                "permission.grant",
                format!("Granted {} to role {}", permission.name, role.name),
            )
            .await?;
        }
        Self::commit(tx).await?;
        Ok(())
    }

    pub async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, RbacError> {
        RoleRepository::new(self.db.pool().clone())
            .list_roles_for_user(user_id)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to list roles: {:#}", e)))
    }

    /// 사용자의 모든 역할을 통한 유효 권한
    pub async fn permissions_for_user(&self, user_id: Uuid) -> Result<Vec<Permission>, RbacError> {
        PermissionRepository::new(self.db.pool().clone())
            .list_permissions_for_user(user_id)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to list permissions: {:#}", e)))
    }

    pub async fn has_permission(
        &self,
        user_id: Uuid,
        permission_name: &str,
    ) -> Result<bool, RbacError> {
        let permissions = self.permissions_for_user(user_id).await?;
        Ok(permissions.iter().any(|p| p.name == permission_name))
    }

    pub async fn audit_trail(&self, user_id: Uuid) -> Result<Vec<AuditLog>, RbacError> {
        AuditLogRepository::new(self.db.pool().clone())
            .list_for_user(user_id)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to list audit logs: {:#}", e)))
    }

    async fn find_role(&self, name: &str) -> Result<Role, RbacError> {
        RoleRepository::new(self.db.pool().clone())
            .get_role_by_name(name)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to fetch role: {:#}", e)))?
            .ok_or_else(|| RbacError::RoleNotFound { name: name.to_string() })
    }

    async fn find_permission(&self, name: &str) -> Result<Permission, RbacError> {
        PermissionRepository::new(self.db.pool().clone())
            .get_permission_by_name(name)
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to fetch permission: {:#}", e)))?
            .ok_or_else(|| RbacError::PermissionNotFound { name: name.to_string() })
    }

    // 변경과 감사 로그는 같은 트랜잭션에서 커밋 (둘 중 하나만 남지 않음)
    async fn begin(&self) -> Result<Transaction<'static, Postgres>, RbacError> {
        self.db
            .pool()
            .begin()
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to begin transaction: {}", e)))
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), RbacError> {
        tx.commit()
            .await
            .map_err(|e| RbacError::DatabaseError(format!("Failed to commit transaction: {}", e)))
    }

    async fn audit(
        tx: &mut Transaction<'static, Postgres>,
        actor: Uuid,
        action: &str,
        description: String,
    ) -> Result<(), RbacError> {
        AuditLogRepository::insert(
            &mut *tx,
            AuditLogCreate {
                user_id: actor,
                action: action.to_string(),
                description: truncate(description, 256),
            },
        )
        .await
        .map_err(|e| RbacError::DatabaseError(format!("Failed to record audit log: {:#}", e)))?;
        Ok(())
    }
}

// description 컬럼은 VARCHAR(256)
fn truncate(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}

use thiserror::Error;
use uuid::Uuid;

/// 역할/권한 관련 에러
/// Role and permission errors
#[derive(Error, Debug)]
pub enum RbacError {
    #[error("Role already exists: {name}")]
    RoleAlreadyExists { name: String },

    #[error("Permission already exists: {name}")]
    PermissionAlreadyExists { name: String },

    #[error("Role not found: {name}")]
    RoleNotFound { name: String },

    #[error("Permission not found: {name}")]
    PermissionNotFound { name: String },

    /// Target user of an assignment does not exist
    #[error("User not found: id={id}")]
    UserNotFound { id: Uuid },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

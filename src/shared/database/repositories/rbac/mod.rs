// RBAC repositories
pub mod role_repository;
pub mod permission_repository;
pub mod audit_log_repository;

pub use role_repository::*;
pub use permission_repository::*;
pub use audit_log_repository::*;

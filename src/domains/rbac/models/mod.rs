// RBAC domain models
pub mod role;
pub mod permission;
pub mod audit_log;

pub use role::*;
pub use permission::*;
pub use audit_log::*;

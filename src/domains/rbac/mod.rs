// RBAC domain module (roles, permissions, audit trail)
pub mod models;
pub mod services;

pub use models::*;
pub use services::*;

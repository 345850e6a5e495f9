// Shared errors
pub mod auth_error;
pub mod rbac_error;
pub mod fetch_error;
pub mod database_error;

pub use auth_error::*;
pub use rbac_error::*;
pub use fetch_error::*;
pub use database_error::*;

// All repositories module
pub mod auth;
pub mod rbac;

// Re-export all repositories for convenience
pub use auth::*;
pub use rbac::*;

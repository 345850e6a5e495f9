// Auth domain services
pub mod account_service;
pub mod credentials;

pub use account_service::*;
pub use credentials::*;

// Auth domain models
pub mod user;
pub mod refresh_token;

pub use user::*;
pub use refresh_token::*;

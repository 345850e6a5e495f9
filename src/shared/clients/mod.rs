// External API clients
pub mod api_client;

pub use api_client::*;

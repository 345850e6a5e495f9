// Shared module
pub mod clients;
pub mod database;
pub mod errors;
pub mod telemetry;

pub use clients::*;
pub use database::*;
pub use errors::*;

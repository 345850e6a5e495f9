//! Identity store (users, refresh tokens, roles, permissions, audit log) backed by
//! PostgreSQL, plus an authenticated fetcher for external JSON APIs.

pub mod config;
pub mod domains;
pub mod shared;

//! Persistence layer for the Bookit backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Versioned SQL migrations (embedded via `sqlx::migrate!` from the api crate)

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

//! Custom Axum extractors.

pub mod dashboard;

pub use dashboard::DashboardAuth;

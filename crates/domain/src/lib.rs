//! Domain layer for the Bookit backend.
//!
//! This crate contains:
//! - Domain models (services, staff, customers, bookings, payments)
//! - The booking wizard state machine
//! - Pure business logic (interval overlap, lifecycle states)

pub mod models;
pub mod wizard;

//! HTTP route handlers.

pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod health;
pub mod services;
pub mod staff;
pub mod wizard;

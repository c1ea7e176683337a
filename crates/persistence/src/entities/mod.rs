//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. Conversions into domain
//! models collapse the `is_active`/`deleted_at` column pair into the tagged
//! lifecycle state.

pub mod booking;
pub mod customer;
pub mod payment;
pub mod service;
pub mod setting;
pub mod staff;
pub mod working_hours;

pub use booking::{BookingEntity, BookingSlotEntity};
pub use customer::CustomerEntity;
pub use payment::PaymentEntity;
pub use service::{CategoryEntity, ServiceEntity, ServiceListingEntity};
pub use setting::SettingEntity;
pub use staff::{StaffEntity, StaffForServiceEntity};
pub use working_hours::WorkingHoursEntity;

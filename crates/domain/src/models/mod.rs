//! Domain model definitions.

pub mod booking;
pub mod customer;
pub mod lifecycle;
pub mod payment;
pub mod service;
pub mod setting;
pub mod staff;
pub mod working_hours;

pub use booking::{slot_conflicts, Booking, BookingStatus, NewBooking, PaymentState, TimeRange};
pub use customer::{ContactDetails, Customer};
pub use lifecycle::Lifecycle;
pub use payment::{Payment, PaymentStatus, PaymentType};
pub use service::{Category, CategoryServices, Service, ServiceSummary};
pub use setting::{default_settings, Setting};
pub use staff::{Staff, StaffForService, StaffRole};
pub use working_hours::WorkingHours;

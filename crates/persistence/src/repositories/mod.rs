//! Repository implementations, one per aggregate.

pub mod booking;
pub mod customer;
pub mod payment;
pub mod service;
pub mod setting;
pub mod staff;
pub mod working_hours;

pub use booking::BookingRepository;
pub use customer::CustomerRepository;
pub use payment::PaymentRepository;
pub use service::ServiceRepository;
pub use setting::SettingRepository;
pub use staff::StaffRepository;
pub use working_hours::WorkingHoursRepository;

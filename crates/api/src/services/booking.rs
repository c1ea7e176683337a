//! Booking creation.
//!
//! The conflict story has two layers. An explicit overlap check against the
//! staff member's existing bookings on that date rejects any colliding
//! interval, widened by the service's buffers. The `unique_booking_slot`
//! index then backstops the exact-slot race two concurrent requests can
//! still lose: the second insert fails with a uniqueness violation, which is
//! translated into the same slot-taken outcome rather than surfacing as a
//! storage error.

use chrono::Duration;
use thiserror::Error;

use domain::models::{
    slot_conflicts, Booking, Customer, NewBooking, Payment, Service, TimeRange,
};
use persistence::repositories::{
    BookingRepository, CustomerRepository, PaymentRepository, ServiceRepository, StaffRepository,
};
use persistence::repositories::booking::InsertBooking;

/// Errors from booking creation.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Service not found or not bookable")]
    ServiceNotFound,

    #[error("Staff member not found or not bookable")]
    StaffNotFound,

    #[error("The requested slot is already taken")]
    SlotTaken,

    #[error("End time must be after start time")]
    InvalidTimes,

    #[error("Customer name and email are required")]
    MissingContact,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What a successful creation produced.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub booking: Booking,
    pub customer: Customer,
    /// Deposit row, when one was requested. Recorded after and independently
    /// of the booking insert; a failure here leaves the booking standing.
    pub deposit: Option<Payment>,
}

/// Whether a driver error is the unique-index rejection of a duplicate slot.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

pub struct BookingDeps<'a> {
    pub services: &'a ServiceRepository,
    pub staff: &'a StaffRepository,
    pub customers: &'a CustomerRepository,
    pub bookings: &'a BookingRepository,
    pub payments: &'a PaymentRepository,
}

/// Creates a booking per the checkout request.
pub async fn create_booking(
    deps: &BookingDeps<'_>,
    new: NewBooking,
) -> Result<BookingOutcome, BookingError> {
    let service: Service = deps
        .services
        .find_by_id(new.service_id)
        .await?
        .map(Service::from)
        .filter(|s| s.lifecycle.is_usable())
        .ok_or(BookingError::ServiceNotFound)?;

    let staff_usable = deps
        .staff
        .find_by_id(new.staff_id)
        .await?
        .map(domain::models::Staff::from)
        .map(|s| s.lifecycle.is_usable())
        .unwrap_or(false);
    if !staff_usable {
        return Err(BookingError::StaffNotFound);
    }
    let price = deps
        .staff
        .effective_price(new.staff_id, new.service_id)
        .await?
        .ok_or(BookingError::StaffNotFound)?;

    let start = new.start_time;
    let end = match new.end_time {
        Some(end) => end,
        None => start
            .overflowing_add_signed(Duration::minutes(service.duration as i64))
            .0,
    };
    if end <= start {
        return Err(BookingError::InvalidTimes);
    }
    let duration = (end - start).num_minutes() as i32;

    // Overlap check over the staff member's day, buffers included.
    let requested =
        TimeRange::new(start, end).widened(service.buffer_before, service.buffer_after);
    let taken: Vec<TimeRange> = deps
        .bookings
        .slots_for_staff_date(new.staff_id, new.booking_date)
        .await?
        .iter()
        .map(|slot| slot.time_range())
        .collect();
    if slot_conflicts(requested, &taken) {
        return Err(BookingError::SlotTaken);
    }

    let customer = resolve_customer(deps.customers, &new).await?;

    let inserted = deps
        .bookings
        .insert(InsertBooking {
            customer_id: customer.id,
            service_id: service.id,
            staff_id: new.staff_id,
            booking_date: new.booking_date,
            start_time: start,
            end_time: end,
            duration,
            status: "pending".into(),
            total_price: price,
            payment_state: "unpaid".into(),
        })
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                BookingError::SlotTaken
            } else {
                BookingError::Database(err)
            }
        })?;
    let booking = Booking::from(inserted);

    // Independent write; no transaction ties it to the booking.
    let deposit = match new.deposit {
        Some(amount) if amount > 0.0 => {
            match deps
                .payments
                .insert(booking.id, customer.id, amount, "deposit", "pending")
                .await
            {
                Ok(payment) => Some(Payment::from(payment)),
                Err(err) => {
                    tracing::error!(booking_id = booking.id, error = %err,
                        "Failed to record deposit payment");
                    None
                }
            }
        }
        _ => None,
    };

    tracing::info!(
        booking_id = booking.id,
        staff_id = booking.staff_id,
        date = %booking.booking_date,
        start = %booking.start_time,
        "Booking created"
    );

    Ok(BookingOutcome {
        booking,
        customer,
        deposit,
    })
}

/// Matches an existing customer by email or creates a new record from the
/// contact details. Returning customers get their phone and notes refreshed.
async fn resolve_customer(
    customers: &CustomerRepository,
    new: &NewBooking,
) -> Result<Customer, BookingError> {
    let email = new
        .customer
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or(BookingError::MissingContact)?;
    if new.customer.name.as_deref().unwrap_or("").trim().is_empty() {
        return Err(BookingError::MissingContact);
    }

    if let Some(existing) = customers.find_by_email(email).await? {
        customers
            .update_contact(
                existing.id,
                new.customer.phone.as_deref(),
                new.customer.notes.as_deref(),
            )
            .await?;
        return Ok(Customer::from(existing));
    }

    let (first_name, last_name) = new.customer.split_name();
    let created = customers
        .create(
            email,
            &first_name,
            &last_name,
            new.customer.phone.as_deref(),
            new.customer.notes.as_deref(),
            new.marketing_consent,
        )
        .await?;
    Ok(Customer::from(created))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_error_messages() {
        assert_eq!(
            BookingError::SlotTaken.to_string(),
            "The requested slot is already taken"
        );
        assert_eq!(
            BookingError::ServiceNotFound.to_string(),
            "Service not found or not bookable"
        );
    }

    #[test]
    fn test_row_not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}

//! Appointment booking and the client's appointment list.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::auth::{Page, Redirect};
use crate::collection::{filter_by_term, remove_by_id};
use crate::db::{SessionStore, StoreError};
use crate::forms::{BookingForm, ValidationErrors};
use crate::models::{Appointment, Veterinarian, VETERINARIANS};

/// Save spinner plus the confirmation screen.
pub const BOOKING_DELAY_MS: u64 = 500 + 2_000;

/// Booking errors.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// A stored booking and where to go once the confirmation has shown.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub appointment: Appointment,
    pub redirect: Redirect,
}

/// Appointment list over the session store.
pub struct AppointmentBook<'a> {
    store: &'a SessionStore,
}

impl<'a> AppointmentBook<'a> {
    pub fn new(store: &'a SessionStore) -> Self {
        Self { store }
    }

    /// Veterinarians a client can book with.
    pub fn roster() -> &'static [Veterinarian] {
        &VETERINARIANS
    }

    /// Book an appointment stamped with the current time.
    pub fn book(&self, form: &BookingForm) -> BookingResult<BookingConfirmation> {
        self.book_at(form, Utc::now())
    }

    /// Book an appointment stamped at `now`.
    ///
    /// Nothing is written unless every field validates.
    pub fn book_at(
        &self,
        form: &BookingForm,
        now: DateTime<Utc>,
    ) -> BookingResult<BookingConfirmation> {
        let request = form.validate()?;
        let appointment = Appointment::new(request, now);
        self.store.prepend_appointment(appointment.clone())?;

        info!(id = %appointment.id, veterinarian = %appointment.veterinarian, "appointment booked");
        Ok(BookingConfirmation {
            appointment,
            redirect: Redirect::after(Page::MyAppointments, BOOKING_DELAY_MS),
        })
    }

    /// All appointments, newest first.
    pub fn list(&self) -> Vec<Appointment> {
        self.store.appointments_or_default()
    }

    /// Appointments whose owner or veterinarian contains `term`.
    pub fn search(&self, term: &str) -> Vec<Appointment> {
        let appointments = self.list();
        filter_by_term(&appointments, term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Cancel an appointment. Returns whether one was removed.
    pub fn cancel(&self, id: &str) -> BookingResult<bool> {
        let mut appointments = self.list();
        if !remove_by_id(&mut appointments, id) {
            return Ok(false);
        }
        self.store.save_appointments(&appointments)?;
        info!(id, "appointment cancelled");
        Ok(true)
    }
}

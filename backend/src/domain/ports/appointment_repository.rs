//! Port for appointment persistence.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::appointment::Appointment;

use super::define_port_error;

define_port_error! {
    /// Errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "appointment storage failed: {message}",
    }
}

/// Port for storing and reading appointments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Persist a new appointment.
    async fn insert(&self, appointment: Appointment) -> Result<(), AppointmentRepositoryError>;

    /// All appointments, in insertion order.
    async fn list(&self) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// Appointments booked on `date`.
    async fn list_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// Find an appointment by id.
    async fn find(&self, id: Uuid) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Replace a stored appointment; returns `false` when the id is unknown.
    async fn update(&self, appointment: Appointment) -> Result<bool, AppointmentRepositoryError>;

    /// Delete an appointment; returns `false` when the id is unknown.
    async fn remove(&self, id: Uuid) -> Result<bool, AppointmentRepositoryError>;
}

/// Fixture implementation for tests that never touch bookings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAppointmentRepository;

#[async_trait]
impl AppointmentRepository for FixtureAppointmentRepository {
    async fn insert(&self, _appointment: Appointment) -> Result<(), AppointmentRepositoryError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_date(
        &self,
        _date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: Uuid) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        Ok(None)
    }

    async fn update(&self, _appointment: Appointment) -> Result<bool, AppointmentRepositoryError> {
        Ok(false)
    }

    async fn remove(&self, _id: Uuid) -> Result<bool, AppointmentRepositoryError> {
        Ok(false)
    }
}

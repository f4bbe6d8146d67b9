//! In-memory appointment storage.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::appointment::Appointment;
use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};

/// Process-local appointment store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentRepository {
    rows: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AppointmentRepositoryError {
    AppointmentRepositoryError::storage("lock poisoned")
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn insert(&self, appointment: Appointment) -> Result<(), AppointmentRepositoryError> {
        self.rows.write().map_err(|_| poisoned())?.push(appointment);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.clone())
    }

    async fn list_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|appointment| appointment.date == date)
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|appointment| appointment.id == id)
            .cloned())
    }

    async fn update(&self, appointment: Appointment) -> Result<bool, AppointmentRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        match rows.iter_mut().find(|row| row.id == appointment.id) {
            Some(row) => {
                *row = appointment;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, AppointmentRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }
}

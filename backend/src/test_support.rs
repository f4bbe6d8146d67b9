//! Test doubles shared by unit and integration tests.

use std::sync::{Mutex, MutexGuard, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::auth::VerificationCode;
use crate::domain::phone::PhoneNumber;
use crate::domain::ports::{CodeIssuer, SmsDeliveryError, SmsNotifier};

/// Controllable clock for exercising expiry and cooldown rules.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Advance the clock by a standard-library duration.
    ///
    /// # Panics
    /// Panics when `delta` does not fit a `TimeDelta`.
    pub fn advance(&self, delta: Duration) {
        let delta = TimeDelta::from_std(delta).expect("duration fits TimeDelta");
        *self.lock_clock() += delta;
    }

    /// Advance the clock by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    /// Advance the clock by whole minutes.
    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock_clock() += TimeDelta::minutes(minutes);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// SMS notifier that records every message instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingSmsNotifier {
    sent: RwLock<Vec<(String, String)>>,
}

impl RecordingSmsNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(phone, body)` pairs in send order.
    ///
    /// # Panics
    /// Panics when the recorder lock is poisoned.
    pub fn sent(&self) -> Vec<(String, String)> {
        match self.sent.read() {
            Ok(rows) => rows.clone(),
            Err(_) => panic!("recorder lock"),
        }
    }
}

#[async_trait]
impl SmsNotifier for RecordingSmsNotifier {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<(), SmsDeliveryError> {
        self.sent
            .write()
            .map_err(|_| SmsDeliveryError::delivery("recorder lock"))?
            .push((to.as_str().to_owned(), body.to_owned()));
        Ok(())
    }
}

/// Code issuer that hands out a fixed sequence, then repeats the last code.
#[derive(Debug)]
pub struct SequenceCodeIssuer {
    codes: Mutex<Vec<VerificationCode>>,
}

impl SequenceCodeIssuer {
    /// Build an issuer from literal six-digit codes.
    ///
    /// # Panics
    /// Panics when a literal is not a valid six-digit code.
    pub fn new(codes: &[&str]) -> Self {
        let mut parsed: Vec<VerificationCode> = codes
            .iter()
            .map(|raw| VerificationCode::new(raw).expect("test codes are valid"))
            .collect();
        parsed.reverse();
        Self {
            codes: Mutex::new(parsed),
        }
    }
}

impl CodeIssuer for SequenceCodeIssuer {
    fn issue(&self) -> VerificationCode {
        let mut codes = match self.codes.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("issuer lock"),
        };
        if codes.len() > 1 {
            codes.pop().expect("len checked")
        } else {
            codes.first().cloned().expect("issuer must hold a code")
        }
    }
}

/// Convenience constructor for fixture phone numbers.
///
/// # Panics
/// Panics when `raw` is not a valid phone number.
pub fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::new(raw).expect("fixture phone is valid")
}

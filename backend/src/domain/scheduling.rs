//! Appointment scheduling: service catalogue, salon hours, and slot
//! availability.
//!
//! Availability is a pure computation over the weekly schedule, the existing
//! bookings for the requested day, and the current wall-clock time. The HTTP
//! adapter supplies all three so the logic stays deterministic under test.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::appointment::Appointment;

/// Width of the booking grid in minutes; slots start on these boundaries.
pub const SLOT_INTERVAL_MINUTES: u32 = 30;

/// Start of the daily lunch window; no slot may begin inside it.
pub const LUNCH_START: NaiveTime = match NaiveTime::from_hms_opt(12, 30, 0) {
    Some(t) => t,
    None => panic!("static lunch start is valid"),
};

/// End of the daily lunch window.
pub const LUNCH_END: NaiveTime = match NaiveTime::from_hms_opt(13, 30, 0) {
    Some(t) => t,
    None => panic!("static lunch end is valid"),
};

/// Services offered by the salon, with fixed durations and wait estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// Classic manicure.
    Manicure,
    /// Pedicure treatment.
    Pedicure,
    /// Gel polish set.
    Gel,
    /// Acrylic extensions.
    Acrylic,
    /// Freehand nail art.
    NailArt,
    /// The signature mushroom design set.
    MushroomDesign,
}

impl ServiceType {
    /// How long an appointment of this service occupies the chair.
    pub fn duration(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.duration_minutes()))
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(self) -> u32 {
        match self {
            Self::Manicure => 30,
            Self::Pedicure => 45,
            Self::Gel => 60,
            Self::Acrylic => 75,
            Self::NailArt | Self::MushroomDesign => 90,
        }
    }

    /// Average walk-in wait estimate surfaced to customers, in minutes.
    pub fn average_wait_minutes(self) -> u32 {
        match self {
            Self::Manicure => 10,
            Self::Pedicure => 15,
            Self::Gel => 20,
            Self::Acrylic => 25,
            Self::NailArt | Self::MushroomDesign => 30,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manicure => "manicure",
            Self::Pedicure => "pedicure",
            Self::Gel => "gel",
            Self::Acrylic => "acrylic",
            Self::NailArt => "nail-art",
            Self::MushroomDesign => "mushroom-design",
        };
        write!(f, "{name}")
    }
}

/// Opening hours for a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    /// Opening time.
    #[schema(value_type = String, example = "09:00:00")]
    pub open: NaiveTime,
    /// Closing time; no appointment may run past it.
    #[schema(value_type = String, example = "18:00:00")]
    pub close: NaiveTime,
    /// When set, the salon takes no bookings that day.
    pub closed: bool,
}

/// Validation error for weekly hours updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursValidationError {
    /// The weekday whose hours are inconsistent.
    pub day: Weekday,
}

impl fmt::Display for HoursValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opening time must precede closing time on {}", self.day)
    }
}

impl std::error::Error for HoursValidationError {}

/// The salon's weekly opening schedule.
///
/// # Examples
/// ```
/// use backend::domain::WeeklyHours;
/// use chrono::Weekday;
///
/// let hours = WeeklyHours::default();
/// assert!(hours.day(Weekday::Sun).closed);
/// assert!(!hours.day(Weekday::Fri).closed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHours {
    /// Monday hours.
    pub monday: DayHours,
    /// Tuesday hours.
    pub tuesday: DayHours,
    /// Wednesday hours.
    pub wednesday: DayHours,
    /// Thursday hours.
    pub thursday: DayHours,
    /// Friday hours.
    pub friday: DayHours,
    /// Saturday hours.
    pub saturday: DayHours,
    /// Sunday hours.
    pub sunday: DayHours,
}

const fn day_hours(open: NaiveTime, close: NaiveTime, closed: bool) -> DayHours {
    DayHours { open, close, closed }
}

const fn time(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(t) => t,
        None => panic!("static schedule times are valid"),
    }
}

impl Default for WeeklyHours {
    fn default() -> Self {
        Self {
            monday: day_hours(time(9, 0), time(18, 0), false),
            tuesday: day_hours(time(9, 0), time(18, 0), false),
            wednesday: day_hours(time(9, 0), time(18, 0), false),
            thursday: day_hours(time(9, 0), time(18, 0), false),
            friday: day_hours(time(9, 0), time(19, 0), false),
            saturday: day_hours(time(10, 0), time(17, 0), false),
            sunday: day_hours(time(12, 0), time(16, 0), true),
        }
    }
}

impl WeeklyHours {
    /// Hours for the given weekday.
    pub fn day(&self, weekday: Weekday) -> DayHours {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Validate that every open day opens before it closes.
    pub fn validate(&self) -> Result<(), HoursValidationError> {
        let days = [
            (Weekday::Mon, self.monday),
            (Weekday::Tue, self.tuesday),
            (Weekday::Wed, self.wednesday),
            (Weekday::Thu, self.thursday),
            (Weekday::Fri, self.friday),
            (Weekday::Sat, self.saturday),
            (Weekday::Sun, self.sunday),
        ];
        for (day, hours) in days {
            if !hours.closed && hours.open >= hours.close {
                return Err(HoursValidationError { day });
            }
        }
        Ok(())
    }
}

/// A bookable starting time on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Start of the slot.
    #[schema(value_type = String, example = "09:30:00")]
    pub start: NaiveTime,
    /// Minutes the service occupies from `start`.
    pub duration_minutes: u32,
}

fn starts_during_lunch(start: NaiveTime) -> bool {
    start >= LUNCH_START && start < LUNCH_END
}

/// Round `now` up to the next slot boundary on the booking grid.
fn align_to_grid(now: NaiveDateTime) -> NaiveDateTime {
    let minute = now.time().minute_of_day();
    let aligned = minute.next_multiple_of(SLOT_INTERVAL_MINUTES);
    let base = now.date().and_time(NaiveTime::MIN);
    base + TimeDelta::minutes(i64::from(aligned))
}

trait MinuteOfDay {
    fn minute_of_day(&self) -> u32;
}

impl MinuteOfDay for NaiveTime {
    fn minute_of_day(&self) -> u32 {
        use chrono::Timelike;
        self.hour() * 60 + self.minute() + u32::from(self.second() > 0)
    }
}

/// Enumerate the open slots for `service` on `date`.
///
/// Candidates start every [`SLOT_INTERVAL_MINUTES`] from opening time; a
/// candidate survives when the full service duration fits before closing,
/// the start is outside the lunch window, the start is not in the past
/// (relative to `now`, for same-day queries), and the occupied interval does
/// not overlap an existing appointment on that date.
pub fn available_slots(
    hours: &WeeklyHours,
    date: NaiveDate,
    service: ServiceType,
    booked: &[Appointment],
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    let day = hours.day(date.weekday());
    if day.closed {
        return Vec::new();
    }

    let duration = service.duration();
    let open_at = date.and_time(day.open);
    let close_at = date.and_time(day.close);

    let mut cursor = if date == now.date() && now > open_at {
        align_to_grid(now)
    } else {
        open_at
    };

    let occupied: Vec<(NaiveDateTime, NaiveDateTime)> = booked
        .iter()
        .filter(|appointment| appointment.date == date)
        .map(|appointment| {
            let start = appointment.start();
            (start, start + appointment.service_type.duration())
        })
        .collect();

    let step = TimeDelta::minutes(i64::from(SLOT_INTERVAL_MINUTES));
    let mut slots = Vec::new();
    while cursor + duration <= close_at {
        if starts_during_lunch(cursor.time()) {
            cursor += step;
            continue;
        }

        let slot_end = cursor + duration;
        let clear = occupied
            .iter()
            .all(|(start, end)| !(cursor < *end && slot_end > *start));
        if clear {
            slots.push(TimeSlot {
                start: cursor.time(),
                duration_minutes: service.duration_minutes(),
            });
        }

        cursor += step;
    }

    slots
}

#[cfg(test)]
#[path = "scheduling_tests.rs"]
mod tests;

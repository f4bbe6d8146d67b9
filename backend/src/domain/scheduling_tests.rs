//! Regression coverage for slot availability computation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::appointment::{Appointment, PaymentStatus};
use crate::domain::phone::PhoneNumber;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn hms(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_time(hms(h, m))
}

/// Monday 2025-06-02; default hours are 09:00-18:00.
fn monday() -> NaiveDate {
    date(2025, 6, 2)
}

fn booked(day: NaiveDate, h: u32, m: u32, service: ServiceType) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        client_name: "Dana".to_owned(),
        client_email: "dana@example.com".to_owned(),
        client_phone: PhoneNumber::new("5555551234").expect("valid phone"),
        date: day,
        time: hms(h, m),
        service_type: service,
        service_price_cents: 5000,
        amount_paid_cents: 0,
        payment_status: PaymentStatus::Unpaid,
        created_at: Utc::now(),
    }
}

fn starts(slots: &[TimeSlot]) -> Vec<NaiveTime> {
    slots.iter().map(|slot| slot.start).collect()
}

#[test]
fn closed_day_yields_no_slots() {
    let sunday = date(2025, 6, 1);
    let slots = available_slots(
        &WeeklyHours::default(),
        sunday,
        ServiceType::Manicure,
        &[],
        at(date(2025, 5, 1), 8, 0),
    );
    assert!(slots.is_empty());
}

#[test]
fn empty_day_enumerates_the_grid_minus_lunch() {
    let slots = available_slots(
        &WeeklyHours::default(),
        monday(),
        ServiceType::Manicure,
        &[],
        at(date(2025, 5, 1), 8, 0),
    );
    let times = starts(&slots);

    assert_eq!(times.first(), Some(&hms(9, 0)));
    // 30-minute service: the last slot starts half an hour before close.
    assert_eq!(times.last(), Some(&hms(17, 30)));
    // Lunch window starts are excluded, the 13:30 boundary is not.
    assert!(!times.contains(&hms(12, 30)));
    assert!(!times.contains(&hms(13, 0)));
    assert!(times.contains(&hms(13, 30)));
    // 09:00-18:00 is 18 grid points; two fall inside lunch.
    assert_eq!(times.len(), 16);
}

#[test]
fn long_services_must_fit_before_close() {
    let slots = available_slots(
        &WeeklyHours::default(),
        monday(),
        ServiceType::NailArt,
        &[],
        at(date(2025, 5, 1), 8, 0),
    );
    let times = starts(&slots);
    // A 90-minute service can start no later than 16:30.
    assert_eq!(times.last(), Some(&hms(16, 30)));
    assert!(!times.contains(&hms(17, 0)));
}

#[rstest]
// A 60-minute booking at 10:00 blocks candidates whose interval would
// overlap 10:00-11:00 for a 60-minute query.
#[case(hms(9, 0), false)]
#[case(hms(9, 30), true)]
#[case(hms(10, 0), true)]
#[case(hms(10, 30), true)]
#[case(hms(11, 0), false)]
fn overlapping_slots_are_excluded(#[case] slot: NaiveTime, #[case] blocked: bool) {
    let existing = vec![booked(monday(), 10, 0, ServiceType::Gel)];
    let slots = available_slots(
        &WeeklyHours::default(),
        monday(),
        ServiceType::Gel,
        &existing,
        at(date(2025, 5, 1), 8, 0),
    );
    assert_eq!(!starts(&slots).contains(&slot), blocked, "slot {slot}");
}

#[test]
fn bookings_on_other_days_do_not_block() {
    let existing = vec![booked(date(2025, 6, 3), 10, 0, ServiceType::Gel)];
    let slots = available_slots(
        &WeeklyHours::default(),
        monday(),
        ServiceType::Gel,
        &existing,
        at(date(2025, 5, 1), 8, 0),
    );
    assert!(starts(&slots).contains(&hms(10, 0)));
}

#[test]
fn same_day_queries_round_up_past_the_current_time() {
    let slots = available_slots(
        &WeeklyHours::default(),
        monday(),
        ServiceType::Manicure,
        &[],
        at(monday(), 10, 40),
    );
    let times = starts(&slots);
    assert_eq!(times.first(), Some(&hms(11, 0)));
    assert!(!times.contains(&hms(10, 30)));
}

#[test]
fn same_day_queries_before_opening_start_at_opening() {
    let slots = available_slots(
        &WeeklyHours::default(),
        monday(),
        ServiceType::Manicure,
        &[],
        at(monday(), 7, 15),
    );
    assert_eq!(starts(&slots).first(), Some(&hms(9, 0)));
}

#[test]
fn friday_evening_hours_extend_the_grid() {
    let friday = date(2025, 6, 6);
    let slots = available_slots(
        &WeeklyHours::default(),
        friday,
        ServiceType::Manicure,
        &[],
        at(date(2025, 5, 1), 8, 0),
    );
    assert_eq!(starts(&slots).last(), Some(&hms(18, 30)));
}

#[test]
fn fully_booked_day_yields_nothing() {
    // Two 90-minute blocks plus strategic bookings covering the whole grid.
    let existing: Vec<Appointment> = (0..18)
        .map(|i| {
            let minute = i * 30;
            booked(
                monday(),
                9 + minute / 60,
                minute % 60,
                ServiceType::Manicure,
            )
        })
        .collect();
    let slots = available_slots(
        &WeeklyHours::default(),
        monday(),
        ServiceType::Manicure,
        &existing,
        at(date(2025, 5, 1), 8, 0),
    );
    assert!(slots.is_empty());
}

#[test]
fn hours_validation_flags_inverted_days() {
    let mut hours = WeeklyHours::default();
    hours.tuesday.open = hms(20, 0);
    let err = hours.validate().expect_err("inverted hours fail");
    assert_eq!(err.day, chrono::Weekday::Tue);
}

#[rstest]
#[case(ServiceType::Manicure, 30, 10)]
#[case(ServiceType::Pedicure, 45, 15)]
#[case(ServiceType::Gel, 60, 20)]
#[case(ServiceType::Acrylic, 75, 25)]
#[case(ServiceType::NailArt, 90, 30)]
#[case(ServiceType::MushroomDesign, 90, 30)]
fn service_catalogue_durations(
    #[case] service: ServiceType,
    #[case] minutes: u32,
    #[case] wait: u32,
) {
    assert_eq!(service.duration_minutes(), minutes);
    assert_eq!(service.average_wait_minutes(), wait);
}

#[test]
fn service_type_wire_names_are_kebab_case() {
    let json = serde_json::to_string(&ServiceType::MushroomDesign).expect("serialise");
    assert_eq!(json, "\"mushroom-design\"");
    let back: ServiceType = serde_json::from_str("\"nail-art\"").expect("deserialise");
    assert_eq!(back, ServiceType::NailArt);
}

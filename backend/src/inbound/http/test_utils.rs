//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{TimeZone, Utc};

use crate::domain::{AuthPolicy, AuthService, MessagingService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryAppointmentRepository, InMemoryChatRepository, InMemoryCommunicationLog,
    InMemoryCustomerRepository, InMemoryFinanceLedger, InMemoryGalleryRepository,
    InMemoryPromoRepository, InMemorySessionStore, InMemorySettingsRepository,
    InMemoryUserDirectory, InMemoryVerificationStore,
};
use crate::test_support::{MutableClock, RecordingSmsNotifier, SequenceCodeIssuer};

/// Clock shared by handler tests, frozen at a Monday morning.
pub fn test_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0)
            .single()
            .expect("fixture instant"),
    ))
}

/// Fully wired in-memory state with a seeded login directory and a scripted
/// verification code sequence.
pub fn test_state(codes: &[&str]) -> web::Data<HttpState> {
    test_state_with_clock(codes, test_clock())
}

/// Same as [`test_state`] but sharing the caller's clock.
pub fn test_state_with_clock(codes: &[&str], clock: Arc<MutableClock>) -> web::Data<HttpState> {
    let directory = Arc::new(InMemoryUserDirectory::seeded());
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let chats = Arc::new(InMemoryChatRepository::new());

    let auth = AuthService::new(
        directory.clone(),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryVerificationStore::new()),
        Arc::new(RecordingSmsNotifier::new()),
        Arc::new(SequenceCodeIssuer::new(codes)),
        clock.clone(),
        AuthPolicy::default(),
    );
    let messaging = MessagingService::new(chats, customers.clone(), clock.clone());

    web::Data::new(HttpState {
        auth: Arc::new(auth),
        messaging: Arc::new(messaging),
        appointments: Arc::new(InMemoryAppointmentRepository::new()),
        customers,
        promos: Arc::new(InMemoryPromoRepository::new()),
        finance: Arc::new(InMemoryFinanceLedger::new()),
        communications: Arc::new(InMemoryCommunicationLog::new()),
        gallery: Arc::new(InMemoryGalleryRepository::new()),
        media: Arc::new(crate::domain::ports::FixtureMediaStore),
        settings: Arc::new(InMemorySettingsRepository::new()),
        directory,
        clock,
    })
}

/// Build a JSON POST request.
pub fn post_json(uri: &str, body: &serde_json::Value) -> actix_http::Request {
    actix_web::test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request()
}

/// Build a POST request carrying a bearer token and no body.
pub fn post_bearer(uri: &str, token: &str) -> actix_http::Request {
    actix_web::test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request()
}

/// Build a GET request.
pub fn get(uri: &str) -> actix_http::Request {
    actix_web::test::TestRequest::get().uri(uri).to_request()
}

/// Build a JSON PUT request.
pub fn put_json(uri: &str, body: &serde_json::Value) -> actix_http::Request {
    actix_web::test::TestRequest::put()
        .uri(uri)
        .set_json(body)
        .to_request()
}

/// Build a DELETE request.
pub fn delete(uri: &str) -> actix_http::Request {
    actix_web::test::TestRequest::delete().uri(uri).to_request()
}

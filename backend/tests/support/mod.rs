//! Shared harness wiring the full application for integration tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};

use backend::Trace;
use backend::domain::{AuthPolicy, AuthService, MessagingService};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{
    appointments, availability, chats, communications, customers, finances, gallery, login,
    payments, promos, settings,
};
use backend::outbound::memory::{
    InMemoryAppointmentRepository, InMemoryChatRepository, InMemoryCommunicationLog,
    InMemoryCustomerRepository, InMemoryFinanceLedger, InMemoryGalleryRepository,
    InMemoryPromoRepository, InMemorySessionStore, InMemorySettingsRepository,
    InMemoryUserDirectory, InMemoryVerificationStore,
};
use backend::test_support::{MutableClock, RecordingSmsNotifier, SequenceCodeIssuer};

/// Fully wired in-memory application state plus the doubles the tests steer.
pub struct Harness {
    pub state: web::Data<HttpState>,
    pub clock: Arc<MutableClock>,
    pub sms: Arc<RecordingSmsNotifier>,
}

/// Build the harness with a scripted verification code sequence.
pub fn harness(codes: &[&str]) -> Harness {
    let clock = Arc::new(MutableClock::new(
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0)
            .single()
            .expect("fixture instant"),
    ));
    let sms = Arc::new(RecordingSmsNotifier::new());
    let directory = Arc::new(InMemoryUserDirectory::seeded());
    let customers = Arc::new(InMemoryCustomerRepository::new());

    let auth = AuthService::new(
        directory.clone(),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryVerificationStore::new()),
        sms.clone(),
        Arc::new(SequenceCodeIssuer::new(codes)),
        clock.clone(),
        AuthPolicy::default(),
    );
    let messaging = MessagingService::new(
        Arc::new(InMemoryChatRepository::new()),
        customers.clone(),
        clock.clone(),
    );

    let state = web::Data::new(HttpState {
        auth: Arc::new(auth),
        messaging: Arc::new(messaging),
        appointments: Arc::new(InMemoryAppointmentRepository::new()),
        customers,
        promos: Arc::new(InMemoryPromoRepository::new()),
        finance: Arc::new(InMemoryFinanceLedger::new()),
        communications: Arc::new(InMemoryCommunicationLog::new()),
        gallery: Arc::new(InMemoryGalleryRepository::new()),
        media: Arc::new(backend::domain::ports::FixtureMediaStore),
        settings: Arc::new(InMemorySettingsRepository::new()),
        directory,
        clock: clock.clone(),
    });

    Harness { state, clock, sms }
}

/// Build the application with the same route layout the server uses.
pub fn full_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(
            web::scope("/api/auth")
                .service(login::login)
                .service(login::verify)
                .service(login::resend)
                .service(login::verify_token)
                .service(login::logout),
        )
        .service(login::status)
        .service(
            web::scope("/api/appointments")
                .service(availability::list_availability)
                .service(appointments::list_appointments)
                .service(appointments::create_appointment)
                .service(appointments::update_appointment_payment)
                .service(appointments::update_appointment)
                .service(appointments::delete_appointment),
        )
        .service(
            web::scope("/api/customers")
                .service(customers::list_customers)
                .service(customers::create_customer)
                .service(customers::update_customer)
                .service(customers::delete_customer),
        )
        .service(
            web::scope("/api/finances")
                .service(finances::get_finances)
                .service(finances::record_transaction),
        )
        .service(
            web::scope("/api/promo-codes")
                .service(promos::send_promo)
                .service(promos::list_promos)
                .service(promos::create_promo)
                .service(promos::update_promo)
                .service(promos::delete_promo),
        )
        .service(
            web::scope("/api/communications")
                .service(communications::list_communications)
                .service(communications::create_communication),
        )
        .service(
            web::scope("/api/gallery")
                .service(gallery::list_photos)
                .service(gallery::register_photo)
                .service(gallery::delete_photo)
                .service(gallery::list_videos)
                .service(gallery::register_video)
                .service(gallery::delete_video),
        )
        .service(
            web::scope("/api/settings")
                .service(settings::get_working_hours)
                .service(settings::update_working_hours),
        )
        .service(
            web::scope("/api")
                .service(payments::list_payments)
                .service(payments::send_payment_reminder)
                .service(payments::send_bulk_payment_reminders)
                .service(payments::get_payment_settings)
                .service(payments::update_payment_settings)
                .service(payments::connect_applepay)
                .service(payments::connect_cashapp)
                .service(payments::connect_venmo),
        )
        .service(
            web::scope("/chats")
                .service(chats::search_chats)
                .service(chats::list_chats)
                .service(chats::open_chat)
                .service(chats::mark_chat_read)
                .service(chats::list_chat_messages)
                .service(chats::get_chat)
                .service(chats::delete_chat),
        )
        .service(chats::post_message)
}

/// Build a JSON POST request.
pub fn post_json(uri: &str, body: &serde_json::Value) -> actix_http::Request {
    actix_web::test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request()
}

/// Build a JSON PUT request.
pub fn put_json(uri: &str, body: &serde_json::Value) -> actix_http::Request {
    actix_web::test::TestRequest::put()
        .uri(uri)
        .set_json(body)
        .to_request()
}

/// Build a GET request.
pub fn get(uri: &str) -> actix_http::Request {
    actix_web::test::TestRequest::get().uri(uri).to_request()
}

/// Build a DELETE request.
pub fn delete(uri: &str) -> actix_http::Request {
    actix_web::test::TestRequest::delete().uri(uri).to_request()
}

/// Build a POST request carrying a bearer token and no body.
pub fn post_bearer(uri: &str, token: &str) -> actix_http::Request {
    actix_web::test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request()
}

//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{AuthPolicy, AuthService, MessagingService};
use backend::inbound::http::health::{HealthState, live, ready};
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
use backend::outbound::random::RandomCodeIssuer;
use backend::outbound::sms::LoggingSmsNotifier;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the in-memory adapters and domain services into handler state.
///
/// The login directory starts from the stock seeded accounts, everything
/// else starts empty.
pub fn build_state(auth_policy: AuthPolicy) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let directory = Arc::new(InMemoryUserDirectory::seeded());
    let customers = Arc::new(InMemoryCustomerRepository::new());

    let auth = AuthService::new(
        directory.clone(),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryVerificationStore::new()),
        Arc::new(LoggingSmsNotifier::new()),
        Arc::new(RandomCodeIssuer::new()),
        clock.clone(),
        auth_policy,
    );
    let messaging = MessagingService::new(
        Arc::new(InMemoryChatRepository::new()),
        customers.clone(),
        clock.clone(),
    );

    web::Data::new(HttpState {
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
        clock,
    })
}

fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .app_data(health_state)
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
        // Registered after the specific /api/* scopes so they win on prefix.
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
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let state = build_state(config.auth_policy);

    let server = HttpServer::new(move || {
        build_app(state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

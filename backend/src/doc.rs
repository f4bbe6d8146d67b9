//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every endpoint from the inbound layer plus the domain
//! schemas they reference. Swagger UI serves the document in debug builds.

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::Modify;

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Nail studio backend API",
        description = "HTTP interface for the salon dashboard: bookings, \
                       customers, finances, promos, gallery, chat, and the \
                       phone + SMS-code login flow."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::login::verify,
        crate::inbound::http::login::resend,
        crate::inbound::http::login::verify_token,
        crate::inbound::http::login::logout,
        crate::inbound::http::login::status,
        crate::inbound::http::appointments::list_appointments,
        crate::inbound::http::appointments::create_appointment,
        crate::inbound::http::appointments::update_appointment,
        crate::inbound::http::appointments::delete_appointment,
        crate::inbound::http::appointments::update_appointment_payment,
        crate::inbound::http::availability::list_availability,
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::update_customer,
        crate::inbound::http::customers::delete_customer,
        crate::inbound::http::finances::get_finances,
        crate::inbound::http::finances::record_transaction,
        crate::inbound::http::promos::list_promos,
        crate::inbound::http::promos::create_promo,
        crate::inbound::http::promos::update_promo,
        crate::inbound::http::promos::delete_promo,
        crate::inbound::http::promos::send_promo,
        crate::inbound::http::communications::list_communications,
        crate::inbound::http::communications::create_communication,
        crate::inbound::http::payments::list_payments,
        crate::inbound::http::payments::send_payment_reminder,
        crate::inbound::http::payments::send_bulk_payment_reminders,
        crate::inbound::http::payments::get_payment_settings,
        crate::inbound::http::payments::update_payment_settings,
        crate::inbound::http::payments::connect_applepay,
        crate::inbound::http::payments::connect_cashapp,
        crate::inbound::http::payments::connect_venmo,
        crate::inbound::http::gallery::list_photos,
        crate::inbound::http::gallery::register_photo,
        crate::inbound::http::gallery::delete_photo,
        crate::inbound::http::gallery::list_videos,
        crate::inbound::http::gallery::register_video,
        crate::inbound::http::gallery::delete_video,
        crate::inbound::http::chats::list_chats,
        crate::inbound::http::chats::open_chat,
        crate::inbound::http::chats::search_chats,
        crate::inbound::http::chats::get_chat,
        crate::inbound::http::chats::mark_chat_read,
        crate::inbound::http::chats::list_chat_messages,
        crate::inbound::http::chats::delete_chat,
        crate::inbound::http::chats::post_message,
        crate::inbound::http::settings::get_working_hours,
        crate::inbound::http::settings::update_working_hours,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::Appointment,
        crate::domain::PaymentStatus,
        crate::domain::ServiceType,
        crate::domain::Customer,
        crate::domain::PromoCode,
        crate::domain::FinanceLedger,
        crate::domain::Transaction,
        crate::domain::TransactionKind,
        crate::domain::Communication,
        crate::domain::CommunicationKind,
        crate::domain::PaymentSettings,
        crate::domain::PaymentIntegrations,
        crate::domain::IntegrationState,
        crate::domain::GalleryMedia,
        crate::domain::MediaKind,
        crate::domain::SocialPlatform,
        crate::domain::Chat,
        crate::domain::ChatMessage,
        crate::domain::MessageAttachment,
        crate::domain::MessageStatus,
        crate::domain::WeeklyHours,
        crate::domain::DayHours,
        crate::domain::PhoneNumber,
    )),
    tags(
        (name = "auth", description = "Phone + SMS-code login flow"),
        (name = "appointments", description = "Bookings and slot availability"),
        (name = "customers", description = "Customer records"),
        (name = "finances", description = "Revenue and expense ledger"),
        (name = "promos", description = "Promo codes and distribution"),
        (name = "communications", description = "Outbound message log"),
        (name = "payments", description = "Payment views, reminders, and settings"),
        (name = "gallery", description = "Gallery media metadata"),
        (name = "chats", description = "Customer chat threads"),
        (name = "settings", description = "Owner-adjustable settings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

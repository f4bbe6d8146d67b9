//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP adapter
//! and the in-memory stores. Keep types immutable where possible and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.

pub mod appointment;
pub mod auth;
pub mod auth_service;
pub mod billing;
pub mod chat;
pub mod chat_service;
pub mod communication;
pub mod customer;
pub mod error;
pub mod finance;
pub mod gallery;
pub mod phone;
pub mod ports;
pub mod promo;
pub mod scheduling;

pub use self::appointment::{
    Appointment, AppointmentDraft, AppointmentValidationError, PaymentStatus,
};
pub use self::auth::{
    AccountRole, AuthPolicy, CodeValidationError, LoginCredentials, LoginSession,
    LoginValidationError, PendingVerification, SessionToken, UserAccount, VerificationCode,
};
pub use self::auth_service::{AuthService, LoginChallenge, VerifiedLogin};
pub use self::billing::{
    IntegrationState, PaymentIntegrations, PaymentSettings, PaymentSettingsUpdate,
};
pub use self::chat::{
    ADMIN_SENDER, Chat, ChatMessage, MessageAttachment, MessageDraft, MessageStatus,
    MessageValidationError,
};
pub use self::chat_service::MessagingService;
pub use self::communication::{Communication, CommunicationKind};
pub use self::customer::{Customer, CustomerDraft, CustomerValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::finance::{
    FinanceLedger, Transaction, TransactionKind, TransactionValidationError, format_usd,
};
pub use self::gallery::{
    GalleryDraft, GalleryMedia, GalleryValidationError, MediaKind, SocialPlatform,
};
pub use self::phone::{PhoneNumber, PhoneValidationError};
pub use self::promo::{PromoCode, PromoDraft, PromoValidationError};
pub use self::scheduling::{
    DayHours, HoursValidationError, ServiceType, TimeSlot, WeeklyHours, available_slots,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

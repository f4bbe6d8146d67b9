//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AppointmentRepository, CommunicationLog, CustomerRepository, FinanceLedgerStore,
    GalleryRepository, MediaStore, PromoRepository, SettingsRepository, UserDirectory,
};
use crate::domain::{AuthService, MessagingService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login flow service.
    pub auth: Arc<AuthService>,
    /// Chat orchestration service.
    pub messaging: Arc<MessagingService>,
    /// Appointment storage.
    pub appointments: Arc<dyn AppointmentRepository>,
    /// Customer storage.
    pub customers: Arc<dyn CustomerRepository>,
    /// Promo code storage.
    pub promos: Arc<dyn PromoRepository>,
    /// Finance ledger.
    pub finance: Arc<dyn FinanceLedgerStore>,
    /// Outbound communications log.
    pub communications: Arc<dyn CommunicationLog>,
    /// Gallery metadata storage.
    pub gallery: Arc<dyn GalleryRepository>,
    /// External media file store.
    pub media: Arc<dyn MediaStore>,
    /// Owner-adjustable settings.
    pub settings: Arc<dyn SettingsRepository>,
    /// Login account directory, for the status endpoint.
    pub directory: Arc<dyn UserDirectory>,
    /// Wall clock shared with the domain services.
    pub clock: Arc<dyn Clock>,
}

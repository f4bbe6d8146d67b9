//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_repository;
mod chat_repository;
mod code_issuer;
mod communication_log;
mod customer_repository;
mod finance_ledger;
mod gallery_repository;
mod media_store;
mod promo_repository;
mod session_store;
mod settings_repository;
mod sms_notifier;
mod user_directory;
mod verification_store;

#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{
    AppointmentRepository, AppointmentRepositoryError, FixtureAppointmentRepository,
};
#[cfg(test)]
pub use chat_repository::MockChatRepository;
pub use chat_repository::{ChatRepository, ChatRepositoryError, FixtureChatRepository};
#[cfg(test)]
pub use code_issuer::MockCodeIssuer;
pub use code_issuer::{CodeIssuer, FixtureCodeIssuer};
#[cfg(test)]
pub use communication_log::MockCommunicationLog;
pub use communication_log::{CommunicationLog, CommunicationLogError, FixtureCommunicationLog};
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{
    CustomerRepository, CustomerRepositoryError, FixtureCustomerRepository,
};
#[cfg(test)]
pub use finance_ledger::MockFinanceLedgerStore;
pub use finance_ledger::{FinanceLedgerError, FinanceLedgerStore, FixtureFinanceLedgerStore};
#[cfg(test)]
pub use gallery_repository::MockGalleryRepository;
pub use gallery_repository::{FixtureGalleryRepository, GalleryRepository, GalleryRepositoryError};
#[cfg(test)]
pub use media_store::MockMediaStore;
pub use media_store::{FixtureMediaStore, MediaStore, MediaStoreError};
#[cfg(test)]
pub use promo_repository::MockPromoRepository;
pub use promo_repository::{FixturePromoRepository, PromoRepository, PromoRepositoryError};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{FixtureSessionStore, SessionStore, SessionStoreError};
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
pub use settings_repository::{
    FixtureSettingsRepository, SettingsRepository, SettingsRepositoryError,
};
#[cfg(test)]
pub use sms_notifier::MockSmsNotifier;
pub use sms_notifier::{FixtureSmsNotifier, SmsDeliveryError, SmsNotifier};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use verification_store::MockVerificationStore;
pub use verification_store::{
    FixtureVerificationStore, VerificationStore, VerificationStoreError,
};

//! In-memory adapters backing every persistence port.
//!
//! All application state is process-local; a restart loses everything.
//! Each adapter guards its rows with a `std::sync::RwLock` so the actix
//! worker pool can share one instance.

mod appointments;
mod chats;
mod communications;
mod customers;
mod finance;
mod gallery;
mod promos;
mod sessions;
mod settings;
mod users;

pub use appointments::InMemoryAppointmentRepository;
pub use chats::InMemoryChatRepository;
pub use communications::InMemoryCommunicationLog;
pub use customers::InMemoryCustomerRepository;
pub use finance::InMemoryFinanceLedger;
pub use gallery::InMemoryGalleryRepository;
pub use promos::InMemoryPromoRepository;
pub use sessions::{InMemorySessionStore, InMemoryVerificationStore};
pub use settings::InMemorySettingsRepository;
pub use users::InMemoryUserDirectory;

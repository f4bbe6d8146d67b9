//! Nail salon management backend.
//!
//! A JSON/REST service for a small salon business: appointment booking with
//! slot availability, customer records, finances, promo codes, gallery
//! metadata, customer chat, and a phone + SMS-code two-factor login flow.
//!
//! The crate follows a hexagonal layout: domain types and services behind
//! ports ([`domain`]), HTTP inbound adapters ([`inbound`]), and in-memory
//! outbound adapters ([`outbound`]). All state is process-local; a restart
//! loses everything.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

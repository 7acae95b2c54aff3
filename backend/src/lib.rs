//! Work and department tracking behind cookie sessions.
//!
//! Layout follows a hexagonal split: [`domain`] holds records, validation,
//! the ownership guard and the services; [`inbound`] adapts them to HTTP;
//! [`outbound`] stores them in PostgreSQL or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

//! HTTP adapter for registration endpoints.
//!
//! Exposes the registration domain via REST API:
//! - `POST /api/registrations` - Register a new gym member

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::RegistrationAppState;
pub use routes::registration_routes;

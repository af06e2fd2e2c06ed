//! HTTP adapters - REST API implementations.

pub mod health;
pub mod registration;

// Re-export key types for convenience
pub use registration::registration_routes;
pub use registration::RegistrationAppState;

//! Axum router configuration for registration endpoints.

use axum::{routing::post, Router};

use super::handlers::{register_member, RegistrationAppState};

/// Create the registration API router.
///
/// # Routes
/// - `POST /` - Register a new gym member
///
/// Suitable for mounting at `/api/registrations`.
pub fn registration_routes() -> Router<RegistrationAppState> {
    Router::new().route("/", post(register_member))
}

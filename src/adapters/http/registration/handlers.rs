//! HTTP handlers for registration endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json, Request, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;

use crate::application::handlers::registration::{RegisterMemberCommand, RegisterMemberHandler};
use crate::domain::registration::{RegistrationError, RegistrationPolicy};
use crate::ports::{AccountStore, Clock, PasswordHasher};

use super::dto::{ErrorResponse, RegisterMemberDto, RegisterMemberResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all registration dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct RegistrationAppState {
    pub account_store: Arc<dyn AccountStore>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
    pub policy: RegistrationPolicy,
}

impl RegistrationAppState {
    /// Create handlers on demand from the shared state.
    pub fn register_member_handler(&self) -> RegisterMemberHandler {
        RegisterMemberHandler::new(
            self.account_store.clone(),
            self.password_hasher.clone(),
            self.clock.clone(),
            self.policy.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request Extraction
// ════════════════════════════════════════════════════════════════════════════════

/// JSON extractor whose rejections render as the API error body.
///
/// The stock `Json` extractor answers malformed bodies (bad JSON, a
/// `paymentMethod` outside the enum) with a 422 and a plain-text message;
/// this wrapper folds them into the same `{"error": ...}` shape every
/// validation failure uses.
pub struct ApiJson<T>(pub T);

/// Rejection type for `ApiJson` extraction.
pub struct MalformedBody(JsonRejection);

impl IntoResponse for MalformedBody {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse::new(self.0.body_text());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[async_trait::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = MalformedBody;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(MalformedBody(rejection)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/registrations - Register a new gym member.
pub async fn register_member(
    State(state): State<RegistrationAppState>,
    ApiJson(body): ApiJson<RegisterMemberDto>,
) -> Result<impl IntoResponse, RegistrationApiError> {
    let handler = state.register_member_handler();
    let cmd = RegisterMemberCommand {
        request: body.into_domain(),
    };

    let result = handler.handle(cmd).await?;

    let response = RegisterMemberResponse::from(&result);
    Ok((StatusCode::CREATED, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts registration errors to HTTP responses.
///
/// Only the public message ever reaches the wire. In particular, a duplicate
/// student id renders as the generic registration failure so the endpoint
/// cannot be used to probe which ids are already enrolled.
#[derive(Debug)]
pub struct RegistrationApiError(RegistrationError);

impl From<RegistrationError> for RegistrationApiError {
    fn from(err: RegistrationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RegistrationApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            RegistrationError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = ErrorResponse::new(self.0.public_message());
        (status, Json(body)).into_response()
    }
}

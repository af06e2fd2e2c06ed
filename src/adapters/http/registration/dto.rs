//! HTTP DTOs for the registration endpoint.
//!
//! Wire format is camelCase JSON. Every field is optional at the parse
//! stage; presence rules belong to the validator so that a missing field
//! produces the registration error taxonomy, not a framework 422.

use serde::{Deserialize, Serialize};

use crate::application::handlers::registration::RegisterMemberResult;
use crate::domain::registration::{
    EmergencyContact, MembershipType, PaymentMethod, RegistrationRequest,
};

/// Emergency contact as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyContactDto {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

impl From<EmergencyContactDto> for EmergencyContact {
    fn from(dto: EmergencyContactDto) -> Self {
        Self {
            name: dto.name,
            phone: dto.phone,
            relationship: dto.relationship,
        }
    }
}

/// POST /api/registrations request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMemberDto {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub membership_type: Option<String>,
    /// Parsed strictly; a value outside the enum is a malformed request.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub card_number: Option<String>,
    /// `MM/YY`.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub cvv: Option<String>,
    #[serde(default)]
    pub card_holder_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContactDto>,
    #[serde(default)]
    pub billing_address: Option<String>,
}

impl RegisterMemberDto {
    /// Lowers the DTO into the typed domain request. Absent required fields
    /// become empty strings, which the validator reports as missing.
    pub fn into_domain(self) -> RegistrationRequest {
        RegistrationRequest {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            student_id: self.student_id.unwrap_or_default(),
            membership_type: self.membership_type.unwrap_or_default(),
            payment_method: self.payment_method,
            card_number: self.card_number,
            card_expiry: self.expiry_date,
            card_cvv: self.cvv,
            card_holder_name: self.card_holder_name,
            phone: self.phone,
            emergency_contact: self.emergency_contact.map(EmergencyContact::from),
            billing_address: self.billing_address,
        }
    }
}

/// Successful registration response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMemberResponse {
    pub success: bool,
    pub account_id: String,
    pub payment_reference: String,
    /// Amount owed in whole SGD dollars.
    pub amount_due: i64,
    pub membership_type: MembershipType,
}

impl From<&RegisterMemberResult> for RegisterMemberResponse {
    fn from(result: &RegisterMemberResult) -> Self {
        Self {
            success: true,
            account_id: result.account.id.to_string(),
            payment_reference: result.account.payment_reference.to_string(),
            amount_due: result.intent.amount_cents / 100,
            membership_type: result.account.membership_type,
        }
    }
}

/// Error body: a single user-facing message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

//! Registration error taxonomy.
//!
//! Every failure mode of the intake flow is a value of this enum; nothing
//! on the request path panics. The HTTP adapter maps these onto status
//! codes, and `public_message` is the only text ever shown to the submitter.
//!
//! Note the asymmetry between the duplicate variants: a duplicate email is
//! reported directly (the submitter owns the address), but a duplicate
//! student id gets a generic message so the endpoint cannot be used to
//! probe which student ids are already registered.

/// Errors raised while validating and persisting a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A required field was absent or empty.
    MissingField(&'static str),

    /// Password shorter than the 6-character minimum.
    WeakPassword,

    /// Email is not a well-formed institutional address.
    InvalidEmailDomain,

    /// Student id is not 6-10 digits after trimming.
    InvalidStudentId,

    /// Membership type has no plan in the pricing table.
    UnknownMembershipType(String),

    /// Credit card selected but card number, expiry or CVV missing.
    MissingPaymentFields,

    /// Card number malformed or failing the Luhn checksum.
    InvalidCardNumber,

    /// Expiry not in MM/YY form.
    InvalidExpiryFormat,

    /// Card expiry is before the current month.
    CardExpired,

    /// CVV is not 3-4 digits.
    InvalidCvv,

    /// An account with this email already exists.
    DuplicateEmail,

    /// An account with this student id already exists.
    DuplicateStudentId,

    /// The store failed; the registration was rolled back.
    PersistenceFailure(String),
}

impl RegistrationError {
    pub fn missing_field(field: &'static str) -> Self {
        RegistrationError::MissingField(field)
    }

    pub fn unknown_membership_type(value: impl Into<String>) -> Self {
        RegistrationError::UnknownMembershipType(value.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        RegistrationError::PersistenceFailure(message.into())
    }

    /// Stable machine-readable code for logs and API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::MissingField(_) => "MISSING_FIELD",
            RegistrationError::WeakPassword => "WEAK_PASSWORD",
            RegistrationError::InvalidEmailDomain => "INVALID_EMAIL_DOMAIN",
            RegistrationError::InvalidStudentId => "INVALID_STUDENT_ID",
            RegistrationError::UnknownMembershipType(_) => "UNKNOWN_MEMBERSHIP_TYPE",
            RegistrationError::MissingPaymentFields => "MISSING_PAYMENT_FIELDS",
            RegistrationError::InvalidCardNumber => "INVALID_CARD_NUMBER",
            RegistrationError::InvalidExpiryFormat => "INVALID_EXPIRY_FORMAT",
            RegistrationError::CardExpired => "CARD_EXPIRED",
            RegistrationError::InvalidCvv => "INVALID_CVV",
            RegistrationError::DuplicateEmail => "DUPLICATE_EMAIL",
            RegistrationError::DuplicateStudentId => "DUPLICATE_STUDENT_ID",
            RegistrationError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Full internal message, suitable for logs only.
    pub fn message(&self) -> String {
        match self {
            RegistrationError::MissingField(field) => {
                format!("Required field '{}' is missing", field)
            }
            RegistrationError::WeakPassword => {
                "Password must be at least 6 characters long".to_string()
            }
            RegistrationError::InvalidEmailDomain => {
                "Email does not match the institutional domain".to_string()
            }
            RegistrationError::InvalidStudentId => {
                "Student ID must be 6-10 digits".to_string()
            }
            RegistrationError::UnknownMembershipType(value) => {
                format!("Unknown membership type: {}", value)
            }
            RegistrationError::MissingPaymentFields => {
                "Credit card number, expiry and CVV are required".to_string()
            }
            RegistrationError::InvalidCardNumber => {
                "Card number is malformed or fails the Luhn check".to_string()
            }
            RegistrationError::InvalidExpiryFormat => {
                "Card expiry must be in MM/YY format".to_string()
            }
            RegistrationError::CardExpired => "Card has expired".to_string(),
            RegistrationError::InvalidCvv => "CVV must be 3 or 4 digits".to_string(),
            RegistrationError::DuplicateEmail => {
                "An account with this email already exists".to_string()
            }
            RegistrationError::DuplicateStudentId => {
                "An account with this student ID already exists".to_string()
            }
            RegistrationError::PersistenceFailure(msg) => {
                format!("Persistence failure: {}", msg)
            }
        }
    }

    /// Message safe to return to the submitter.
    ///
    /// Duplicate student ids and persistence failures are deliberately
    /// collapsed into generic text.
    pub fn public_message(&self) -> &'static str {
        match self {
            RegistrationError::MissingField(_) => "All required fields must be provided",
            RegistrationError::WeakPassword => "Password must be at least 6 characters long",
            RegistrationError::InvalidEmailDomain => {
                "Please use your institutional email address"
            }
            RegistrationError::InvalidStudentId => {
                "Student ID must be 6-10 digits (e.g., 14742770)"
            }
            RegistrationError::UnknownMembershipType(_) => "Invalid membership type",
            RegistrationError::MissingPaymentFields => "Credit card information is required",
            RegistrationError::InvalidCardNumber => "Please enter a valid card number",
            RegistrationError::InvalidExpiryFormat => {
                "Please enter expiry date in MM/YY format"
            }
            RegistrationError::CardExpired => "Card has expired",
            RegistrationError::InvalidCvv => "Please enter a valid CVV",
            RegistrationError::DuplicateEmail => {
                "An account with this email already exists. Please use a different email or try logging in."
            }
            RegistrationError::DuplicateStudentId => {
                "An error occurred during registration. Please try again."
            }
            RegistrationError::PersistenceFailure(_) => "registration failed, please retry",
        }
    }

    /// Returns true if the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistrationError::PersistenceFailure(_))
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RegistrationError {}

//! Registration policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::registration::RegistrationPolicy;

/// Registration configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// Email domain applicants must register with
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

impl RegistrationConfig {
    /// Build the domain-level policy from this configuration
    pub fn policy(&self) -> RegistrationPolicy {
        RegistrationPolicy {
            email_domain: self.email_domain.clone(),
        }
    }

    /// Validate registration configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email_domain.is_empty() || !self.email_domain.contains('.') {
            return Err(ValidationError::InvalidEmailDomain);
        }
        Ok(())
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
        }
    }
}

fn default_email_domain() -> String {
    "my.jcu.edu.au".to_string()
}

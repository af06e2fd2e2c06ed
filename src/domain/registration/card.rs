//! Payment card validation: card number (Luhn), expiry, CVV.

use super::errors::RegistrationError;
use crate::domain::foundation::Timestamp;

/// Validates a card number: strips spaces, requires 13-19 digits and a
/// passing Luhn checksum. Returns the cleaned number.
pub fn validate_card_number(raw: &str) -> Result<String, RegistrationError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let digit_count_ok = (13..=19).contains(&cleaned.len());
    if !digit_count_ok || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(RegistrationError::InvalidCardNumber);
    }

    if !luhn_checksum_valid(&cleaned) {
        return Err(RegistrationError::InvalidCardNumber);
    }

    Ok(cleaned)
}

/// Luhn checksum: double every second digit from the right, subtract 9 when
/// the doubled value exceeds 9, sum everything; valid iff sum mod 10 == 0.
pub fn luhn_checksum_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;

    for c in digits.chars().rev() {
        let mut d = match c.to_digit(10) {
            Some(d) => d,
            None => return false,
        };
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }

    sum % 10 == 0
}

/// Validates an `MM/YY` expiry against the injected clock.
///
/// Format errors and expired cards are distinct failures. A card expiring
/// in the current month is still accepted. Two-digit years are compared
/// mod 100, same as they are printed on the card.
pub fn validate_expiry(raw: &str, now: Timestamp) -> Result<(), RegistrationError> {
    let (month, year) = parse_expiry(raw).ok_or(RegistrationError::InvalidExpiryFormat)?;

    let current_month = now.month();
    let current_year = now.two_digit_year();

    if year < current_year || (year == current_year && month < current_month) {
        return Err(RegistrationError::CardExpired);
    }

    Ok(())
}

fn parse_expiry(raw: &str) -> Option<(u32, u32)> {
    let (mm, yy) = raw.split_once('/')?;
    if mm.len() != 2 || yy.len() != 2 {
        return None;
    }
    if !mm.chars().all(|c| c.is_ascii_digit()) || !yy.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let month: u32 = mm.parse().ok()?;
    let year: u32 = yy.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    Some((month, year))
}

/// Validates a CVV: 3 or 4 digits.
pub fn validate_cvv(raw: &str) -> Result<(), RegistrationError> {
    let len_ok = raw.len() == 3 || raw.len() == 4;
    if !len_ok || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(RegistrationError::InvalidCvv);
    }
    Ok(())
}

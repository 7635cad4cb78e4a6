//! Pure validation rules for login input.
//!
//! These rules mirror the portal's own checks so bad input can be rejected
//! before a round-trip is attempted. Deterministic and side-effect free.

use crate::error::ValidationError;

/// Validates login input against the portal's credential rules.
///
/// Rules are checked in order and the first failure wins:
///
/// 1. All four fields must be non-empty (`MissingFields`)
/// 2. Username must be at least 3 characters (`InvalidUsername`)
/// 3. Password must be at least 6 characters (`WeakPassword`)
/// 4. Account ID must be exactly 12 decimal digits (`InvalidAccountId`)
pub fn validate_login(
    username: &str,
    password: &str,
    account_id: &str,
    region: &str,
) -> std::result::Result<(), ValidationError> {
    if username.is_empty() || password.is_empty() || account_id.is_empty() || region.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if username.chars().count() < 3 {
        return Err(ValidationError::InvalidUsername);
    }

    if password.chars().count() < 6 {
        return Err(ValidationError::WeakPassword);
    }

    if account_id.len() != 12 || !account_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidAccountId);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_login_passes() {
        assert_eq!(
            validate_login("alice", "secret1", "123456789012", "us-east-1"),
            Ok(())
        );
    }

    #[test]
    fn test_empty_fields_rejected_first() {
        // Even a short username loses to the emptiness check.
        assert_eq!(
            validate_login("", "x", "123", "us-east-1"),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_login("alice", "secret1", "123456789012", ""),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_short_username_rejected() {
        assert_eq!(
            validate_login("ab", "secret1", "123456789012", "us-east-1"),
            Err(ValidationError::InvalidUsername)
        );
    }

    #[test]
    fn test_short_password_rejected() {
        assert_eq!(
            validate_login("alice", "12345", "123456789012", "us-east-1"),
            Err(ValidationError::WeakPassword)
        );
    }

    #[test]
    fn test_account_id_must_be_twelve_digits() {
        assert_eq!(
            validate_login("alice", "secret1", "12345678901", "us-east-1"),
            Err(ValidationError::InvalidAccountId)
        );
        assert_eq!(
            validate_login("alice", "secret1", "12345678901a", "us-east-1"),
            Err(ValidationError::InvalidAccountId)
        );
        assert_eq!(
            validate_login("alice", "secret1", "1234567890123", "us-east-1"),
            Err(ValidationError::InvalidAccountId)
        );
    }

    #[test]
    fn test_rule_order_username_before_password() {
        // Both username and password are bad; the username rule fires first.
        assert_eq!(
            validate_login("ab", "123", "bad", "us-east-1"),
            Err(ValidationError::InvalidUsername)
        );
    }
}

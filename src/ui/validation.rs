//! Structural input checks run before any request is sent. These mirror what the API
//! validates so users get feedback without a round trip; they are not a security
//! boundary.

use regex::Regex;

/// Minimum password length accepted by the API.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Minimum number of digits a phone number must carry.
pub const MIN_PHONE_DIGITS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordCheck {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Checks every password rule and reports all failures in rule order.
#[must_use]
pub fn validate_password(password: &str) -> PasswordCheck {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }

    PasswordCheck {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Accepts digits, spaces, dashes, plus signs and parentheses, with at least ten digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    Regex::new(r"^[0-9\s\-+()]+$").is_ok_and(|re| re.is_match(phone)) && digits >= MIN_PHONE_DIGITS
}

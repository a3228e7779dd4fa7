use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::database::models::ContactType;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .unwrap_or_else(|_| unreachable!("email pattern is a valid regex"))
});

static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]{5,32}$")
        .unwrap_or_else(|_| unreachable!("handle pattern is a valid regex"))
});

/// Input rejected by one of the validators. The message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email address. Example: name@example.com")]
    InvalidEmail,
    #[error("Invalid phone number. Use +7XXXXXXXXXX, 8XXXXXXXXXX or 7XXXXXXXXXX")]
    InvalidPhone,
    #[error("Invalid Telegram username. Use 5-32 letters, digits or underscores")]
    InvalidHandle,
    #[error("Invalid date. Example: 30.01.2027 or 2027-01-30")]
    InvalidDate,
    #[error("This date has already passed")]
    PastDate,
    #[error("Invalid time. Example: 14:00")]
    InvalidTime,
    #[error("Please send a non-empty text")]
    Empty,
    #[error("Please choose one of the offered contact methods")]
    UnknownContactMethod,
}

/// Accepts `local@domain.tld`. Returns the trimmed address.
pub fn validate_email(input: &str) -> Result<String, ValidationError> {
    let email = input.trim();

    if EMAIL_RE.is_match(email) {
        Ok(email.to_string())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Accepts Russian numbering plan numbers: `+7`, `8` or `7` followed by ten digits.
/// Separators are ignored; the result keeps only digits and a leading `+`.
pub fn validate_phone(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let mut phone = String::with_capacity(trimmed.len());

    if trimmed.starts_with('+') {
        phone.push('+');
    }
    phone.extend(trimmed.chars().filter(|c| c.is_ascii_digit()));

    let valid = match phone.strip_prefix("+7") {
        Some(rest) => rest.len() == 10,
        None => phone.len() == 11 && (phone.starts_with('8') || phone.starts_with('7')),
    };

    if valid {
        Ok(phone)
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Accepts a Telegram username with or without the leading `@`.
/// Returns it without the `@`.
pub fn validate_handle(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    if HANDLE_RE.is_match(handle) {
        Ok(handle.to_string())
    } else {
        Err(ValidationError::InvalidHandle)
    }
}

/// Validates and normalizes contact data for the chosen method.
pub fn validate_contact(contact_type: ContactType, input: &str) -> Result<String, ValidationError> {
    match contact_type {
        ContactType::Email => validate_email(input),
        ContactType::Phone => validate_phone(input),
        ContactType::Telegram => validate_handle(input),
    }
}

/// Parses `YYYY-MM-DD`, or the `DD.MM.YYYY` form shown on the date keyboard.
pub fn validate_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d.%m.%Y"))
        .map_err(|_| ValidationError::InvalidDate)
}

/// Like [`validate_date`] but also rejects dates before `today`.
pub fn validate_appointment_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = validate_date(input)?;

    if date < today {
        return Err(ValidationError::PastDate);
    }

    Ok(date)
}

/// Parses a 24-hour `HH:MM` time.
pub fn validate_time(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTime)
}

/// Non-empty free text, trimmed.
pub fn validate_free_text(input: &str) -> Result<String, ValidationError> {
    let text = input.trim();

    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_separators_are_stripped() {
        assert_eq!(validate_phone("+7 (912) 345-67-89").as_deref(), Ok("+79123456789"));
        assert_eq!(validate_phone("8 912 345 67 89").as_deref(), Ok("89123456789"));
    }

    #[test]
    fn test_plus_only_allowed_before_seven() {
        assert_eq!(validate_phone("+8 912 345 67 89"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("+7912345678"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert!(ValidationError::PastDate.to_string().contains("passed"));
    }
}

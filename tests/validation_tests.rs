use chrono::{NaiveDate, NaiveTime};
use class_intake_bot::database::models::ContactType;
use class_intake_bot::utils::validation::*;

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn test_valid_emails() {
        let valid = [
            "student@example.com",
            "first.last+course@mail.school.ru",
            "  padded@example.org  ",
            "a_b-c@sub-domain.example.co",
        ];

        for email in valid {
            assert_eq!(
                validate_email(email),
                Ok(email.trim().to_string()),
                "Should accept email: {}",
                email
            );
        }
    }

    #[test]
    fn test_invalid_emails() {
        let invalid = [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user name@example.com",
        ];

        for email in invalid {
            assert_eq!(validate_email(email), Err(ValidationError::InvalidEmail), "Should reject email: {}", email);
        }
    }

    #[test]
    fn test_valid_phones_are_normalized() {
        let cases = [
            ("+79123456789", "+79123456789"),
            ("+7 (912) 345-67-89", "+79123456789"),
            ("89123456789", "89123456789"),
            ("8 912 345 67 89", "89123456789"),
            ("79123456789", "79123456789"),
        ];

        for (input, expected) in cases {
            assert_eq!(validate_phone(input), Ok(expected.to_string()), "Should accept phone: {}", input);
        }
    }

    #[test]
    fn test_invalid_phones() {
        let invalid = [
            "",
            "12345",
            "+7912345678",
            "+791234567890",
            "99123456789",
            "8912345678",
            "+19123456789",
            "phone",
        ];

        for phone in invalid {
            assert_eq!(validate_phone(phone), Err(ValidationError::InvalidPhone), "Should reject phone: {}", phone);
        }
    }

    #[test]
    fn test_handle_length_bounds() {
        assert_eq!(validate_handle("abcde"), Ok("abcde".to_string()));
        assert_eq!(validate_handle(&"a".repeat(32)), Ok("a".repeat(32)));
        assert_eq!(validate_handle("abcd"), Err(ValidationError::InvalidHandle));
        assert_eq!(validate_handle(&"a".repeat(33)), Err(ValidationError::InvalidHandle));
    }

    #[test]
    fn test_handle_strips_at_sign() {
        assert_eq!(validate_handle("@ivan_petrov"), Ok("ivan_petrov".to_string()));
        assert_eq!(validate_handle("ab"), Err(ValidationError::InvalidHandle));
        assert_eq!(validate_handle("ivan-petrov"), Err(ValidationError::InvalidHandle));
        assert_eq!(validate_handle("@"), Err(ValidationError::InvalidHandle));
    }

    #[test]
    fn test_validate_contact_dispatches_by_method() {
        assert!(validate_contact(ContactType::Email, "a@b.io").is_ok());
        assert_eq!(
            validate_contact(ContactType::Email, "+79123456789"),
            Err(ValidationError::InvalidEmail)
        );
        assert!(validate_contact(ContactType::Phone, "+79123456789").is_ok());
        assert_eq!(
            validate_contact(ContactType::Telegram, "a@b.io"),
            Err(ValidationError::InvalidHandle)
        );
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(validate_date("2099-12-31"), Ok(date(2099, 12, 31)));
        assert_eq!(validate_date("31.12.2099"), Ok(date(2099, 12, 31)));
        assert_eq!(validate_date(" 01.02.2030 "), Ok(date(2030, 2, 1)));
        assert_eq!(validate_date("2099-13-01"), Err(ValidationError::InvalidDate));
        assert_eq!(validate_date("30.02.2030"), Err(ValidationError::InvalidDate));
        assert_eq!(validate_date("tomorrow"), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_appointment_date_rejects_past_only() {
        let today = date(2026, 10, 19);

        assert_eq!(validate_appointment_date("18.10.2026", today), Err(ValidationError::PastDate));
        assert_eq!(validate_appointment_date("19.10.2026", today), Ok(today));
        assert_eq!(validate_appointment_date("2026-10-20", today), Ok(date(2026, 10, 20)));
        assert_eq!(validate_appointment_date("garbage", today), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_time_validation() {
        assert_eq!(validate_time("14:00"), Ok(NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default()));
        assert_eq!(validate_time("23:59"), Ok(NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()));
        assert_eq!(validate_time("24:00"), Err(ValidationError::InvalidTime));
        assert_eq!(validate_time("14:60"), Err(ValidationError::InvalidTime));
        assert_eq!(validate_time("2pm"), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn test_free_text() {
        assert_eq!(validate_free_text("  Ivan Petrov "), Ok("Ivan Petrov".to_string()));
        assert_eq!(validate_free_text("   "), Err(ValidationError::Empty));
        assert_eq!(validate_free_text(""), Err(ValidationError::Empty));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert!(ValidationError::InvalidHandle.to_string().contains("5-32"));
        assert!(ValidationError::PastDate.to_string().contains("passed"));
    }
}

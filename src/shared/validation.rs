use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Regex for Belarusian phone numbers, with optional space/hyphen separators
    /// - Valid: "+375291234567", "80291234567", "+375 (29) 123-45-67", "80-29-123-45-67"
    /// - Invalid: "123456", "+37529123456", "8029123456a", "+375 29  123 45 67"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^(80|\+375)[ -]?(\(\d{2}\)|\d{2})[ -]?\d{3}[ -]?\d{2}[ -]?\d{2}$").unwrap();
}

/// Message reported when a phone number does not match [`PHONE_REGEX`]
pub const PHONE_FORMAT_MESSAGE: &str =
    "Phone number must be entered in the format: +375299999999 or 80299999999";

/// Largest value that fits NUMERIC(10, 2)
fn max_price() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// Prices are non-negative, at most two decimal places, and fit NUMERIC(10, 2)
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price_negative")
            .with_message("price must not be negative".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("price_scale")
            .with_message("price must have at most 2 decimal places".into()));
    }
    if *price > max_price() {
        return Err(ValidationError::new("price_range")
            .with_message("price must be less than 100000000".into()));
    }
    Ok(())
}

/// Reject names that are only whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+375291234567"));
        assert!(PHONE_REGEX.is_match("80291234567"));
        assert!(PHONE_REGEX.is_match("+375 29 123 45 67"));
        assert!(PHONE_REGEX.is_match("80-29-123-45-67"));
        assert!(PHONE_REGEX.is_match("+375 (29) 123-45-67"));
        assert!(PHONE_REGEX.is_match("80(44)1234567"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("123456"));
        assert!(!PHONE_REGEX.is_match("")); // empty
        assert!(!PHONE_REGEX.is_match("+37529123456")); // one digit short
        assert!(!PHONE_REGEX.is_match("802912345678")); // one digit long
        assert!(!PHONE_REGEX.is_match("+7 29 123 45 67")); // wrong country code
        assert!(!PHONE_REGEX.is_match("+375  29 123 45 67")); // double separator
        assert!(!PHONE_REGEX.is_match("+375291234567\n")); // trailing newline
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Decimal::from_str("0").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("19.99").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("19.990").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("99999999.99").unwrap()).is_ok());

        assert!(validate_price(&Decimal::from_str("-1.00").unwrap()).is_err());
        assert!(validate_price(&Decimal::from_str("1.999").unwrap()).is_err());
        assert!(validate_price(&Decimal::from_str("100000000").unwrap()).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Phones").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }
}

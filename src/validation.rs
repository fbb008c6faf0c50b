// Validation utilities module
// Provides custom validation functions for domain-specific rules

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

fn customer_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[BV][0-9]+$").expect("customer id pattern is valid"))
}

fn product_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[PB][0-9]+$").expect("product id pattern is valid"))
}

/// Validates that a price is strictly positive
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        Err(ValidationError::new("price_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that a reward or discount rate is strictly positive.
/// No upper bound: rates above 1.0 are accepted.
pub fn validate_positive_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate <= Decimal::ZERO {
        Err(ValidationError::new("rate_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that a customer name contains only alphabetic characters
pub fn validate_customer_name(name: &str) -> Result<(), ValidationError> {
    if !name.is_empty() && name.chars().all(char::is_alphabetic) {
        Ok(())
    } else {
        Err(ValidationError::new("name_must_be_alphabetic"))
    }
}

/// Checks whether a token has the shape of a customer ID ("B" or "V"
/// followed by digits)
pub fn is_customer_id(token: &str) -> bool {
    customer_id_pattern().is_match(token)
}

/// Checks whether a token has the shape of a product ID ("P" or "B"
/// followed by digits)
pub fn is_product_id(token: &str) -> bool {
    product_id_pattern().is_match(token)
}

/// Parses a prescription answer token: "y" or "n", case-insensitive
pub fn parse_prescription_flag(token: &str) -> Result<bool, ValidationError> {
    match token.trim().to_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(ValidationError::new("prescription_must_be_y_or_n")),
    }
}

use thiserror::Error;

/// Error types for customer operations
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(String),

    #[error("Customer {0} is not a VIP customer")]
    NotVip(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Duplicate customer id: {0}")]
    DuplicateId(String),

    #[error("Calculation error: {0}")]
    Calculation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CustomerError::NotFound("V9".to_string());
        assert_eq!(error.to_string(), "Customer not found: V9");

        let error = CustomerError::NotVip("B2".to_string());
        assert_eq!(error.to_string(), "Customer B2 is not a VIP customer");

        let error = CustomerError::InvalidRate("rate must be positive".to_string());
        assert_eq!(error.to_string(), "Invalid rate: rate must be positive");
    }
}

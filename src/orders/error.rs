use crate::customers::CustomerError;

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Invalid customer name: {0}")]
    InvalidCustomerName(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("No eligible products to purchase after removing prescription-required items")]
    NoEligibleItems,

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for OrderError {
    fn from(err: validator::ValidationErrors) -> Self {
        OrderError::ValidationError(err.to_string())
    }
}

impl From<CustomerError> for OrderError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(token) => OrderError::CustomerNotFound(token),
            CustomerError::Calculation(msg) => OrderError::Calculation(msg),
            other => OrderError::ValidationError(other.to_string()),
        }
    }
}

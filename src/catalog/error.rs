use thiserror::Error;

/// Error types for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    #[error("Product {0} is a bundle; its price and prescription flag are derived from its components")]
    BundleImmutable(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(err: validator::ValidationErrors) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

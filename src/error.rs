// Error handling module for the pharmacy application
// Unifies the per-domain error types behind a single top-level enum

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::customers::CustomerError;
use crate::orders::OrderError;
use crate::store::StoreError;

/// Main error type for the application facade.
///
/// Each domain keeps its own error enum; this type exists so callers of
/// [`crate::Pharmacy`] handle one error across every operation. Lookup
/// misses and invalid input are recoverable (state is untouched, the
/// caller may re-prompt); store errors surface load or save failures.
#[derive(Debug, Error)]
pub enum PharmacyError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_convert() {
        let error: PharmacyError = CatalogError::NotFound("P9".to_string()).into();
        assert!(matches!(error, PharmacyError::Catalog(_)));
        assert_eq!(error.to_string(), "Product not found: P9");

        let error: PharmacyError = OrderError::NoEligibleItems.into();
        assert!(matches!(error, PharmacyError::Order(_)));
    }
}

use rust_decimal::Decimal;

use crate::catalog::repository::ProductCatalog;

/// Service for deriving a bundle's unit price and prescription flag from
/// its component products.
pub struct BundleCalculator;

impl BundleCalculator {
    /// Derive the bundle fields from a component list.
    ///
    /// # Arguments
    /// * `components` - Component product IDs, resolved against the catalog
    /// * `catalog` - Catalog the components are looked up in
    ///
    /// # Returns
    /// `(unit_price, requires_prescription)` where the price is 80% of the
    /// component price sum rounded to 2 decimal places, and the flag is set
    /// if any resolvable component requires a prescription.
    ///
    /// A component ID that resolves to nothing contributes zero silently;
    /// a bundle with no resolvable components derives to `(0.00, false)`.
    pub fn derive(components: &[String], catalog: &ProductCatalog) -> (Decimal, bool) {
        let mut total = Decimal::ZERO;
        let mut requires_prescription = false;

        for component in components {
            if let Some(product) = catalog.get(component) {
                total += product.unit_price();
                if product.requires_prescription() {
                    requires_prescription = true;
                }
            }
        }

        let unit_price = (total * Decimal::new(8, 1)).round_dp(2);
        (unit_price, requires_prescription)
    }
}

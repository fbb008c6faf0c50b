use rust_decimal::Decimal;
use validator::Validate;

use crate::catalog::bundle_calculator::BundleCalculator;
use crate::catalog::error::CatalogError;
use crate::catalog::models::{Product, ProductUpsert};
use crate::catalog::repository::ProductCatalog;
use crate::validation;

/// Service for catalog administration.
///
/// Every price or prescription mutation goes through this service so the
/// bundle cascade can never be skipped: after a product changes, every
/// bundle referencing it is re-derived before the call returns.
#[derive(Debug, Clone, Default)]
pub struct CatalogService {
    catalog: ProductCatalog,
}

impl CatalogService {
    /// Create a new CatalogService
    pub fn new(catalog: ProductCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn find(&self, token: &str) -> Option<&Product> {
        self.catalog.find(token)
    }

    /// Add a new regular product with a fresh "P" ID.
    ///
    /// # Validation
    /// - Name must not be empty
    /// - Price must be strictly positive
    pub fn add_product(&mut self, entry: &ProductUpsert) -> Result<String, CatalogError> {
        entry.validate()?;
        validation::validate_positive_price(&entry.price).map_err(|_| {
            CatalogError::InvalidPrice(format!("price must be greater than 0, got {}", entry.price))
        })?;

        let id = self.catalog.allocate_id('P');
        self.catalog.insert(Product::regular(
            id.clone(),
            entry.name.clone(),
            entry.price,
            entry.requires_prescription,
        ))?;

        tracing::info!("Added product {} ({})", id, entry.name);
        Ok(id)
    }

    /// Update an existing product's price and prescription flag, then
    /// re-derive every bundle that references it.
    ///
    /// Bundles cannot be updated directly: their price and flag are
    /// derived, so the only way to change them is through their
    /// components.
    pub fn update_product(
        &mut self,
        token: &str,
        price: Decimal,
        requires_prescription: bool,
    ) -> Result<(), CatalogError> {
        validation::validate_positive_price(&price).map_err(|_| {
            CatalogError::InvalidPrice(format!("price must be greater than 0, got {}", price))
        })?;

        let index = self
            .catalog
            .find_index(token)
            .ok_or_else(|| CatalogError::NotFound(token.to_string()))?;

        let product = self
            .catalog
            .product_mut(index)
            .ok_or_else(|| CatalogError::NotFound(token.to_string()))?;
        if product.is_bundle() {
            return Err(CatalogError::BundleImmutable(product.id().to_string()));
        }

        product.set_price(price);
        product.set_prescription(requires_prescription);
        let product_id = product.id().to_string();

        self.cascade_from(&product_id);
        tracing::info!("Updated product {} ({})", product_id, token);
        Ok(())
    }

    /// Apply a batch of product entries: names that resolve to an existing
    /// product update it, the rest are added as new products.
    ///
    /// Every entry is validated before any is applied, so a bad entry in
    /// the middle of the batch leaves the catalog untouched.
    pub fn upsert_products(&mut self, entries: &[ProductUpsert]) -> Result<(), CatalogError> {
        // Validation pass: no mutation until every entry checks out.
        let mut resolved: Vec<Option<usize>> = Vec::with_capacity(entries.len());
        for entry in entries {
            entry.validate()?;
            validation::validate_positive_price(&entry.price).map_err(|_| {
                CatalogError::InvalidPrice(format!(
                    "price must be greater than 0, got {}",
                    entry.price
                ))
            })?;

            let index = self.catalog.find_index(&entry.name);
            if let Some(index) = index {
                let product = &self.catalog.products()[index];
                if product.is_bundle() {
                    return Err(CatalogError::BundleImmutable(product.id().to_string()));
                }
            }
            resolved.push(index);
        }

        // Apply pass: every entry already checked out above.
        for (entry, index) in entries.iter().zip(resolved) {
            match index {
                Some(_) => {
                    self.update_product(&entry.name, entry.price, entry.requires_prescription)?;
                }
                None => {
                    self.add_product(entry)?;
                }
            }
        }

        Ok(())
    }

    /// Re-derive every bundle in the catalog. Run once after loading.
    pub fn rederive_all(&mut self) {
        let indices = self.catalog.bundle_indices();
        self.rederive(&indices);
    }

    /// Re-derive the bundles that reference a changed product, one level
    /// deep.
    fn cascade_from(&mut self, product_id: &str) {
        let indices = self.catalog.bundles_referencing(product_id);
        if !indices.is_empty() {
            tracing::debug!(
                "Re-deriving {} bundle(s) referencing {}",
                indices.len(),
                product_id
            );
        }
        self.rederive(&indices);
    }

    fn rederive(&mut self, indices: &[usize]) {
        // Derivation reads the catalog, so compute every value before
        // writing any back.
        let derived: Vec<(usize, Decimal, bool)> = indices
            .iter()
            .filter_map(|&index| {
                let product = &self.catalog.products()[index];
                product
                    .components()
                    .map(|components| BundleCalculator::derive(components, &self.catalog))
                    .map(|(price, rx)| (index, price, rx))
            })
            .collect();

        for (index, price, rx) in derived {
            if let Some(product) = self.catalog.product_mut(index) {
                product.apply_derived(price, rx);
            }
        }
    }
}

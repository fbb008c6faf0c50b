// Product catalog
//
// In-memory, insert-ordered store for products and bundles. Bundle
// component references resolve by exact ID; user-facing lookup accepts
// either ID or display name.

use std::collections::HashSet;

use crate::catalog::error::CatalogError;
use crate::catalog::models::Product;

/// Repository for catalog entries, keyed by unique ID.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Insert a product, rejecting a duplicate ID.
    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.products.iter().any(|p| p.id() == product.id()) {
            return Err(CatalogError::DuplicateId(product.id().to_string()));
        }
        self.products.push(product);
        Ok(())
    }

    /// Resolve a product by exact ID. Bundle component references use
    /// this path only; a miss contributes nothing to a derivation.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Find a product by exact ID or exact name, first match in insert
    /// order.
    pub fn find(&self, token: &str) -> Option<&Product> {
        let token = token.trim();
        self.products
            .iter()
            .find(|p| p.name() == token || p.id() == token)
    }

    pub fn find_index(&self, token: &str) -> Option<usize> {
        let token = token.trim();
        self.products
            .iter()
            .position(|p| p.name() == token || p.id() == token)
    }

    pub(crate) fn product_mut(&mut self, index: usize) -> Option<&mut Product> {
        self.products.get_mut(index)
    }

    /// Indices of every bundle whose component list references the given
    /// product ID. These are the entries a mutation must re-derive.
    pub fn bundles_referencing(&self, product_id: &str) -> Vec<usize> {
        self.products
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.components()
                    .map(|components| components.iter().any(|c| c == product_id))
                    .unwrap_or(false)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices of every bundle in the catalog.
    pub fn bundle_indices(&self) -> Vec<usize> {
        self.products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_bundle())
            .map(|(index, _)| index)
            .collect()
    }

    /// Allocate a fresh ID with the given prefix.
    ///
    /// Scans the numeric suffix of every catalog ID (regular products and
    /// bundles share the suffix space) and picks the smallest unused
    /// positive integer.
    pub fn allocate_id(&self, prefix: char) -> String {
        let used: HashSet<u64> = self
            .products
            .iter()
            .filter_map(|p| p.id().get(1..).and_then(|s| s.parse().ok()))
            .collect();

        let mut suffix = 1u64;
        while used.contains(&suffix) {
            suffix += 1;
        }
        format!("{}{}", prefix, suffix)
    }
}

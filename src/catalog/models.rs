use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// What kind of catalog entry a product is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// A simple product with a stored price and prescription flag.
    Regular,
    /// A composite product whose price and prescription flag are derived
    /// from the listed component product IDs.
    Bundle { components: Vec<String> },
}

/// A product in the catalog.
///
/// For bundles, `unit_price` and `requires_prescription` hold the last
/// derived values; they go stale when a component changes and are brought
/// current by the catalog service's cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    unit_price: Decimal,
    requires_prescription: bool,
    kind: ProductKind,
}

impl Product {
    /// Create a regular product.
    pub fn regular(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        requires_prescription: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            requires_prescription,
            kind: ProductKind::Regular,
        }
    }

    /// Create a bundle. The derived fields start at zero/false and are
    /// filled in by the first derivation pass.
    pub fn bundle(
        id: impl Into<String>,
        name: impl Into<String>,
        components: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price: Decimal::ZERO,
            requires_prescription: false,
            kind: ProductKind::Bundle { components },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn requires_prescription(&self) -> bool {
        self.requires_prescription
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self.kind, ProductKind::Bundle { .. })
    }

    /// Component product IDs, or `None` for regular products.
    pub fn components(&self) -> Option<&[String]> {
        match &self.kind {
            ProductKind::Regular => None,
            ProductKind::Bundle { components } => Some(components),
        }
    }

    /// Overwrite the stored price. Callers must run the bundle cascade
    /// afterwards; the catalog service is the only mutation path.
    pub(crate) fn set_price(&mut self, price: Decimal) {
        self.unit_price = price;
    }

    /// Overwrite the stored prescription flag. Same cascade obligation as
    /// [`Product::set_price`].
    pub(crate) fn set_prescription(&mut self, flag: bool) {
        self.requires_prescription = flag;
    }

    /// Install freshly derived bundle values.
    pub(crate) fn apply_derived(&mut self, unit_price: Decimal, requires_prescription: bool) {
        self.unit_price = unit_price;
        self.requires_prescription = requires_prescription;
    }
}

/// Request DTO for adding or updating a product by name.
///
/// An entry whose name resolves to an existing product updates it;
/// otherwise a new product is created with a fresh ID.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductUpsert {
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: String,
    pub price: Decimal,
    pub requires_prescription: bool,
}

// Application facade
//
// Owns the whole in-memory state (catalog, customer directory, tier
// rates) and exposes the operation surface a front end drives. File
// loading happens once at construction; write-back only at the explicit
// save boundary.

use rust_decimal::Decimal;

use crate::catalog::{CatalogService, Product, ProductUpsert};
use crate::customers::{Customer, CustomerService, TierRates};
use crate::error::PharmacyError;
use crate::orders::{CheckoutService, Order, OrderRecord, PurchaseRequest, Receipt};
use crate::store::{self, StorePaths};

/// The pharmacy application state and operations.
pub struct Pharmacy {
    catalog: CatalogService,
    customers: CustomerService,
}

impl Pharmacy {
    /// Create an empty pharmacy with default tier rates.
    pub fn new() -> Self {
        Self {
            catalog: CatalogService::default(),
            customers: CustomerService::default(),
        }
    }

    /// Load state from the record files.
    ///
    /// Customer and product problems propagate to the caller; an order
    /// file that cannot be read or parsed degrades to a warning and
    /// whatever rows loaded cleanly.
    pub fn load(paths: &StorePaths) -> Result<Self, PharmacyError> {
        let (customers, rates) = store::load_customers(&paths.customers)?;
        let mut directory = crate::customers::CustomerDirectory::new();
        for customer in customers {
            directory.insert(customer)?;
        }

        let mut catalog = CatalogService::new(store::load_products(&paths.products)?);
        catalog.rederive_all();

        store::load_orders(&paths.orders, catalog.catalog(), &mut directory);

        tracing::info!(
            "Loaded {} customer(s) and {} product(s)",
            directory.len(),
            catalog.catalog().len()
        );

        Ok(Self {
            catalog,
            customers: CustomerService::new(directory, rates),
        })
    }

    /// Write the full state back to the record files.
    pub fn save(&self, paths: &StorePaths) -> Result<(), PharmacyError> {
        store::save_customers(&paths.customers, self.customers.directory(), self.customers.rates())?;
        store::save_products(&paths.products, self.catalog.catalog())?;
        store::save_orders(&paths.orders, self.customers.directory())?;
        tracing::info!("Saved state to {}", paths.customers.display());
        Ok(())
    }

    /// Execute a purchase and return its receipt.
    pub fn make_purchase(&mut self, request: &PurchaseRequest) -> Result<Receipt, PharmacyError> {
        let (directory, rates) = self.customers.parts_mut();
        let receipt =
            CheckoutService::make_purchase(self.catalog.catalog(), directory, rates, request)?;
        Ok(receipt)
    }

    /// All customers in load order.
    pub fn customers(&self) -> &[Customer] {
        self.customers.directory().customers()
    }

    /// All products in load order.
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn find_customer(&self, token: &str) -> Option<&Customer> {
        self.customers.directory().find(token)
    }

    pub fn find_product(&self, token: &str) -> Option<&Product> {
        self.catalog.find(token)
    }

    pub fn tier_rates(&self) -> &TierRates {
        self.customers.rates()
    }

    /// Add or update a batch of products by name; all entries are
    /// validated before any is applied.
    pub fn upsert_products(&mut self, entries: &[ProductUpsert]) -> Result<(), PharmacyError> {
        self.catalog.upsert_products(entries)?;
        Ok(())
    }

    /// Set the reward rate shared by all Basic customers.
    pub fn set_basic_reward_rate(&mut self, rate: Decimal) -> Result<(), PharmacyError> {
        self.customers.set_basic_reward_rate(rate)?;
        Ok(())
    }

    /// Set the reward rate shared by all VIP customers.
    pub fn set_vip_reward_rate(&mut self, rate: Decimal) -> Result<(), PharmacyError> {
        self.customers.set_vip_reward_rate(rate)?;
        Ok(())
    }

    /// Set the discount rate of one VIP customer.
    pub fn set_vip_discount_rate(
        &mut self,
        token: &str,
        rate: Decimal,
    ) -> Result<(), PharmacyError> {
        self.customers.set_vip_discount_rate(token, rate)?;
        Ok(())
    }

    /// Order history of one customer, by ID or name.
    pub fn order_history(&self, token: &str) -> Result<&[Order], PharmacyError> {
        let history = CheckoutService::order_history(self.customers.directory(), token)?;
        Ok(history)
    }

    /// Every recorded order across all customers.
    pub fn all_orders(&self) -> Vec<OrderRecord> {
        CheckoutService::all_orders(self.customers.directory())
    }
}

impl Default for Pharmacy {
    fn default() -> Self {
        Self::new()
    }
}

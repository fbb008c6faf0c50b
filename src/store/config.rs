// Store configuration
//
// File locations for the three record files. Defaults match the original
// data set names and can be overridden through the environment.

use std::path::{Path, PathBuf};

/// Locations of the customer, product, and order record files.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub customers: PathBuf,
    pub products: PathBuf,
    pub orders: PathBuf,
}

impl Default for StorePaths {
    fn default() -> Self {
        Self {
            customers: PathBuf::from("customers.txt"),
            products: PathBuf::from("products.txt"),
            orders: PathBuf::from("orders.txt"),
        }
    }
}

impl StorePaths {
    /// Read file locations from the environment, falling back to the
    /// defaults: `PHARMACY_CUSTOMER_FILE`, `PHARMACY_PRODUCT_FILE`,
    /// `PHARMACY_ORDER_FILE`.
    pub fn from_env() -> Self {
        let customers = std::env::var("PHARMACY_CUSTOMER_FILE")
            .unwrap_or_else(|_| "customers.txt".to_string());
        let products = std::env::var("PHARMACY_PRODUCT_FILE")
            .unwrap_or_else(|_| "products.txt".to_string());
        let orders =
            std::env::var("PHARMACY_ORDER_FILE").unwrap_or_else(|_| "orders.txt".to_string());

        Self {
            customers: PathBuf::from(customers),
            products: PathBuf::from(products),
            orders: PathBuf::from(orders),
        }
    }

    /// The default file names inside a specific directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            customers: dir.join("customers.txt"),
            products: dir.join("products.txt"),
            orders: dir.join("orders.txt"),
        }
    }
}

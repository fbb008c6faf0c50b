// Record file writers
//
// Write-back happens only at the explicit save boundary, never after
// individual mutations. Derived bundle fields are not persisted; bundles
// round-trip as their component lists.

use std::fs;
use std::path::Path;

use crate::catalog::ProductCatalog;
use crate::customers::{CustomerDirectory, CustomerTier, TierRates};
use crate::store::error::StoreError;
use crate::store::ORDER_TIME_FORMAT;

/// Save every customer, with the current tier-wide rate on each row.
pub fn save_customers(
    path: &Path,
    directory: &CustomerDirectory,
    rates: &TierRates,
) -> Result<(), StoreError> {
    let mut out = String::new();
    for customer in directory.customers() {
        match customer.tier() {
            CustomerTier::Basic => out.push_str(&format!(
                "{},{},{},{}\n",
                customer.id(),
                customer.name(),
                rates.basic_reward_rate,
                customer.reward_points()
            )),
            CustomerTier::Vip { discount_rate } => out.push_str(&format!(
                "{},{},{},{},{}\n",
                customer.id(),
                customer.name(),
                rates.vip_reward_rate,
                discount_rate,
                customer.reward_points()
            )),
        }
    }

    fs::write(path, out).map_err(|err| StoreError::io(path, err))?;
    tracing::debug!("Saved {} customer(s) to {}", directory.len(), path.display());
    Ok(())
}

/// Save every product. Regular products carry price and flag; bundles
/// carry only their component list.
pub fn save_products(path: &Path, catalog: &ProductCatalog) -> Result<(), StoreError> {
    let mut out = String::new();
    for product in catalog.products() {
        match product.components() {
            None => out.push_str(&format!(
                "{},{},{},{}\n",
                product.id(),
                product.name(),
                product.unit_price(),
                if product.requires_prescription() { "y" } else { "n" }
            )),
            Some(components) => out.push_str(&format!(
                "{},{},{}\n",
                product.id(),
                product.name(),
                components.join(",")
            )),
        }
    }

    fs::write(path, out).map_err(|err| StoreError::io(path, err))?;
    tracing::debug!("Saved {} product(s) to {}", catalog.len(), path.display());
    Ok(())
}

/// Save the full order ledger, customer by customer.
pub fn save_orders(path: &Path, directory: &CustomerDirectory) -> Result<(), StoreError> {
    let mut out = String::new();
    let mut count = 0usize;
    for customer in directory.customers() {
        for order in customer.order_history() {
            let items: Vec<String> = order
                .lines()
                .iter()
                .map(|line| format!("{},{}", line.product_name, line.quantity))
                .collect();
            out.push_str(&format!(
                "{},{},{:.2},{},{}\n",
                customer.id(),
                items.join(","),
                order.total_cost(),
                order.earned_rewards(),
                order.placed_at().format(ORDER_TIME_FORMAT)
            ));
            count += 1;
        }
    }

    fs::write(path, out).map_err(|err| StoreError::io(path, err))?;
    tracing::debug!("Saved {} order(s) to {}", count, path.display());
    Ok(())
}

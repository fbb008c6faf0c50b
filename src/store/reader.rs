// Record file loaders
//
// Customers and products are comma-separated, one record per line, with
// the record kind taken from the ID prefix. A missing customer or product
// file degrades to an empty set; a malformed record in those files is an
// error for the caller. Order-file problems only ever produce a warning:
// rows already applied stay applied and loading stops.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::catalog::{Product, ProductCatalog};
use crate::customers::{Customer, CustomerDirectory, TierRates};
use crate::orders::{Order, OrderLine};
use crate::store::error::StoreError;
use crate::store::ORDER_TIME_FORMAT;
use crate::validation;

/// Load customers and the tier-wide reward rates.
///
/// Basic records are `ID,name,reward_rate,reward`; VIP records are
/// `ID,name,reward_rate,discount_rate,reward`. The rate column is shared
/// by the whole tier, so the loader adopts it into the returned
/// [`TierRates`].
pub fn load_customers(path: &Path) -> Result<(Vec<Customer>, TierRates), StoreError> {
    let content = match read_optional(path)? {
        Some(content) => content,
        None => {
            tracing::warn!("Customer file {} not found", path.display());
            return Ok((Vec::new(), TierRates::default()));
        }
    };

    let mut customers = Vec::new();
    let mut rates = TierRates::default();

    for (number, line) in numbered_records(&content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields[0].chars().next() {
            Some('B') => {
                if fields.len() != 4 {
                    return Err(StoreError::invalid_record(
                        path,
                        number,
                        format!("expected 4 fields for a Basic customer, got {}", fields.len()),
                    ));
                }
                rates.basic_reward_rate = parse_decimal(fields[2], path, number)?;
                customers.push(Customer::basic(
                    fields[0],
                    fields[1],
                    parse_points(fields[3], path, number)?,
                ));
            }
            Some('V') => {
                if fields.len() != 5 {
                    return Err(StoreError::invalid_record(
                        path,
                        number,
                        format!("expected 5 fields for a VIP customer, got {}", fields.len()),
                    ));
                }
                rates.vip_reward_rate = parse_decimal(fields[2], path, number)?;
                customers.push(Customer::vip(
                    fields[0],
                    fields[1],
                    parse_points(fields[4], path, number)?,
                    parse_decimal(fields[3], path, number)?,
                ));
            }
            _ => {
                return Err(StoreError::invalid_record(
                    path,
                    number,
                    format!("unrecognized customer record: {}", line),
                ));
            }
        }
    }

    tracing::debug!("Loaded {} customer(s) from {}", customers.len(), path.display());
    Ok((customers, rates))
}

/// Load the product catalog.
///
/// Regular records are `ID,name,price,y|n`; bundle records are
/// `ID,name,component,...`. Derived bundle fields are not read here; the
/// caller runs a derivation pass over the finished catalog.
pub fn load_products(path: &Path) -> Result<ProductCatalog, StoreError> {
    let content = match read_optional(path)? {
        Some(content) => content,
        None => {
            tracing::warn!("Product file {} not found", path.display());
            return Ok(ProductCatalog::new());
        }
    };

    let mut catalog = ProductCatalog::new();

    for (number, line) in numbered_records(&content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let product = match fields[0].chars().next() {
            Some('P') => {
                if fields.len() != 4 {
                    return Err(StoreError::invalid_record(
                        path,
                        number,
                        format!("expected 4 fields for a product, got {}", fields.len()),
                    ));
                }
                let requires_prescription =
                    validation::parse_prescription_flag(fields[3]).map_err(|_| {
                        StoreError::invalid_record(
                            path,
                            number,
                            format!("prescription flag must be y or n, got {}", fields[3]),
                        )
                    })?;
                Product::regular(
                    fields[0],
                    fields[1],
                    parse_decimal(fields[2], path, number)?,
                    requires_prescription,
                )
            }
            Some('B') => {
                if fields.len() < 2 {
                    return Err(StoreError::invalid_record(
                        path,
                        number,
                        "bundle record is missing a name",
                    ));
                }
                let components = fields[2..]
                    .iter()
                    .filter(|c| !c.is_empty())
                    .map(|c| c.to_string())
                    .collect();
                Product::bundle(fields[0], fields[1], components)
            }
            _ => {
                return Err(StoreError::invalid_record(
                    path,
                    number,
                    format!("unrecognized product record: {}", line),
                ));
            }
        };

        catalog
            .insert(product)
            .map_err(|err| StoreError::invalid_record(path, number, err.to_string()))?;
    }

    tracing::debug!("Loaded {} product(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Replay the order history into the directory.
///
/// Records are `customerID,name,qty[,name,qty...],total,earned,time`.
/// Each replayed row appends the order snapshot to its customer and
/// credits the recorded earned points to the balance. Rows naming an
/// unknown customer are skipped; line items naming an unknown product are
/// dropped from the snapshot. Any other problem stops the load with a
/// warning, keeping the rows already applied.
pub fn load_orders(path: &Path, catalog: &ProductCatalog, directory: &mut CustomerDirectory) {
    if let Err(err) = try_load_orders(path, catalog, directory) {
        tracing::warn!("Cannot load the order file: {}", err);
    }
}

fn try_load_orders(
    path: &Path,
    catalog: &ProductCatalog,
    directory: &mut CustomerDirectory,
) -> Result<(), StoreError> {
    let content = fs::read_to_string(path).map_err(|err| StoreError::io(path, err))?;

    for (number, line) in numbered_records(&content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 6 || fields.len() % 2 != 0 {
            return Err(StoreError::invalid_record(
                path,
                number,
                format!("expected customer, item pairs and 3 trailing fields, got {} fields", fields.len()),
            ));
        }

        let customer_index = match directory.find_index(fields[0]) {
            Some(index) => index,
            None => continue,
        };

        let mut lines = Vec::new();
        for pair in fields[1..fields.len() - 3].chunks(2) {
            let quantity: i32 = pair[1].parse().map_err(|_| {
                StoreError::invalid_record(path, number, format!("invalid quantity: {}", pair[1]))
            })?;
            if let Some(product) = catalog.find(pair[0]) {
                lines.push(OrderLine {
                    product_name: product.name().to_string(),
                    unit_price: product.unit_price(),
                    quantity,
                });
            }
        }

        let total_cost = parse_decimal(fields[fields.len() - 3], path, number)?;
        let earned_rewards = parse_points(fields[fields.len() - 2], path, number)?;
        let placed_at = NaiveDateTime::parse_from_str(fields[fields.len() - 1], ORDER_TIME_FORMAT)
            .map_err(|_| {
                StoreError::invalid_record(
                    path,
                    number,
                    format!("invalid order time: {}", fields[fields.len() - 1]),
                )
            })?;

        if let Some(customer) = directory.get_mut(customer_index) {
            customer.record_order(Order::new(lines, total_cost, earned_rewards, placed_at));
            customer.credit_rewards(earned_rewards);
        }
    }

    Ok(())
}

/// Non-blank lines with their 1-based line numbers.
fn numbered_records(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StoreError::io(path, err)),
    }
}

fn parse_decimal(value: &str, path: &Path, line: usize) -> Result<Decimal, StoreError> {
    Decimal::from_str(value.trim())
        .map_err(|_| StoreError::invalid_record(path, line, format!("invalid number: {}", value)))
}

fn parse_points(value: &str, path: &Path, line: usize) -> Result<i64, StoreError> {
    value.trim().parse().map_err(|_| {
        StoreError::invalid_record(path, line, format!("invalid reward points: {}", value))
    })
}

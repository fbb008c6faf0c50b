use chrono::Local;
use rust_decimal::Decimal;
use validator::Validate;

use crate::catalog::ProductCatalog;
use crate::customers::{CustomerDirectory, CustomerTier, TierRates};
use crate::orders::error::OrderError;
use crate::orders::models::{Order, OrderLine, OrderRecord, PurchaseRequest, Receipt};
use crate::orders::price_calculator::PriceCalculator;
use crate::validation;

/// Service for the purchase flow and order-history queries.
///
/// A purchase either commits as a whole (order recorded and balance
/// updated) or fails with no state change: every fallible step runs
/// before the first mutation.
pub struct CheckoutService;

impl CheckoutService {
    /// Execute a purchase.
    ///
    /// # Arguments
    /// * `catalog` - Product catalog for price/prescription resolution
    /// * `directory` - Customer directory; mutated on commit
    /// * `rates` - Current tier-wide reward rates
    /// * `request` - Validated purchase request
    ///
    /// # Validation
    /// - Every product must resolve by ID or name
    /// - Quantities must be positive
    /// - An unknown customer identifier must be an alphabetic name, which
    ///   registers a new Basic customer; an ID-shaped token that matches
    ///   nothing is a lookup miss
    /// - Lines requiring a prescription are dropped when the request has
    ///   none; a purchase emptied this way is rejected
    pub fn make_purchase(
        catalog: &ProductCatalog,
        directory: &mut CustomerDirectory,
        rates: &TierRates,
        request: &PurchaseRequest,
    ) -> Result<Receipt, OrderError> {
        request.validate()?;

        // Resolve products and quantities before touching any state.
        let mut resolved = Vec::with_capacity(request.items.len());
        for item in &request.items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidQuantity(format!(
                    "Quantity must be positive, got {}",
                    item.quantity
                )));
            }
            let product = catalog
                .find(&item.product)
                .ok_or_else(|| OrderError::ProductNotFound(item.product.clone()))?;
            resolved.push((product, item.quantity));
        }

        // Prescription gate: without one, prescription-required lines are
        // dropped from the purchase.
        let needs_prescription = resolved.iter().any(|(p, _)| p.requires_prescription());
        if needs_prescription && !request.has_prescription {
            let before = resolved.len();
            resolved.retain(|(p, _)| !p.requires_prescription());
            tracing::debug!(
                "Dropped {} prescription-required line(s) from purchase",
                before - resolved.len()
            );
            if resolved.is_empty() {
                return Err(OrderError::NoEligibleItems);
            }
        }

        let lines: Vec<OrderLine> = resolved
            .iter()
            .map(|(product, quantity)| OrderLine {
                product_name: product.name().to_string(),
                unit_price: product.unit_price(),
                quantity: *quantity,
            })
            .collect();
        let priced: Vec<(Decimal, i32)> = lines
            .iter()
            .map(|line| (line.unit_price, line.quantity))
            .collect();

        // Resolve the buyer. A brand-new customer prices as Basic with a
        // zero balance; registration is deferred until commit.
        let token = request.customer.trim();
        let (tier, balance, existing_index) = match directory.find_index(token) {
            Some(index) => {
                let customer = directory
                    .get(index)
                    .ok_or_else(|| OrderError::CustomerNotFound(token.to_string()))?;
                (*customer.tier(), customer.reward_points(), Some(index))
            }
            None => {
                if validation::is_customer_id(token) {
                    return Err(OrderError::CustomerNotFound(token.to_string()));
                }
                validation::validate_customer_name(token)
                    .map_err(|_| OrderError::InvalidCustomerName(token.to_string()))?;
                (CustomerTier::Basic, 0, None)
            }
        };

        let breakdown = PriceCalculator::price_order(&tier, rates, balance, &priced)?;

        // Commit: registration, order append, and balance delta happen
        // together, after the last fallible step.
        let index = match existing_index {
            Some(index) => index,
            None => directory.register_basic(token),
        };
        let customer = directory
            .get_mut(index)
            .ok_or_else(|| OrderError::CustomerNotFound(token.to_string()))?;

        let order = Order::new(
            lines.clone(),
            breakdown.final_cost,
            breakdown.earned_points,
            Local::now().naive_local(),
        );
        customer.record_order(order);
        customer.credit_rewards(breakdown.net_points_delta);

        tracing::info!(
            "Committed purchase for {}: {} line(s), charged {:.2}, earned {}",
            customer.id(),
            lines.len(),
            breakdown.final_cost,
            breakdown.earned_points
        );

        Ok(Receipt {
            customer_id: customer.id().to_string(),
            customer_name: customer.name().to_string(),
            lines,
            original_cost: breakdown.original_cost,
            discount: breakdown.discount,
            redeemed_value: breakdown.redeemed_value,
            final_cost: breakdown.final_cost,
            earned_points: breakdown.earned_points,
        })
    }

    /// Order history of a single customer, looked up by ID or name.
    pub fn order_history<'a>(
        directory: &'a CustomerDirectory,
        token: &str,
    ) -> Result<&'a [Order], OrderError> {
        directory
            .find(token)
            .map(|customer| customer.order_history())
            .ok_or_else(|| OrderError::CustomerNotFound(token.to_string()))
    }

    /// Every recorded order across all customers, in customer order.
    pub fn all_orders(directory: &CustomerDirectory) -> Vec<OrderRecord> {
        directory
            .customers()
            .iter()
            .flat_map(|customer| {
                customer.order_history().iter().map(|order| OrderRecord {
                    customer_id: customer.id().to_string(),
                    customer_name: customer.name().to_string(),
                    order: order.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::customers::Customer;
    use rust_decimal_macros::dec;

    fn sample_catalog() -> ProductCatalog {
        let mut catalog = ProductCatalog::new();
        catalog
            .insert(Product::regular("P1", "vitaminC", dec!(10.00), false))
            .unwrap();
        catalog
            .insert(Product::regular("P2", "antibiotic", dec!(5.00), true))
            .unwrap();
        catalog
    }

    fn sample_directory() -> CustomerDirectory {
        let mut directory = CustomerDirectory::new();
        directory.insert(Customer::basic("B1", "Alice", 0)).unwrap();
        directory
            .insert(Customer::vip("V2", "Bob", 250, dec!(0.08)))
            .unwrap();
        directory
    }

    fn request(customer: &str, items: Vec<(&str, i32)>, has_prescription: bool) -> PurchaseRequest {
        PurchaseRequest {
            customer: customer.to_string(),
            items: items
                .into_iter()
                .map(|(product, quantity)| crate::orders::PurchaseItem {
                    product: product.to_string(),
                    quantity,
                })
                .collect(),
            has_prescription,
        }
    }

    #[test]
    fn test_basic_purchase_commits_order_and_balance() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let receipt = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Alice", vec![("vitaminC", 5)], false),
        )
        .unwrap();

        assert_eq!(receipt.final_cost, dec!(50.00));
        assert_eq!(receipt.earned_points, 50);

        let alice = directory.find("B1").unwrap();
        assert_eq!(alice.reward_points(), 50);
        assert_eq!(alice.order_history().len(), 1);
        assert_eq!(alice.order_history()[0].total_cost(), dec!(50.00));
    }

    #[test]
    fn test_vip_purchase_with_redemption() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let receipt = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Bob", vec![("vitaminC", 10)], false),
        )
        .unwrap();

        assert_eq!(receipt.original_cost, dec!(100.00));
        assert_eq!(receipt.discount, dec!(8.00));
        assert_eq!(receipt.redeemed_value, dec!(20));
        assert_eq!(receipt.final_cost, dec!(72.00));
        assert_eq!(receipt.earned_points, 92);

        // 250 + (92 - 200) = 142
        assert_eq!(directory.find("V2").unwrap().reward_points(), 142);
    }

    #[test]
    fn test_unknown_product_leaves_state_unchanged() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let result = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("NewPerson", vec![("vitaminC", 1), ("unknown", 2)], false),
        );

        assert!(matches!(result, Err(OrderError::ProductNotFound(_))));
        // The new customer was not registered either.
        assert_eq!(directory.len(), 2);
        assert!(directory.find("NewPerson").is_none());
        assert!(directory
            .customers()
            .iter()
            .all(|c| c.order_history().is_empty()));
    }

    #[test]
    fn test_unknown_alphabetic_name_registers_basic_customer() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let receipt = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Cara", vec![("vitaminC", 2)], false),
        )
        .unwrap();

        // Suffixes 1 and 2 are taken, so Cara gets B3.
        assert_eq!(receipt.customer_id, "B3");
        let cara = directory.find("Cara").unwrap();
        assert!(!cara.is_vip());
        assert_eq!(cara.reward_points(), 20);
        assert_eq!(cara.order_history().len(), 1);
    }

    #[test]
    fn test_unknown_id_token_is_not_found() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let result = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("V9", vec![("vitaminC", 1)], false),
        );

        assert!(matches!(result, Err(OrderError::CustomerNotFound(_))));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_non_alphabetic_name_is_rejected() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let result = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Alice2", vec![("vitaminC", 1)], false),
        );

        assert!(matches!(result, Err(OrderError::InvalidCustomerName(_))));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_prescription_gate_drops_restricted_lines() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let receipt = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Alice", vec![("vitaminC", 1), ("antibiotic", 1)], false),
        )
        .unwrap();

        // Only the non-prescription line survives.
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].product_name, "vitaminC");
        assert_eq!(receipt.final_cost, dec!(10.00));
    }

    #[test]
    fn test_prescription_allows_restricted_lines() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let receipt = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Alice", vec![("antibiotic", 2)], true),
        )
        .unwrap();

        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.final_cost, dec!(10.00));
    }

    #[test]
    fn test_purchase_emptied_by_gate_is_rejected() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        let result = CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Alice", vec![("antibiotic", 1)], false),
        );

        assert!(matches!(result, Err(OrderError::NoEligibleItems)));
        assert!(directory.find("Alice").unwrap().order_history().is_empty());
    }

    #[test]
    fn test_order_snapshots_survive_product_changes() {
        let mut catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Alice", vec![("vitaminC", 1)], false),
        )
        .unwrap();

        // Mutate the catalog after the purchase.
        let index = catalog.find_index("vitaminC").unwrap();
        catalog.product_mut(index).unwrap().set_price(dec!(99.00));

        let history = CheckoutService::order_history(&directory, "Alice").unwrap();
        assert_eq!(history[0].lines()[0].unit_price, dec!(10.00));
    }

    #[test]
    fn test_order_history_unknown_customer() {
        let directory = sample_directory();
        let result = CheckoutService::order_history(&directory, "Zoe");
        assert!(matches!(result, Err(OrderError::CustomerNotFound(_))));
    }

    #[test]
    fn test_all_orders_spans_customers() {
        let catalog = sample_catalog();
        let mut directory = sample_directory();
        let rates = TierRates::default();

        CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Alice", vec![("vitaminC", 1)], false),
        )
        .unwrap();
        CheckoutService::make_purchase(
            &catalog,
            &mut directory,
            &rates,
            &request("Bob", vec![("vitaminC", 1)], false),
        )
        .unwrap();

        let records = CheckoutService::all_orders(&directory);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].customer_name, "Alice");
        assert_eq!(records[1].customer_name, "Bob");
    }
}

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A purchased line, snapshotted at purchase time.
///
/// Holds copies of the product name and unit price so later catalog
/// changes never alter recorded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// A completed transaction. Immutable once created; owned by the
/// purchasing customer's order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    lines: Vec<OrderLine>,
    total_cost: Decimal,
    earned_rewards: i64,
    placed_at: NaiveDateTime,
}

impl Order {
    pub fn new(
        lines: Vec<OrderLine>,
        total_cost: Decimal,
        earned_rewards: i64,
        placed_at: NaiveDateTime,
    ) -> Self {
        Self {
            lines,
            total_cost,
            earned_rewards,
            placed_at,
        }
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Amount charged for the order, after discount and redemption.
    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Reward points earned by the order (gross, before the redemption
    /// debit that was applied to the balance).
    pub fn earned_rewards(&self) -> i64 {
        self.earned_rewards
    }

    pub fn placed_at(&self) -> NaiveDateTime {
        self.placed_at
    }
}

/// Request DTO for a purchase
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurchaseRequest {
    /// Customer ID or name. An unknown alphabetic name registers a new
    /// Basic customer.
    #[validate(length(min = 1, message = "Customer identifier must not be empty"))]
    pub customer: String,
    #[validate(length(min = 1, message = "Purchase must contain at least one item"))]
    pub items: Vec<PurchaseItem>,
    /// Whether the buyer holds a doctor's prescription. Lines requiring
    /// one are dropped from the purchase when this is false.
    pub has_prescription: bool,
}

/// Request DTO for a single purchase line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PurchaseItem {
    #[validate(length(min = 1, message = "Product identifier must not be empty"))]
    pub product: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Result of pricing a transaction, before it is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingBreakdown {
    pub original_cost: Decimal,
    /// Discount subtracted from the charged amount (unrounded).
    pub discount: Decimal,
    /// Currency value redeemed from the reward balance.
    pub redeemed_value: Decimal,
    pub final_cost: Decimal,
    /// Points earned, computed on the original cost by the tier policy.
    pub earned_points: i64,
    /// Signed balance change: earned points minus the points consumed by
    /// redemption.
    pub net_points_delta: i64,
}

/// Response DTO for a committed purchase
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub customer_id: String,
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
    pub original_cost: Decimal,
    pub discount: Decimal,
    pub redeemed_value: Decimal,
    pub final_cost: Decimal,
    pub earned_points: i64,
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", "-".repeat(45))?;
        writeln!(f, "{:^45}", "Receipt")?;
        writeln!(f, "{}", "-".repeat(45))?;
        writeln!(f, "{:<20} {}", "Name:", self.customer_name)?;
        for line in &self.lines {
            writeln!(f, "{:<20} {}", "Product:", line.product_name)?;
            writeln!(f, "{:<20} {:.2} (AUD)", "Unit Price:", line.unit_price)?;
            writeln!(f, "{:<20} {}", "Quantity:", line.quantity)?;
            writeln!(f, "{}", "-".repeat(45))?;
        }
        if self.discount > Decimal::ZERO {
            writeln!(f, "{:<20} {:.2} (AUD)", "Original cost:", self.original_cost)?;
            writeln!(f, "{:<20} {:.2} (AUD)", "Discount:", self.discount)?;
        }
        if self.redeemed_value > Decimal::ZERO {
            writeln!(f, "{:<20} {:.2} (AUD)", "Reward redemption:", self.redeemed_value)?;
        }
        writeln!(f, "{:<20} {:.2} (AUD)", "Total cost:", self.final_cost)?;
        writeln!(f, "{:<20} {}", "Earned reward:", self.earned_points)?;
        write!(f, "{}", "-".repeat(45))
    }
}

/// An order paired with its owning customer, for ledger-wide listings
#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub customer_id: String,
    pub customer_name: String,
    pub order: Order,
}

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customers::error::CustomerError;
use crate::orders::Order;

/// Tier-wide reward rates shared by every customer of a tier.
///
/// Changing a rate here changes the next reward computation for all
/// customers of that tier; past orders keep their recorded values. The
/// rates are owned by the customer service and passed by reference into
/// computations, never held in global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRates {
    pub basic_reward_rate: Decimal,
    pub vip_reward_rate: Decimal,
}

impl Default for TierRates {
    fn default() -> Self {
        Self {
            basic_reward_rate: Decimal::ONE,
            vip_reward_rate: Decimal::ONE,
        }
    }
}

/// Customer loyalty tier.
///
/// Basic customers earn rewards on the full spend. VIP customers carry a
/// per-customer discount rate and earn rewards on the discounted spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Basic,
    Vip { discount_rate: Decimal },
}

impl CustomerTier {
    /// ID prefix letter for this tier ("B" or "V").
    pub fn prefix(&self) -> char {
        match self {
            CustomerTier::Basic => 'B',
            CustomerTier::Vip { .. } => 'V',
        }
    }

    /// Calculate the reward points earned for a spend amount.
    ///
    /// Basic: `round(spend * basic_reward_rate)`.
    /// VIP: the discount is applied unrounded, then
    /// `round((spend - discount) * vip_reward_rate)`.
    ///
    /// Rounding is midpoint-to-even at the final step of each formula,
    /// never accumulated beforehand.
    pub fn reward_points(&self, spend: Decimal, rates: &TierRates) -> Result<i64, CustomerError> {
        let points = match self {
            CustomerTier::Basic => (spend * rates.basic_reward_rate).round(),
            CustomerTier::Vip { discount_rate } => {
                let discounted = spend - spend * discount_rate;
                (discounted * rates.vip_reward_rate).round()
            }
        };
        points.to_i64().ok_or_else(|| {
            CustomerError::Calculation(format!("reward points out of range: {}", points))
        })
    }

    /// Calculate the standalone discount quote for a spend amount,
    /// rounded to a whole currency amount. Basic customers have no
    /// discount capability and always quote zero.
    pub fn discount(&self, spend: Decimal) -> Decimal {
        match self {
            CustomerTier::Basic => Decimal::ZERO,
            CustomerTier::Vip { discount_rate } => (spend * discount_rate).round(),
        }
    }
}

/// A customer with an accruing reward-point balance and an append-only
/// order history.
///
/// Identity fields are immutable after construction; the balance and the
/// history change only through [`Customer::credit_rewards`] and
/// [`Customer::record_order`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    id: String,
    name: String,
    reward_points: i64,
    tier: CustomerTier,
    order_history: Vec<Order>,
}

impl Customer {
    /// Create a Basic customer.
    pub fn basic(id: impl Into<String>, name: impl Into<String>, reward_points: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reward_points,
            tier: CustomerTier::Basic,
            order_history: Vec::new(),
        }
    }

    /// Create a VIP customer with a per-customer discount rate.
    pub fn vip(
        id: impl Into<String>,
        name: impl Into<String>,
        reward_points: i64,
        discount_rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reward_points,
            tier: CustomerTier::Vip { discount_rate },
            order_history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current reward-point balance. May be negative: redemption debits
    /// are not bounded by the earned amount.
    pub fn reward_points(&self) -> i64 {
        self.reward_points
    }

    pub fn tier(&self) -> &CustomerTier {
        &self.tier
    }

    pub fn is_vip(&self) -> bool {
        matches!(self.tier, CustomerTier::Vip { .. })
    }

    /// The VIP discount rate, or `None` for Basic customers.
    pub fn discount_rate(&self) -> Option<Decimal> {
        match self.tier {
            CustomerTier::Basic => None,
            CustomerTier::Vip { discount_rate } => Some(discount_rate),
        }
    }

    pub fn order_history(&self) -> &[Order] {
        &self.order_history
    }

    /// Apply a signed reward-point delta to the balance.
    pub(crate) fn credit_rewards(&mut self, delta: i64) {
        self.reward_points += delta;
    }

    /// Append a completed order to the history.
    pub(crate) fn record_order(&mut self, order: Order) {
        self.order_history.push(order);
    }

    /// Overwrite the VIP discount rate.
    pub(crate) fn set_discount_rate(&mut self, rate: Decimal) -> Result<(), CustomerError> {
        match &mut self.tier {
            CustomerTier::Vip { discount_rate } => {
                *discount_rate = rate;
                Ok(())
            }
            CustomerTier::Basic => Err(CustomerError::NotVip(self.id.clone())),
        }
    }
}

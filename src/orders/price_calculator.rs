use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::customers::{CustomerTier, TierRates};
use crate::orders::error::OrderError;
use crate::orders::models::PricingBreakdown;

/// Points required to redeem one redemption step.
const POINTS_PER_REDEMPTION: i64 = 100;
/// Currency units granted per redemption step.
const CURRENCY_PER_REDEMPTION: i64 = 10;

/// Service for pricing transactions: costs, discounts, reward redemption
/// and accrual.
pub struct PriceCalculator;

impl PriceCalculator {
    /// Calculate the subtotal for a single line
    pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
        unit_price * Decimal::from(quantity)
    }

    /// Calculate the original cost of an order from its
    /// `(unit_price, quantity)` lines
    pub fn original_cost(lines: &[(Decimal, i32)]) -> Decimal {
        lines
            .iter()
            .map(|(unit_price, quantity)| Self::line_subtotal(*unit_price, *quantity))
            .sum()
    }

    /// Currency value redeemable from a reward balance against a
    /// pre-redemption cost.
    ///
    /// Every 100 points redeem 10 currency units, capped at the
    /// whole-currency pre-redemption cost. Floor division is used on the
    /// balance, so a negative balance produces a negative redemption that
    /// raises the final cost.
    pub fn redeemable_value(balance: i64, pre_redemption: Decimal) -> Result<i64, OrderError> {
        let from_balance = balance.div_euclid(POINTS_PER_REDEMPTION) * CURRENCY_PER_REDEMPTION;
        let cap = pre_redemption.trunc().to_i64().ok_or_else(|| {
            OrderError::Calculation(format!("cost out of range: {}", pre_redemption))
        })?;
        Ok(from_balance.min(cap))
    }

    /// Price a transaction for a customer tier and reward balance.
    ///
    /// # Arguments
    /// * `tier` - Customer tier, supplying the discount rate for VIPs
    /// * `rates` - Current tier-wide reward rates
    /// * `balance` - The customer's reward-point balance before the purchase
    /// * `lines` - `(unit_price, quantity)` pairs for the purchased lines
    ///
    /// # Returns
    /// The full pricing breakdown. Nothing is committed; applying the
    /// balance delta and recording the order is the caller's single step.
    ///
    /// The charged amount subtracts an unrounded discount computed here,
    /// while the earned points come from the tier policy, which recomputes
    /// its own discount on the original cost. The two discount figures are
    /// deliberately independent paths; whether they should reconcile is an
    /// open product question, so both are kept as-is.
    pub fn price_order(
        tier: &CustomerTier,
        rates: &TierRates,
        balance: i64,
        lines: &[(Decimal, i32)],
    ) -> Result<PricingBreakdown, OrderError> {
        let original_cost = Self::original_cost(lines);

        let discount = match tier {
            CustomerTier::Basic => Decimal::ZERO,
            CustomerTier::Vip { discount_rate } => original_cost * discount_rate,
        };
        let pre_redemption = original_cost - discount;

        let redeemed = Self::redeemable_value(balance, pre_redemption)?;
        let redeemed_value = Decimal::from(redeemed);
        let final_cost = pre_redemption - redeemed_value;

        let earned_points = tier.reward_points(original_cost, rates)?;
        let net_points_delta = earned_points - redeemed * CURRENCY_PER_REDEMPTION;

        Ok(PricingBreakdown {
            original_cost,
            discount,
            redeemed_value,
            final_cost,
            earned_points,
            net_points_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_subtotal() {
        assert_eq!(PriceCalculator::line_subtotal(dec!(4.50), 2), dec!(9.00));
        assert_eq!(PriceCalculator::line_subtotal(dec!(3.75), 1), dec!(3.75));
    }

    #[test]
    fn test_original_cost_sums_lines() {
        let lines = vec![(dec!(10.00), 2), (dec!(5.50), 1)];
        assert_eq!(PriceCalculator::original_cost(&lines), dec!(25.50));
    }

    #[test]
    fn test_original_cost_empty() {
        assert_eq!(PriceCalculator::original_cost(&[]), dec!(0));
    }

    #[test]
    fn test_redeemable_value_steps_of_one_hundred_points() {
        // 250 points -> 2 full steps -> 20 currency units
        assert_eq!(PriceCalculator::redeemable_value(250, dec!(92.00)).unwrap(), 20);
        // 99 points is below a full step
        assert_eq!(PriceCalculator::redeemable_value(99, dec!(50.00)).unwrap(), 0);
    }

    #[test]
    fn test_redeemable_value_capped_by_cost() {
        // 1000 points could redeem 100, but the cost caps it at 15
        assert_eq!(PriceCalculator::redeemable_value(1000, dec!(15.75)).unwrap(), 15);
    }

    #[test]
    fn test_redeemable_value_negative_balance() {
        // Floor division: -50 // 100 = -1, so the redemption is -10
        assert_eq!(PriceCalculator::redeemable_value(-50, dec!(40.00)).unwrap(), -10);
    }

    #[test]
    fn test_basic_purchase_scenario() {
        // Basic customer, rate 1.0, balance 0, $50 of goods
        let rates = TierRates::default();
        let breakdown =
            PriceCalculator::price_order(&CustomerTier::Basic, &rates, 0, &[(dec!(50.00), 1)])
                .unwrap();

        assert_eq!(breakdown.original_cost, dec!(50.00));
        assert_eq!(breakdown.discount, dec!(0));
        assert_eq!(breakdown.redeemed_value, dec!(0));
        assert_eq!(breakdown.final_cost, dec!(50.00));
        assert_eq!(breakdown.earned_points, 50);
        assert_eq!(breakdown.net_points_delta, 50);
    }

    #[test]
    fn test_vip_purchase_scenario_with_redemption() {
        // VIP discount 0.08, vip rate 1.0, balance 250, $100 of goods
        let rates = TierRates::default();
        let tier = CustomerTier::Vip {
            discount_rate: dec!(0.08),
        };
        let breakdown =
            PriceCalculator::price_order(&tier, &rates, 250, &[(dec!(100.00), 1)]).unwrap();

        assert_eq!(breakdown.original_cost, dec!(100.00));
        assert_eq!(breakdown.discount, dec!(8.00));
        assert_eq!(breakdown.redeemed_value, dec!(20));
        assert_eq!(breakdown.final_cost, dec!(72.00));
        assert_eq!(breakdown.earned_points, 92);
        // 92 earned minus 200 points consumed by the redemption
        assert_eq!(breakdown.net_points_delta, -108);
    }

    #[test]
    fn test_basic_purchase_with_redemption() {
        let rates = TierRates::default();
        let breakdown =
            PriceCalculator::price_order(&CustomerTier::Basic, &rates, 120, &[(dec!(30.00), 1)])
                .unwrap();

        assert_eq!(breakdown.redeemed_value, dec!(10));
        assert_eq!(breakdown.final_cost, dec!(20.00));
        assert_eq!(breakdown.earned_points, 30);
        assert_eq!(breakdown.net_points_delta, -70);
    }

    #[test]
    fn test_vip_discount_is_unrounded_on_charged_path() {
        // 12.30 * 0.08 = 0.984: charged path keeps the fraction
        let rates = TierRates::default();
        let tier = CustomerTier::Vip {
            discount_rate: dec!(0.08),
        };
        let breakdown =
            PriceCalculator::price_order(&tier, &rates, 0, &[(dec!(12.30), 1)]).unwrap();

        assert_eq!(breakdown.discount, dec!(0.9840));
        assert_eq!(breakdown.final_cost, dec!(11.3160));
    }

    #[test]
    fn test_multiple_lines() {
        let rates = TierRates::default();
        let lines = vec![(dec!(10.00), 2), (dec!(5.00), 3)];
        let breakdown =
            PriceCalculator::price_order(&CustomerTier::Basic, &rates, 0, &lines).unwrap();

        assert_eq!(breakdown.original_cost, dec!(35.00));
        assert_eq!(breakdown.earned_points, 35);
    }
}

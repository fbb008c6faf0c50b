use rust_decimal::Decimal;

use crate::customers::error::CustomerError;
use crate::customers::models::TierRates;
use crate::customers::repository::CustomerDirectory;
use crate::validation;

/// Service for customer administration: tier-wide reward rates and
/// per-customer VIP discount rates.
///
/// Owns the directory and the shared [`TierRates`] value. All rate
/// mutations validate before touching state.
#[derive(Debug, Clone, Default)]
pub struct CustomerService {
    directory: CustomerDirectory,
    rates: TierRates,
}

impl CustomerService {
    /// Create a new CustomerService
    pub fn new(directory: CustomerDirectory, rates: TierRates) -> Self {
        Self { directory, rates }
    }

    pub fn directory(&self) -> &CustomerDirectory {
        &self.directory
    }

    pub fn rates(&self) -> &TierRates {
        &self.rates
    }

    /// Split borrow for the checkout path, which mutates the directory
    /// while reading the rates.
    pub(crate) fn parts_mut(&mut self) -> (&mut CustomerDirectory, &TierRates) {
        (&mut self.directory, &self.rates)
    }

    /// Set the reward rate shared by all Basic customers.
    ///
    /// The rate must be strictly positive; no upper bound is enforced.
    pub fn set_basic_reward_rate(&mut self, rate: Decimal) -> Result<(), CustomerError> {
        validation::validate_positive_rate(&rate)
            .map_err(|_| CustomerError::InvalidRate(format!("reward rate must be positive, got {}", rate)))?;

        self.rates.basic_reward_rate = rate;
        tracing::info!("Basic reward rate set to {}", rate);
        Ok(())
    }

    /// Set the reward rate shared by all VIP customers.
    pub fn set_vip_reward_rate(&mut self, rate: Decimal) -> Result<(), CustomerError> {
        validation::validate_positive_rate(&rate)
            .map_err(|_| CustomerError::InvalidRate(format!("reward rate must be positive, got {}", rate)))?;

        self.rates.vip_reward_rate = rate;
        tracing::info!("VIP reward rate set to {}", rate);
        Ok(())
    }

    /// Set the discount rate of a single VIP customer, looked up by ID or
    /// name.
    ///
    /// # Validation
    /// - The rate must be strictly positive (no upper bound, preserving
    ///   the permissive original behavior)
    /// - The customer must exist and be VIP
    pub fn set_vip_discount_rate(&mut self, token: &str, rate: Decimal) -> Result<(), CustomerError> {
        validation::validate_positive_rate(&rate)
            .map_err(|_| CustomerError::InvalidRate(format!("discount rate must be positive, got {}", rate)))?;

        let customer = self
            .directory
            .find_mut(token)
            .ok_or_else(|| CustomerError::NotFound(token.to_string()))?;

        customer.set_discount_rate(rate)?;
        tracing::info!("Discount rate for {} set to {}", customer.id(), rate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customers::models::Customer;
    use rust_decimal_macros::dec;

    fn service_with_customers() -> CustomerService {
        let mut directory = CustomerDirectory::new();
        directory.insert(Customer::basic("B1", "Alice", 0)).unwrap();
        directory
            .insert(Customer::vip("V2", "Bob", 0, dec!(0.08)))
            .unwrap();
        CustomerService::new(directory, TierRates::default())
    }

    #[test]
    fn test_set_basic_reward_rate() {
        let mut service = service_with_customers();
        service.set_basic_reward_rate(dec!(1.5)).unwrap();
        assert_eq!(service.rates().basic_reward_rate, dec!(1.5));
    }

    #[test]
    fn test_set_basic_reward_rate_rejects_non_positive() {
        let mut service = service_with_customers();

        assert!(matches!(
            service.set_basic_reward_rate(dec!(0)),
            Err(CustomerError::InvalidRate(_))
        ));
        assert!(matches!(
            service.set_basic_reward_rate(dec!(-0.5)),
            Err(CustomerError::InvalidRate(_))
        ));
        assert_eq!(service.rates().basic_reward_rate, Decimal::ONE);
    }

    #[test]
    fn test_set_vip_discount_rate() {
        let mut service = service_with_customers();
        service.set_vip_discount_rate("Bob", dec!(0.2)).unwrap();

        let customer = service.directory().find("V2").unwrap();
        assert_eq!(customer.discount_rate(), Some(dec!(0.2)));
    }

    #[test]
    fn test_set_vip_discount_rate_allows_rates_above_one() {
        // The original never capped discount rates; preserved deliberately.
        let mut service = service_with_customers();
        service.set_vip_discount_rate("V2", dec!(1.5)).unwrap();

        let customer = service.directory().find("V2").unwrap();
        assert_eq!(customer.discount_rate(), Some(dec!(1.5)));
    }

    #[test]
    fn test_set_vip_discount_rate_rejects_basic_customer() {
        let mut service = service_with_customers();
        let result = service.set_vip_discount_rate("Alice", dec!(0.2));
        assert!(matches!(result, Err(CustomerError::NotVip(_))));
    }

    #[test]
    fn test_set_vip_discount_rate_unknown_customer() {
        let mut service = service_with_customers();
        let result = service.set_vip_discount_rate("Zoe", dec!(0.2));
        assert!(matches!(result, Err(CustomerError::NotFound(_))));
    }
}

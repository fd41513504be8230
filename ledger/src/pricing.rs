//! Fee and payout calculations

use reforge_core::Amount;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_BALANCE: Amount = Amount::from_units(100);
pub const DEFAULT_SCAN_FEE_PERCENT: u64 = 5;
pub const DEFAULT_MIN_SCAN_FEE: Amount = Amount::from_units(10);
pub const DEFAULT_SELL_BACK_PERCENT: u64 = 90;

/// Economy parameters, loaded from the `[economy]` config section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Balance granted to a user on first login
    pub starting_balance: Amount,
    /// Scan fee as a percentage of the case price
    pub scan_fee_percent: u64,
    /// Lower bound for the scan fee
    pub min_scan_fee: Amount,
    /// Share of the catalog price paid out when selling
    pub sell_back_percent: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            scan_fee_percent: DEFAULT_SCAN_FEE_PERCENT,
            min_scan_fee: DEFAULT_MIN_SCAN_FEE,
            sell_back_percent: DEFAULT_SELL_BACK_PERCENT,
        }
    }
}

impl EconomyConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.scan_fee_percent > 100 {
            return Err(format!(
                "scan_fee_percent must be at most 100, got {}",
                self.scan_fee_percent
            ));
        }
        if self.sell_back_percent > 100 {
            return Err(format!(
                "sell_back_percent must be at most 100, got {}",
                self.sell_back_percent
            ));
        }
        Ok(())
    }

    /// `max(price * scan_fee_percent, min_scan_fee)`
    pub fn scan_fee(&self, case_price: Amount) -> Amount {
        case_price
            .percent(self.scan_fee_percent)
            .max(self.min_scan_fee)
    }

    pub fn sell_price(&self, item_price: Amount) -> Amount {
        item_price.percent(self.sell_back_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_fee_has_floor() {
        let config = EconomyConfig::default();
        assert_eq!(config.scan_fee(Amount::from_units(80)), Amount::from_units(10));
        assert_eq!(config.scan_fee(Amount::from_units(200)), Amount::from_units(10));
        assert_eq!(config.scan_fee(Amount::from_units(500)), Amount::from_units(25));
        assert_eq!(
            config.scan_fee(Amount::from_cents(123_45)),
            Amount::from_units(10)
        );
        // 5% of 345.67 = 17.2835
        assert_eq!(
            config.scan_fee(Amount::from_cents(345_67)),
            Amount::from_cents(17_28)
        );
    }

    #[test]
    fn test_sell_price() {
        let config = EconomyConfig::default();
        assert_eq!(config.sell_price(Amount::from_units(100)), Amount::from_units(90));
        // 90% of 0.05 = 0.045 -> 0.05
        assert_eq!(config.sell_price(Amount::from_cents(5)), Amount::from_cents(5));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EconomyConfig = serde_json::from_str(r#"{"min_scan_fee": 2.5}"#).unwrap();
        assert_eq!(config.min_scan_fee, Amount::from_cents(250));
        assert_eq!(config.starting_balance, DEFAULT_STARTING_BALANCE);
        assert!(config.validate().is_ok());

        let bad = EconomyConfig {
            sell_back_percent: 120,
            ..EconomyConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}

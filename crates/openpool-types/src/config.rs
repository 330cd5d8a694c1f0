//! Configuration for the settlement engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{constants, Result, SettlementError};

/// Deployment-level settlement configuration.
///
/// The rake rate is a deployment constant, never computed from bet data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fraction of a decisive pool retained by the operator, in `[0, 1)`.
    pub rake_rate: Decimal,
    /// Decimal places at which winner payouts are rounded (toward zero).
    pub payout_scale: u32,
    /// Unit-of-work lock timeout before failing with a retryable conflict.
    pub txn_timeout_ms: u64,
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `InvalidRakeRate` if the rate is outside `[0, 1)` and
    /// `InvalidPayoutScale` if the scale exceeds the decimal precision.
    pub fn validate(&self) -> Result<()> {
        if self.rake_rate < Decimal::ZERO || self.rake_rate >= Decimal::ONE {
            return Err(SettlementError::InvalidRakeRate(self.rake_rate));
        }
        if self.payout_scale > constants::MAX_PAYOUT_SCALE {
            return Err(SettlementError::InvalidPayoutScale(self.payout_scale));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rake_rate: Decimal::new(i64::from(constants::DEFAULT_RAKE_BPS), 4),
            payout_scale: constants::DEFAULT_PAYOUT_SCALE,
            txn_timeout_ms: constants::DEFAULT_TXN_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rake_is_three_percent() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.rake_rate, Decimal::new(3, 2));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn negative_rake_rejected() {
        let cfg = EngineConfig {
            rake_rate: Decimal::new(-1, 2),
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate().unwrap_err(),
            SettlementError::InvalidRakeRate(_)
        ));
    }

    #[test]
    fn full_rake_rejected() {
        let cfg = EngineConfig {
            rake_rate: Decimal::ONE,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn oversized_scale_rejected() {
        let cfg = EngineConfig {
            payout_scale: 40,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate().unwrap_err(),
            SettlementError::InvalidPayoutScale(40)
        ));
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = EngineConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.rake_rate, back.rake_rate);
        assert_eq!(cfg.payout_scale, back.payout_scale);
    }
}

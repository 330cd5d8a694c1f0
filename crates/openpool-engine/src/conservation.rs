//! Conservation invariant checker.
//!
//! Mathematical invariant enforced before every settlement commit:
//! ```text
//! Σ(credited payouts) + rake == total pool
//! ```
//!
//! If this invariant ever breaks, the unit of work aborts with a critical
//! alert. This is the ultimate safety net — the pool split already rounds
//! conservatively, so a violation here means something has gone
//! catastrophically wrong.

use openpool_types::{Result, SettlementError};
use rust_decimal::Decimal;

/// Accumulates the credits applied during one settlement and verifies them
/// against the pool before commit.
#[derive(Debug)]
pub struct ConservationCheck {
    /// The pool being divided.
    pool: Decimal,
    /// Total credited so far.
    credited: Decimal,
}

impl ConservationCheck {
    /// Start a check for one event's pool.
    #[must_use]
    pub fn new(pool: Decimal) -> Self {
        Self {
            pool,
            credited: Decimal::ZERO,
        }
    }

    /// Record one applied payout.
    ///
    /// # Errors
    /// Returns `AmountOverflow` if the running total overflows.
    pub fn record_credit(&mut self, amount: Decimal) -> Result<()> {
        self.credited = self
            .credited
            .checked_add(amount)
            .ok_or(SettlementError::AmountOverflow)?;
        Ok(())
    }

    /// Total credited so far.
    #[must_use]
    pub fn credited(&self) -> Decimal {
        self.credited
    }

    /// Verify that credits plus rake reproduce the pool exactly.
    ///
    /// # Errors
    /// Returns [`SettlementError::ConservationViolation`] on any mismatch.
    pub fn verify(&self, rake: Decimal) -> Result<()> {
        let accounted = self
            .credited
            .checked_add(rake)
            .ok_or(SettlementError::AmountOverflow)?;
        if accounted != self.pool {
            return Err(SettlementError::ConservationViolation {
                reason: format!(
                    "credited {} + rake {rake} != pool {} ",
                    self.credited, self.pool
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_accounting_passes() {
        let mut check = ConservationCheck::new(Decimal::new(100, 0));
        check.record_credit(Decimal::new(582, 1)).unwrap();
        check.record_credit(Decimal::new(388, 1)).unwrap();
        check.record_credit(Decimal::ZERO).unwrap();
        assert_eq!(check.credited(), Decimal::new(97, 0));
        assert!(check.verify(Decimal::new(3, 0)).is_ok());
    }

    #[test]
    fn missing_credit_fails() {
        let mut check = ConservationCheck::new(Decimal::new(100, 0));
        check.record_credit(Decimal::new(582, 1)).unwrap();
        let err = check.verify(Decimal::new(3, 0)).unwrap_err();
        assert!(matches!(err, SettlementError::ConservationViolation { .. }));
    }

    #[test]
    fn excess_rake_fails() {
        let mut check = ConservationCheck::new(Decimal::new(100, 0));
        check.record_credit(Decimal::new(97, 0)).unwrap();
        assert!(check.verify(Decimal::new(4, 0)).is_err());
    }

    #[test]
    fn empty_pool_verifies_with_zero_rake() {
        let check = ConservationCheck::new(Decimal::ZERO);
        assert!(check.verify(Decimal::ZERO).is_ok());
    }
}

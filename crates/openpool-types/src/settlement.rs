//! Settlement outputs returned to the outcome lifecycle caller.
//!
//! These are ephemeral: the durable record of a settlement is the bets'
//! terminal statuses plus the ledger/treasury entries, not this struct.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BetId, BetStatus, BettorId, EventId, OutcomeSide};

/// The computed outcome for one bet within a settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub bet_id: BetId,
    pub bettor: BettorId,
    /// The side the bet backed.
    pub side: OutcomeSide,
    /// The original stake.
    pub amount: Decimal,
    /// What the bettor is credited: a proportional share of the net pool
    /// (won), the full stake (refunded), or zero (lost).
    pub payout: Decimal,
    /// The bet's new terminal status.
    pub status: BetStatus,
}

/// The result of settling one event's pool, returned once per `resolve`
/// call for confirmation and telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResult {
    pub event_id: EventId,
    /// Sum of all active stakes fetched for the event.
    pub total_pool: Decimal,
    /// Operator cut, including any rounding slack from proportional division.
    pub rake: Decimal,
    pub payouts: Vec<Payout>,
}

impl SettlementResult {
    /// An empty result for an event with no active bets.
    #[must_use]
    pub fn noop(event_id: EventId) -> Self {
        Self {
            event_id,
            total_pool: Decimal::ZERO,
            rake: Decimal::ZERO,
            payouts: Vec::new(),
        }
    }

    /// Whether this settlement touched no bets.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.payouts.is_empty() && self.total_pool.is_zero()
    }

    /// Total credited to bettors across all payouts.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.payouts.iter().map(|p| p.payout).sum()
    }

    /// The payouts that ended in `WON` status.
    pub fn winners(&self) -> impl Iterator<Item = &Payout> {
        self.payouts.iter().filter(|p| p.status == BetStatus::Won)
    }
}

impl std::fmt::Display for SettlementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Settlement[{}] pool={} rake={} payouts={}",
            self.event_id,
            self.total_pool,
            self.rake,
            self.payouts.len(),
        )
    }
}

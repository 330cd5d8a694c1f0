//! The store surface the settlement engine settles against.
//!
//! The engine owns neither bets, balances, nor accounting journals — it
//! drives them through these traits, inside one atomic unit of work. A
//! store implementation must guarantee that two concurrent units for the
//! same event cannot both observe the same bets as active: one blocks until
//! the other commits, or fails with a retryable conflict.

use openpool_types::{
    Bet, BetId, BetStatus, BettorId, EventId, LedgerEntry, Result, TreasuryEntry,
};
use rust_decimal::Decimal;

/// One atomic unit of work against the durable store.
///
/// Every mutation made through a unit becomes observable only when the
/// enclosing [`PoolStore::transact`] call commits. Any error discards the
/// whole unit.
pub trait SettlementUnit {
    /// Fetch every bet for `event_id` currently in `ACTIVE` status.
    fn active_bets(&mut self, event_id: &EventId) -> Result<Vec<Bet>>;

    /// Transition a bet's status. Only `ACTIVE` bets may transition, and
    /// only to a terminal status.
    fn update_status(&mut self, bet_id: BetId, status: BetStatus) -> Result<()>;

    /// Credit a bettor's spendable balance.
    fn credit(&mut self, bettor: BettorId, amount: Decimal) -> Result<()>;

    /// Append one bettor-facing accounting entry. Append-only; a replayed
    /// entry id is rejected.
    fn append_ledger(&mut self, entry: LedgerEntry) -> Result<()>;

    /// Append one operator-facing rake entry. Append-only; a replayed
    /// entry id is rejected.
    fn append_treasury(&mut self, entry: TreasuryEntry) -> Result<()>;
}

/// A durable store capable of running serialized atomic units of work.
pub trait PoolStore {
    /// Run `f` against a unit of work. Commit on `Ok`, discard every
    /// staged mutation on `Err`.
    ///
    /// # Errors
    /// Propagates any error from `f`; fails with a retryable
    /// `SettlementInProgress` when the unit cannot be serialized in time.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn SettlementUnit) -> Result<T>;
}

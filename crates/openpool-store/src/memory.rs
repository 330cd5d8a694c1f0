//! In-memory reference store with serialized staged-commit transactions.
//!
//! The store is the source of truth for bets, spendable balances, and the
//! accounting journals. All mutations inside a unit of work are staged
//! against a copy of the state and swapped in on commit, so a failed unit
//! leaves no partial effects. Units are serialized on a timed mutex: the
//! unit that loses the race either waits for the winner's commit or fails
//! with a retryable conflict.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use openpool_types::{
    constants, Bet, BetId, BetStatus, BettorId, EventId, LedgerEntry, Result, SettlementError,
    TreasuryEntry,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::dedup::EntryGuard;
use crate::unit::{PoolStore, SettlementUnit};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    /// All bets by id.
    bets: HashMap<BetId, Bet>,
    /// Bet ids per event, in placement order.
    by_event: HashMap<EventId, Vec<BetId>>,
    /// Per-bettor spendable balance.
    balances: HashMap<BettorId, Decimal>,
    /// Append-only bettor-facing journal.
    ledger: Vec<LedgerEntry>,
    /// Append-only operator-facing journal.
    treasury: Vec<TreasuryEntry>,
    /// Duplicate-entry guard over both journals.
    applied: EntryGuard,
}

/// In-memory [`PoolStore`] implementation.
///
/// Cloning the handle shares the underlying state, so one store can be
/// driven from several threads; the mutex serializes their units of work.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    txn_timeout: Duration,
}

impl MemoryStore {
    /// Create an empty store with the default unit-of-work timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(constants::DEFAULT_TXN_TIMEOUT_MS))
    }

    /// Create an empty store with an explicit unit-of-work timeout.
    #[must_use]
    pub fn with_timeout(txn_timeout: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            txn_timeout,
        }
    }

    /// Seed a bet record (placement itself is outside the engine).
    ///
    /// # Errors
    /// Returns `DuplicateBet` if a bet with this id already exists.
    pub fn insert_bet(&self, bet: Bet) -> Result<()> {
        let mut state = self.state.lock();
        if state.bets.contains_key(&bet.id) {
            return Err(SettlementError::DuplicateBet(bet.id));
        }
        state
            .by_event
            .entry(bet.event_id.clone())
            .or_default()
            .push(bet.id);
        state.bets.insert(bet.id, bet);
        Ok(())
    }

    /// Credit a bettor outside any settlement (e.g. a deposit).
    pub fn deposit(&self, bettor: BettorId, amount: Decimal) {
        let mut state = self.state.lock();
        *state.balances.entry(bettor).or_insert(Decimal::ZERO) += amount;
    }

    /// A bettor's spendable balance.
    #[must_use]
    pub fn balance(&self, bettor: BettorId) -> Decimal {
        self.state
            .lock()
            .balances
            .get(&bettor)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Look up a bet by id.
    #[must_use]
    pub fn bet(&self, bet_id: BetId) -> Option<Bet> {
        self.state.lock().bets.get(&bet_id).cloned()
    }

    /// All ledger entries recorded for an event, in append order.
    #[must_use]
    pub fn ledger_for_event(&self, event_id: &EventId) -> Vec<LedgerEntry> {
        self.state
            .lock()
            .ledger
            .iter()
            .filter(|e| &e.event_id == event_id)
            .cloned()
            .collect()
    }

    /// All treasury entries, in append order.
    #[must_use]
    pub fn treasury_entries(&self) -> Vec<TreasuryEntry> {
        self.state.lock().treasury.clone()
    }

    /// Total rake collected across all settlements.
    #[must_use]
    pub fn treasury_total(&self) -> Decimal {
        self.state.lock().treasury.iter().map(|e| e.amount).sum()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolStore for MemoryStore {
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn SettlementUnit) -> Result<T>,
    {
        let Some(mut guard) = self.state.try_lock_for(self.txn_timeout) else {
            tracing::warn!(
                timeout_ms = %self.txn_timeout.as_millis(),
                "unit of work timed out waiting for store lock"
            );
            return Err(SettlementError::SettlementInProgress);
        };

        // Stage against a copy; swap in only on success.
        let mut staged = guard.clone();
        match f(&mut MemoryUnit { state: &mut staged }) {
            Ok(value) => {
                *guard = staged;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "unit of work discarded");
                Err(err)
            }
        }
    }
}

struct MemoryUnit<'a> {
    state: &'a mut MemoryState,
}

impl SettlementUnit for MemoryUnit<'_> {
    fn active_bets(&mut self, event_id: &EventId) -> Result<Vec<Bet>> {
        let mut bets: Vec<Bet> = self
            .state
            .by_event
            .get(event_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.state.bets.get(id))
            .filter(|bet| bet.is_active())
            .cloned()
            .collect();
        // UUIDv7 ids are time-ordered; sort for deterministic application.
        bets.sort_by_key(|bet| bet.id);
        Ok(bets)
    }

    fn update_status(&mut self, bet_id: BetId, status: BetStatus) -> Result<()> {
        let bet = self
            .state
            .bets
            .get_mut(&bet_id)
            .ok_or(SettlementError::BetNotFound(bet_id))?;

        if bet.status.is_terminal() || !status.is_terminal() {
            return Err(SettlementError::StatusTransition {
                bet_id,
                from: bet.status,
                to: status,
            });
        }

        bet.status = status;
        Ok(())
    }

    fn credit(&mut self, bettor: BettorId, amount: Decimal) -> Result<()> {
        *self.state.balances.entry(bettor).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    fn append_ledger(&mut self, entry: LedgerEntry) -> Result<()> {
        self.state.applied.mark_applied(entry.id)?;
        self.state.ledger.push(entry);
        Ok(())
    }

    fn append_treasury(&mut self, entry: TreasuryEntry) -> Result<()> {
        self.state.applied.mark_applied(entry.id)?;
        self.state.treasury.push(entry);
        Ok(())
    }
}

//! The settlement operation.
//!
//! One entry point: [`SettlementEngine::resolve`], invoked by the outcome
//! lifecycle collaborator once an event is irrevocably final. Active-bet
//! fetch, pool split, status transitions, balance credits, accounting
//! appends, and the conservation audit all happen inside one atomic unit
//! of work; any failure leaves external state untouched.

use chrono::Utc;
use openpool_types::{
    BetStatus, EngineConfig, EntryId, EntryKind, EventId, LedgerEntry, OutcomeSide, Result,
    SettlementError, SettlementResult, TreasuryEntry,
};
use rust_decimal::Decimal;

use openpool_store::PoolStore;

use crate::conservation::ConservationCheck;
use crate::payout::split_pool;

/// Pari-mutuel settlement engine over a generic pool store.
///
/// The engine holds no event state of its own: eligibility is the
/// `ACTIVE`-status filter evaluated inside the same unit of work that flips
/// the status, which turns the store's own serialization into the
/// at-most-once mechanism. A second `resolve` for the same event observes
/// zero active bets and returns the no-op result.
#[derive(Debug)]
pub struct SettlementEngine<S: PoolStore> {
    store: S,
    config: EngineConfig,
}

impl<S: PoolStore> SettlementEngine<S> {
    /// Create an engine with the default deployment configuration.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
        }
    }

    /// Create an engine with an explicit configuration.
    ///
    /// # Errors
    /// Returns a validation error for a rake rate outside `[0, 1)` or an
    /// unsupported payout scale.
    pub fn with_config(store: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settle one finished event.
    ///
    /// `winning_side` present identifies the decisive winner; absent encodes
    /// a draw or void outcome. Returns the computed [`SettlementResult`] on
    /// commit; on any error the store is unchanged.
    ///
    /// # Errors
    /// - validation errors for a blank event id or side label
    /// - `SettlementInProgress` (retryable) when a concurrent settlement
    ///   holds the unit-of-work lock past the timeout
    /// - store / arithmetic errors, which abort the unit of work
    pub fn resolve(
        &self,
        event_id: &EventId,
        winning_side: Option<&OutcomeSide>,
    ) -> Result<SettlementResult> {
        if event_id.is_blank() {
            return Err(SettlementError::EmptyEventId);
        }
        if let Some(side) = winning_side {
            if side.is_blank() {
                return Err(SettlementError::EmptySide);
            }
        }

        let result = self.store.transact(|unit| {
            let bets = unit.active_bets(event_id)?;
            if bets.is_empty() {
                return Ok(SettlementResult::noop(event_id.clone()));
            }

            let split = split_pool(&bets, winning_side, &self.config)?;
            let mut audit = ConservationCheck::new(split.total_pool);
            let now = Utc::now();

            for payout in &split.payouts {
                unit.update_status(payout.bet_id, payout.status)?;
                if payout.payout > Decimal::ZERO {
                    unit.credit(payout.bettor, payout.payout)?;
                }
                audit.record_credit(payout.payout)?;
                unit.append_ledger(LedgerEntry {
                    id: EntryId::for_bet(event_id, payout.bet_id),
                    event_id: event_id.clone(),
                    bet_id: payout.bet_id,
                    bettor: payout.bettor,
                    kind: entry_kind(payout.status)?,
                    amount: payout.payout,
                    recorded_at: now,
                })?;
            }

            if split.rake > Decimal::ZERO {
                unit.append_treasury(TreasuryEntry {
                    id: EntryId::for_rake(event_id),
                    event_id: event_id.clone(),
                    amount: split.rake,
                    collected_at: now,
                })?;
            }

            audit.verify(split.rake)?;

            Ok(SettlementResult {
                event_id: event_id.clone(),
                total_pool: split.total_pool,
                rake: split.rake,
                payouts: split.payouts,
            })
        })?;

        if result.is_noop() {
            tracing::debug!(event = %event_id, "no active bets, settlement is a no-op");
        } else {
            tracing::info!(
                event = %event_id,
                pool = %result.total_pool,
                rake = %result.rake,
                payouts = result.payouts.len(),
                winners = result.winners().count(),
                "settlement committed"
            );
        }
        Ok(result)
    }
}

/// The accounting kind for a terminal payout status.
fn entry_kind(status: BetStatus) -> Result<EntryKind> {
    match status {
        BetStatus::Won => Ok(EntryKind::BetWon),
        BetStatus::Lost => Ok(EntryKind::BetLost),
        BetStatus::Refunded => Ok(EntryKind::BetRefunded),
        BetStatus::Active => Err(SettlementError::Internal(
            "payout carried a non-terminal status".into(),
        )),
    }
}

//! Error types for the OpenPool settlement engine.
//!
//! All errors use the `OP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors
//! - 2xx: Store errors
//! - 3xx: Conflict errors (retryable under normal concurrent operation)
//! - 4xx: Arithmetic / invariant errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{BetId, BetStatus, EntryId};

/// Central error enum for all OpenPool operations.
///
/// Any error raised inside a unit of work aborts the entire unit — no
/// partial balance or status change is observable afterwards.
#[derive(Debug, Error)]
pub enum SettlementError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The event identifier carries no usable content.
    #[error("OP_ERR_100: Event id is blank")]
    EmptyEventId,

    /// The winning side label carries no usable content.
    #[error("OP_ERR_101: Winning side label is blank")]
    EmptySide,

    /// A fetched bet has a non-positive stake.
    #[error("OP_ERR_102: Invalid stake on bet {bet_id}: {amount}")]
    InvalidAmount { bet_id: BetId, amount: Decimal },

    /// The configured rake rate is outside `[0, 1)`.
    #[error("OP_ERR_103: Invalid rake rate: {0}")]
    InvalidRakeRate(Decimal),

    /// The configured payout scale exceeds the decimal type's precision.
    #[error("OP_ERR_104: Invalid payout scale: {0}")]
    InvalidPayoutScale(u32),

    // =================================================================
    // Store Errors (2xx)
    // =================================================================
    /// The referenced bet does not exist in the store.
    #[error("OP_ERR_200: Bet not found: {0}")]
    BetNotFound(BetId),

    /// A status transition was attempted on a bet that is not active.
    /// Terminal bets are immutable evidence of a past settlement.
    #[error("OP_ERR_201: Illegal status transition on bet {bet_id}: {from} -> {to}")]
    StatusTransition {
        bet_id: BetId,
        from: BetStatus,
        to: BetStatus,
    },

    /// The backing store failed or is unreachable.
    #[error("OP_ERR_202: Store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// A bet with this id already exists.
    #[error("OP_ERR_203: Bet already exists: {0}")]
    DuplicateBet(BetId),

    // =================================================================
    // Conflict Errors (3xx)
    // =================================================================
    /// Another settlement holds the unit-of-work lock. Retryable; after a
    /// confirming re-check the caller observes the no-op result.
    #[error("OP_ERR_300: Concurrent settlement in progress")]
    SettlementInProgress,

    /// An accounting entry with this id was already applied.
    #[error("OP_ERR_301: Accounting entry already applied: {0}")]
    DuplicateEntry(EntryId),

    // =================================================================
    // Arithmetic / Invariant Errors (4xx)
    // =================================================================
    /// A decimal operation overflowed.
    #[error("OP_ERR_400: Amount overflow during pool arithmetic")]
    AmountOverflow,

    /// Payouts plus rake did not reproduce the pool exactly — critical
    /// safety alert.
    #[error("OP_ERR_401: Conservation violation: {reason}")]
    ConservationViolation { reason: String },

    /// A computed payout went negative.
    #[error("OP_ERR_402: Negative payout for bet {bet_id}: {payout}")]
    NegativePayout { bet_id: BetId, payout: Decimal },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OP_ERR_900: Internal error: {0}")]
    Internal(String),
}

impl SettlementError {
    /// Whether the caller may retry and expect the conflict to resolve.
    ///
    /// Only the 3xx group is expected under normal concurrent operation;
    /// everything else is an operational alarm.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SettlementInProgress | Self::DuplicateEntry(_)
        )
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SettlementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SettlementError::BetNotFound(BetId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("OP_ERR_200"), "Got: {msg}");
    }

    #[test]
    fn status_transition_display() {
        let err = SettlementError::StatusTransition {
            bet_id: BetId::new(),
            from: BetStatus::Won,
            to: BetStatus::Refunded,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OP_ERR_201"));
        assert!(msg.contains("WON"));
        assert!(msg.contains("REFUNDED"));
    }

    #[test]
    fn conflict_errors_are_retryable() {
        assert!(SettlementError::SettlementInProgress.is_retryable());
        assert!(SettlementError::DuplicateEntry(EntryId::for_rake(&crate::EventId::new("e"))).is_retryable());
        assert!(!SettlementError::AmountOverflow.is_retryable());
        assert!(
            !SettlementError::ConservationViolation {
                reason: "test".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn all_errors_have_op_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SettlementError::EmptyEventId),
            Box::new(SettlementError::SettlementInProgress),
            Box::new(SettlementError::AmountOverflow),
            Box::new(SettlementError::Internal("test".into())),
            Box::new(SettlementError::InvalidRakeRate(Decimal::new(2, 0))),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OP_ERR_"),
                "Error missing OP_ERR_ prefix: {msg}"
            );
        }
    }
}

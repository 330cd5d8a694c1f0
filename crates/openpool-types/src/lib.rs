//! # openpool-types
//!
//! Shared types, errors, and configuration for the **OpenPool** pari-mutuel
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`EventId`], [`OutcomeSide`], [`BetId`], [`BettorId`], [`EntryId`]
//! - **Bet model**: [`Bet`], [`BetStatus`]
//! - **Settlement model**: [`SettlementResult`], [`Payout`]
//! - **Accounting model**: [`LedgerEntry`], [`TreasuryEntry`], [`EntryKind`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`SettlementError`] with `OP_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod bet;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod settlement;

// Re-export all primary types at crate root for ergonomic imports:
//   use openpool_types::{Bet, BetStatus, SettlementResult, ...};

pub use bet::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use settlement::*;

// Constants are accessed via `openpool_types::constants::FOO`
// (not re-exported to avoid name collisions).

//! # openpool-engine
//!
//! The pari-mutuel settlement engine: given a closed pool of side-bets and
//! a resolved outcome, compute the rake, divide the net pool proportionally
//! among winning bettors, and apply the resulting balance credits,
//! bet-status transitions, and accounting records as one atomic unit of
//! work.
//!
//! ## Guarantees
//!
//! 1. **Conservation** — `Σ payouts + rake == total pool`, exactly, in
//!    checked `Decimal` arithmetic; rounding slack goes to the rake.
//! 2. **At-most-once** — eligibility is the `ACTIVE`-status filter inside
//!    the same unit of work that flips the status; a repeated `resolve`
//!    observes nothing active and returns a no-op result.
//! 3. **Atomicity** — any failure aborts the whole unit of work; no partial
//!    balance or status change is observable.

pub mod conservation;
pub mod engine;
pub mod payout;

pub use conservation::ConservationCheck;
pub use engine::SettlementEngine;
pub use payout::{split_pool, PoolSplit};

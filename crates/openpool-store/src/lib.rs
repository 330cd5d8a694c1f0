//! # openpool-store
//!
//! The store surface the OpenPool settlement engine settles against, plus
//! an in-memory reference implementation.
//!
//! ## Architecture
//!
//! - [`SettlementUnit`] / [`PoolStore`] — the consumed interfaces: active-bet
//!   fetch, status transitions, balance credits, and append-only accounting,
//!   all inside one atomic unit of work.
//! - [`EntryGuard`] — bounded duplicate-entry guard; deterministic entry ids
//!   collide here instead of double-crediting.
//! - [`MemoryStore`] — serialized staged-commit transactions over a timed
//!   mutex; the unit that loses the race waits or fails with a retryable
//!   conflict.

pub mod dedup;
pub mod memory;
pub mod unit;

pub use dedup::EntryGuard;
pub use memory::MemoryStore;
pub use unit::{PoolStore, SettlementUnit};

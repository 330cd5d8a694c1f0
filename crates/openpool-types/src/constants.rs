//! System-wide constants for the OpenPool settlement engine.

/// Default rake rate in basis points (300 = 3%).
pub const DEFAULT_RAKE_BPS: u32 = 300;

/// Decimal places at which winner payouts are rounded. Rounding slack is
/// reconciled into the rake.
pub const DEFAULT_PAYOUT_SCALE: u32 = 8;

/// Maximum payout scale supported by the decimal type.
pub const MAX_PAYOUT_SCALE: u32 = 28;

/// Default unit-of-work lock timeout in milliseconds. Exceeding it fails
/// the settlement with a retryable conflict error.
pub const DEFAULT_TXN_TIMEOUT_MS: u64 = 5_000;

/// Duplicate-entry guard cache size (number of entry ids to remember).
pub const ENTRY_GUARD_CACHE_SIZE: usize = 500_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenPool";

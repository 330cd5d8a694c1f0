//! Identifiers used throughout OpenPool.
//!
//! Entity ids use UUIDv7 for time-ordered lexicographic sorting. Accounting
//! entry ids are derived deterministically from the records they describe,
//! so replaying the same settlement names the same entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// Opaque identifier of one outcome event (a fight, a match, a race).
///
/// Supplied by the outcome lifecycle collaborator; references at most one
/// settlement lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier carries no usable content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OutcomeSide
// ---------------------------------------------------------------------------

/// The label of one competing outcome a bet can back (e.g. a fighter name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OutcomeSide(pub String);

impl OutcomeSide {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for OutcomeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// BetId
// ---------------------------------------------------------------------------

/// Globally unique bet identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BetId(pub Uuid);

impl BetId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for BetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// BettorId
// ---------------------------------------------------------------------------

/// Unique identifier for a bettor account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BettorId(pub Uuid);

impl BettorId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for BettorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BettorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EntryId
// ---------------------------------------------------------------------------

/// Unique identifier for an accounting entry (ledger or treasury).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Deterministic `EntryId` for the ledger entry attributing one bet's
    /// settlement outcome.
    ///
    /// Settling the same bet for the same event always produces the same id,
    /// so a replayed application collides in the duplicate-entry guard
    /// instead of double-crediting.
    #[must_use]
    pub fn for_bet(event_id: &EventId, bet_id: BetId) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"openpool:ledger_entry:v1:");
        hasher.update(event_id.as_str().as_bytes());
        hasher.update(bet_id.0.as_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }

    /// Deterministic `EntryId` for the treasury entry recording one event's
    /// rake. At most one such entry exists per event.
    #[must_use]
    pub fn for_rake(event_id: &EventId) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"openpool:treasury_entry:v1:");
        hasher.update(event_id.as_str().as_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

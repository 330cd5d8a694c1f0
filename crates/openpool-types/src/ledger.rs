//! Append-only accounting records written by settlement.
//!
//! Every settled bet produces one [`LedgerEntry`]; every settlement with a
//! positive rake produces one [`TreasuryEntry`]. Entries are never mutated
//! or deleted, and their ids are deterministic so a replayed application
//! names the same records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BetId, BetStatus, BettorId, EntryId, EventId};

/// What kind of settlement outcome a ledger entry attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// The bet won; `amount` is the proportional share credited.
    BetWon,
    /// The bet lost; `amount` is zero.
    BetLost,
    /// The bet was refunded in full (draw, void, or no eligible winner).
    BetRefunded,
}

impl EntryKind {
    /// The terminal bet status this entry kind corresponds to.
    #[must_use]
    pub fn status(self) -> BetStatus {
        match self {
            Self::BetWon => BetStatus::Won,
            Self::BetLost => BetStatus::Lost,
            Self::BetRefunded => BetStatus::Refunded,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BetWon => write!(f, "BET_WON"),
            Self::BetLost => write!(f, "BET_LOST"),
            Self::BetRefunded => write!(f, "BET_REFUNDED"),
        }
    }
}

/// One bettor-facing accounting record from a settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Deterministic id — see [`EntryId::for_bet`].
    pub id: EntryId,
    pub event_id: EventId,
    pub bet_id: BetId,
    pub bettor: BettorId,
    pub kind: EntryKind,
    /// The amount credited to the bettor. Zero for lost bets.
    pub amount: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Hex SHA-256 over the serialized record, for audit trails.
    #[must_use]
    pub fn digest(&self) -> String {
        use sha2::{Digest, Sha256};
        let bytes = serde_json::to_vec(self).expect("ledger entry serializes");
        hex::encode(Sha256::digest(&bytes))
    }
}

/// One operator-facing record of the rake retained from a settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryEntry {
    /// Deterministic id — see [`EntryId::for_rake`].
    pub id: EntryId,
    pub event_id: EventId,
    /// The rake, including rounding slack from proportional division.
    pub amount: Decimal,
    pub collected_at: DateTime<Utc>,
}

impl TreasuryEntry {
    /// Hex SHA-256 over the serialized record, for audit trails.
    #[must_use]
    pub fn digest(&self) -> String {
        use sha2::{Digest, Sha256};
        let bytes = serde_json::to_vec(self).expect("treasury entry serializes");
        hex::encode(Sha256::digest(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry() -> LedgerEntry {
        let event = EventId::new("fight-7");
        let bet = BetId::new();
        LedgerEntry {
            id: EntryId::for_bet(&event, bet),
            event_id: event,
            bet_id: bet,
            bettor: BettorId::new(),
            kind: EntryKind::BetWon,
            amount: Decimal::new(582, 1),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn entry_kind_display() {
        assert_eq!(format!("{}", EntryKind::BetWon), "BET_WON");
        assert_eq!(format!("{}", EntryKind::BetRefunded), "BET_REFUNDED");
    }

    #[test]
    fn entry_kind_maps_to_status() {
        assert_eq!(EntryKind::BetWon.status(), BetStatus::Won);
        assert_eq!(EntryKind::BetLost.status(), BetStatus::Lost);
        assert_eq!(EntryKind::BetRefunded.status(), BetStatus::Refunded);
    }

    #[test]
    fn digest_is_stable_hex() {
        let entry = make_entry();
        let d1 = entry.digest();
        let d2 = entry.digest();
        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 64);
        assert!(d1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_changes_with_content() {
        let entry = make_entry();
        let mut other = entry.clone();
        other.amount += Decimal::ONE;
        assert_ne!(entry.digest(), other.digest());
    }

    #[test]
    fn ledger_entry_serde_roundtrip() {
        let entry = make_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let back: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry.id, back.id);
        assert_eq!(entry.amount, back.amount);
        assert_eq!(entry.kind, back.kind);
    }
}

//! Bet records — the settlement engine's sole input.
//!
//! A bet in `ACTIVE` status is eligible for the next settlement of its
//! event. Any other status is immutable evidence of a past settlement and
//! must never be re-read as eligible input.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BetId, BettorId, EventId, OutcomeSide};

/// Lifecycle status of a bet. Transitions exactly once:
/// `Active` → `Won` | `Lost` | `Refunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum BetStatus {
    Active,
    Won,
    Lost,
    Refunded,
}

impl BetStatus {
    /// Whether this status is terminal (the bet has been settled).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl std::fmt::Display for BetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Won => write!(f, "WON"),
            Self::Lost => write!(f, "LOST"),
            Self::Refunded => write!(f, "REFUNDED"),
        }
    }
}

/// A single wager backing one side of an event's pool.
///
/// Created at placement (outside this engine); mutated only by settlement,
/// exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    /// The event whose pool this bet joined.
    pub event_id: EventId,
    pub bettor: BettorId,
    /// The outcome side this bet backs.
    pub side: OutcomeSide,
    /// Stake, already collected from the bettor at placement.
    pub amount: Decimal,
    pub status: BetStatus,
    pub placed_at: DateTime<Utc>,
}

impl Bet {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == BetStatus::Active
    }
}

impl std::fmt::Display for Bet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bet[{}] {} {} on {} ({})",
            self.id, self.event_id, self.amount, self.side, self.status,
        )
    }
}

#[cfg(feature = "test-helpers")]
impl Bet {
    /// Fabricate an active bet for tests and examples.
    #[must_use]
    pub fn dummy(event_id: &EventId, side: &OutcomeSide, amount: Decimal) -> Self {
        Self {
            id: BetId::new(),
            event_id: event_id.clone(),
            bettor: BettorId::new(),
            side: side.clone(),
            amount,
            status: BetStatus::Active,
            placed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bet() -> Bet {
        Bet {
            id: BetId::new(),
            event_id: EventId::new("fight-1"),
            bettor: BettorId::new(),
            side: OutcomeSide::new("A"),
            amount: Decimal::new(30, 0),
            status: BetStatus::Active,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn active_is_not_terminal() {
        assert!(!BetStatus::Active.is_terminal());
        assert!(BetStatus::Won.is_terminal());
        assert!(BetStatus::Lost.is_terminal());
        assert!(BetStatus::Refunded.is_terminal());
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", BetStatus::Active), "ACTIVE");
        assert_eq!(format!("{}", BetStatus::Refunded), "REFUNDED");
    }

    #[test]
    fn bet_display_names_side_and_status() {
        let bet = make_bet();
        let s = format!("{bet}");
        assert!(s.contains("on A"));
        assert!(s.contains("ACTIVE"));
    }

    #[test]
    fn bet_serde_roundtrip() {
        let bet = make_bet();
        let json = serde_json::to_string(&bet).unwrap();
        let back: Bet = serde_json::from_str(&json).unwrap();
        assert_eq!(bet.id, back.id);
        assert_eq!(bet.amount, back.amount);
        assert_eq!(bet.status, back.status);
    }
}

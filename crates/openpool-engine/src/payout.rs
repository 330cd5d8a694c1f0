//! Pari-mutuel pool division.
//!
//! Pure computation: no store access, no side effects. All arithmetic is
//! checked `Decimal` — a float anywhere here would break the conservation
//! invariant. Winner payouts round toward zero at the configured scale and
//! the rounding slack is reconciled into the rake, so
//! `Σ payouts + rake == total_pool` holds exactly.

use openpool_types::{
    Bet, BetStatus, EngineConfig, OutcomeSide, Payout, Result, SettlementError,
};
use rust_decimal::{Decimal, RoundingStrategy};

/// The computed division of one event's pool, before application.
#[derive(Debug, Clone)]
pub struct PoolSplit {
    pub total_pool: Decimal,
    pub rake: Decimal,
    pub payouts: Vec<Payout>,
}

/// Split a closed pool of active bets against a resolved outcome.
///
/// `winning_side` present identifies the decisive winner; absent encodes a
/// draw or void outcome. A winner nobody backed is treated identically to a
/// draw: full refunds, no rake.
///
/// # Errors
/// - `InvalidAmount` if a bet carries a non-positive stake
/// - `AmountOverflow` if the pool arithmetic overflows
/// - `ConservationViolation` / `NegativePayout` if the defensive invariant
///   checks fail (should not occur)
pub fn split_pool(
    bets: &[Bet],
    winning_side: Option<&OutcomeSide>,
    config: &EngineConfig,
) -> Result<PoolSplit> {
    let mut total_pool = Decimal::ZERO;
    for bet in bets {
        if bet.amount <= Decimal::ZERO {
            return Err(SettlementError::InvalidAmount {
                bet_id: bet.id,
                amount: bet.amount,
            });
        }
        total_pool = total_pool
            .checked_add(bet.amount)
            .ok_or(SettlementError::AmountOverflow)?;
    }

    let winner_pool = match winning_side {
        Some(side) => side_pool(bets, side)?,
        None => Decimal::ZERO,
    };

    if let Some(side) = winning_side {
        if winner_pool > Decimal::ZERO {
            return split_decisive(bets, side, winner_pool, total_pool, config);
        }
    }
    Ok(split_refund(bets, total_pool))
}

/// Sum of stakes backing one side.
fn side_pool(bets: &[Bet], side: &OutcomeSide) -> Result<Decimal> {
    let mut pool = Decimal::ZERO;
    for bet in bets.iter().filter(|b| &b.side == side) {
        pool = pool
            .checked_add(bet.amount)
            .ok_or(SettlementError::AmountOverflow)?;
    }
    Ok(pool)
}

/// Decisive outcome with at least one backer: proportional division of the
/// net pool, rounding slack into the rake.
fn split_decisive(
    bets: &[Bet],
    side: &OutcomeSide,
    winner_pool: Decimal,
    total_pool: Decimal,
    config: &EngineConfig,
) -> Result<PoolSplit> {
    let nominal_rake = total_pool
        .checked_mul(config.rake_rate)
        .ok_or(SettlementError::AmountOverflow)?;
    let net_pool = total_pool
        .checked_sub(nominal_rake)
        .ok_or(SettlementError::AmountOverflow)?;

    let mut payouts = Vec::with_capacity(bets.len());
    let mut paid = Decimal::ZERO;
    for bet in bets {
        let (payout, status) = if &bet.side == side {
            let share = bet
                .amount
                .checked_mul(net_pool)
                .ok_or(SettlementError::AmountOverflow)?
                .checked_div(winner_pool)
                .ok_or(SettlementError::AmountOverflow)?
                .round_dp_with_strategy(config.payout_scale, RoundingStrategy::ToZero);
            (share, BetStatus::Won)
        } else {
            (Decimal::ZERO, BetStatus::Lost)
        };

        if payout < Decimal::ZERO {
            return Err(SettlementError::NegativePayout {
                bet_id: bet.id,
                payout,
            });
        }
        paid = paid
            .checked_add(payout)
            .ok_or(SettlementError::AmountOverflow)?;
        payouts.push(Payout {
            bet_id: bet.id,
            bettor: bet.bettor,
            side: bet.side.clone(),
            amount: bet.amount,
            payout,
            status,
        });
    }

    // Whatever rounding left unpaid belongs to the operator, never dropped.
    let rake = total_pool
        .checked_sub(paid)
        .ok_or(SettlementError::AmountOverflow)?;
    // Payouts round down, so the realized rake can only exceed the nominal.
    if rake < nominal_rake {
        return Err(SettlementError::ConservationViolation {
            reason: format!(
                "rake {rake} fell below nominal {nominal_rake} for pool {total_pool}"
            ),
        });
    }

    Ok(PoolSplit {
        total_pool,
        rake,
        payouts,
    })
}

/// Draw, void, or a winner nobody backed: every stake returned in full.
fn split_refund(bets: &[Bet], total_pool: Decimal) -> PoolSplit {
    let payouts = bets
        .iter()
        .map(|bet| Payout {
            bet_id: bet.id,
            bettor: bet.bettor,
            side: bet.side.clone(),
            amount: bet.amount,
            payout: bet.amount,
            status: BetStatus::Refunded,
        })
        .collect();
    PoolSplit {
        total_pool,
        rake: Decimal::ZERO,
        payouts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpool_types::EventId;

    fn side(label: &str) -> OutcomeSide {
        OutcomeSide::new(label)
    }

    fn bets(stakes: &[(&str, i64)]) -> Vec<Bet> {
        let event = EventId::new("e1");
        stakes
            .iter()
            .map(|(label, amount)| Bet::dummy(&event, &side(label), Decimal::new(*amount, 0)))
            .collect()
    }

    #[test]
    fn decisive_three_percent_rake() {
        let bets = bets(&[("A", 30), ("A", 20), ("B", 50)]);
        let split = split_pool(&bets, Some(&side("A")), &EngineConfig::default()).unwrap();

        assert_eq!(split.total_pool, Decimal::new(100, 0));
        assert_eq!(split.rake, Decimal::new(3, 0));
        assert_eq!(split.payouts[0].payout, Decimal::new(582, 1)); // 58.2
        assert_eq!(split.payouts[0].status, BetStatus::Won);
        assert_eq!(split.payouts[1].payout, Decimal::new(388, 1)); // 38.8
        assert_eq!(split.payouts[1].status, BetStatus::Won);
        assert_eq!(split.payouts[2].payout, Decimal::ZERO);
        assert_eq!(split.payouts[2].status, BetStatus::Lost);
    }

    #[test]
    fn draw_refunds_everyone_without_rake() {
        let bets = bets(&[("A", 40), ("B", 60)]);
        let split = split_pool(&bets, None, &EngineConfig::default()).unwrap();

        assert_eq!(split.rake, Decimal::ZERO);
        for payout in &split.payouts {
            assert_eq!(payout.payout, payout.amount);
            assert_eq!(payout.status, BetStatus::Refunded);
        }
    }

    #[test]
    fn unbacked_winner_refunds_everyone() {
        let bets = bets(&[("B", 25), ("B", 15)]);
        let split = split_pool(&bets, Some(&side("A")), &EngineConfig::default()).unwrap();

        assert_eq!(split.total_pool, Decimal::new(40, 0));
        assert_eq!(split.rake, Decimal::ZERO);
        for payout in &split.payouts {
            assert_eq!(payout.payout, payout.amount);
            assert_eq!(payout.status, BetStatus::Refunded);
        }
    }

    #[test]
    fn rounding_slack_lands_in_rake() {
        // Zero rake rate so the slack is purely from rounding: 4 / 3 repeats.
        let config = EngineConfig {
            rake_rate: Decimal::ZERO,
            ..EngineConfig::default()
        };
        let bets = bets(&[("A", 1), ("A", 1), ("A", 1), ("B", 1)]);
        let split = split_pool(&bets, Some(&side("A")), &config).unwrap();

        let paid: Decimal = split.payouts.iter().map(|p| p.payout).sum();
        assert_eq!(paid + split.rake, split.total_pool);
        assert!(split.rake > Decimal::ZERO, "slack must not be dropped");
        assert!(split.rake < Decimal::new(1, 6), "slack stays tiny: {}", split.rake);
    }

    #[test]
    fn conservation_holds_for_awkward_stakes() {
        let event = EventId::new("e1");
        let bets = vec![
            Bet::dummy(&event, &side("A"), Decimal::new(3333, 2)),  // 33.33
            Bet::dummy(&event, &side("A"), Decimal::new(1, 2)),     // 0.01
            Bet::dummy(&event, &side("B"), Decimal::new(66_667, 3)), // 66.667
        ];
        let split = split_pool(&bets, Some(&side("A")), &EngineConfig::default()).unwrap();

        let paid: Decimal = split.payouts.iter().map(|p| p.payout).sum();
        assert_eq!(paid + split.rake, split.total_pool);
    }

    #[test]
    fn non_positive_stake_rejected() {
        let event = EventId::new("e1");
        let bets = vec![Bet::dummy(&event, &side("A"), Decimal::ZERO)];
        let err = split_pool(&bets, Some(&side("A")), &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, SettlementError::InvalidAmount { .. }));
    }

    #[test]
    fn empty_input_splits_to_nothing() {
        let split = split_pool(&[], Some(&side("A")), &EngineConfig::default()).unwrap();
        assert_eq!(split.total_pool, Decimal::ZERO);
        assert!(split.payouts.is_empty());
    }

    #[test]
    fn sole_winner_takes_net_pool() {
        let bets = bets(&[("A", 10), ("B", 90)]);
        let split = split_pool(&bets, Some(&side("A")), &EngineConfig::default()).unwrap();

        // net = 100 - 3 = 97, all of it to the single backer of A
        assert_eq!(split.payouts[0].payout, Decimal::new(97, 0));
        assert_eq!(split.rake, Decimal::new(3, 0));
    }
}

//! Advisory views built on top of a [`Projector`]: captain picks, cash
//! generation and buy/sell timing.

use std::cmp::Ordering;

use crate::player::Player;
use crate::projection::Projector;

pub const DEFAULT_ROOKIE_MAX_PRICE: f64 = 350_000.0;
pub const DEFAULT_CASH_ROUNDS: u32 = 3;
pub const DEFAULT_TIMING_THRESHOLD: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptainPick<'a> {
    pub player: &'a Player,
    pub projected_score: f64,
    /// 0..=100, higher means a steadier scorer.
    pub confidence: u8,
}

pub fn captain_candidates<'a>(
    players: &'a [Player],
    projector: &dyn Projector,
    n: usize,
) -> Vec<CaptainPick<'a>> {
    let mut picks: Vec<CaptainPick<'a>> = players
        .iter()
        .filter(|p| p.is_available())
        .filter_map(|p| {
            let projected_score = projector.projected_score(p)?;
            Some(CaptainPick {
                player: p,
                projected_score,
                confidence: consistency_confidence(p),
            })
        })
        .collect();
    picks.sort_by(|a, b| {
        b.projected_score
            .partial_cmp(&a.projected_score)
            .unwrap_or(Ordering::Equal)
    });
    picks.truncate(n);
    picks
}

/// `100 * (1 - sd / avg)` clamped to 0..=100; 0 when either input is missing.
pub fn consistency_confidence(player: &Player) -> u8 {
    let (Some(avg), Some(sd)) = (player.average_points, player.standard_deviation) else {
        return 0;
    };
    if avg <= 0.0 {
        return 0;
    }
    (100.0 * (1.0 - sd / avg)).clamp(0.0, 100.0).round() as u8
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashCow<'a> {
    pub player: &'a Player,
    pub projected_price_change: f64,
    pub projected_gain: f64,
}

pub fn cash_cows<'a>(
    players: &'a [Player],
    projector: &dyn Projector,
    max_price: f64,
    rounds: u32,
) -> Vec<CashCow<'a>> {
    let mut rows: Vec<CashCow<'a>> = players
        .iter()
        .filter(|p| p.price.is_some_and(|price| price <= max_price))
        .filter_map(|p| {
            let change = projector.projected_price_change(p)?;
            Some(CashCow {
                player: p,
                projected_price_change: change,
                projected_gain: change * f64::from(rounds),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        b.projected_gain
            .partial_cmp(&a.projected_gain)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingSignal {
    Buy,
    Sell,
    Hold,
}

pub fn timing_signal(player: &Player, projector: &dyn Projector, threshold: f64) -> TimingSignal {
    match projector.projected_price_change(player) {
        Some(change) if change >= threshold => TimingSignal::Buy,
        Some(change) if change <= -threshold => TimingSignal::Sell,
        _ => TimingSignal::Hold,
    }
}

pub fn timing_label(signal: TimingSignal) -> &'static str {
    match signal {
        TimingSignal::Buy => "BUY",
        TimingSignal::Sell => "SELL",
        TimingSignal::Hold => "HOLD",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTab {
    Captains,
    CashCows,
    Timing,
}

pub fn tool_tab_label(tab: ToolTab) -> &'static str {
    match tab {
        ToolTab::Captains => "Captains",
        ToolTab::CashCows => "Cash Generation",
        ToolTab::Timing => "Buy/Sell Timing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::FormulaProjector;

    fn scorer(id: &str, avg: f64, sd: f64) -> Player {
        Player {
            average_points: Some(avg),
            standard_deviation: Some(sd),
            ..Player::new(id, id)
        }
    }

    #[test]
    fn captains_skip_unavailable_players() {
        let mut injured = scorer("inj", 130.0, 10.0);
        injured.is_injured = true;
        let players = vec![scorer("a", 100.0, 20.0), injured, scorer("b", 115.0, 40.0)];
        let picks = captain_candidates(&players, &FormulaProjector::default(), 5);
        let ids: Vec<&str> = picks.iter().map(|p| p.player.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(picks[1].confidence, 80);
    }

    #[test]
    fn confidence_clamps_to_zero() {
        assert_eq!(consistency_confidence(&scorer("x", 50.0, 80.0)), 0);
        assert_eq!(consistency_confidence(&Player::new("y", "y")), 0);
    }

    #[test]
    fn cash_cows_respect_price_cap() {
        let cheap = Player {
            price: Some(250_000.0),
            average_points: Some(70.0),
            break_even: Some(20.0),
            ..Player::new("c", "Cheap")
        };
        let premium = Player {
            price: Some(900_000.0),
            average_points: Some(120.0),
            break_even: Some(100.0),
            ..Player::new("p", "Premium")
        };
        let players = vec![premium, cheap];
        let rows = cash_cows(&players, &FormulaProjector::new(1000.0), 350_000.0, 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player.id, "c");
        assert!((rows[0].projected_gain - 150_000.0).abs() < 1e-6);
    }

    #[test]
    fn timing_uses_threshold_both_ways() {
        let proj = FormulaProjector::new(1000.0);
        let rising = Player {
            average_points: Some(100.0),
            break_even: Some(80.0),
            ..Player::new("r", "r")
        };
        let falling = Player {
            average_points: Some(60.0),
            break_even: Some(90.0),
            ..Player::new("f", "f")
        };
        assert_eq!(timing_signal(&rising, &proj, 10_000.0), TimingSignal::Buy);
        assert_eq!(timing_signal(&falling, &proj, 10_000.0), TimingSignal::Sell);
        assert_eq!(timing_signal(&Player::new("n", "n"), &proj, 10_000.0), TimingSignal::Hold);
    }
}

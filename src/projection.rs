use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::player::Player;

pub const DEFAULT_PRICE_PER_POINT: f64 = 2500.0;

/// Source of forward-looking numbers for a player. Tools and trade deltas
/// only ever read projections through this trait.
pub trait Projector {
    fn projected_score(&self, player: &Player) -> Option<f64>;

    fn projected_price_change(&self, player: &Player) -> Option<f64>;
}

/// Deterministic projection: recent-form blend of L3/L5/season average and a
/// linear breakeven price model.
#[derive(Debug, Clone, Copy)]
pub struct FormulaProjector {
    pub price_per_point: f64,
}

impl Default for FormulaProjector {
    fn default() -> Self {
        Self {
            price_per_point: DEFAULT_PRICE_PER_POINT,
        }
    }
}

impl FormulaProjector {
    pub fn new(price_per_point: f64) -> Self {
        Self { price_per_point }
    }

    pub fn price_change_for_score(&self, player: &Player, score: f64) -> Option<f64> {
        let break_even = player.break_even?;
        Some((score - break_even) * self.price_per_point)
    }
}

impl Projector for FormulaProjector {
    fn projected_score(&self, player: &Player) -> Option<f64> {
        let parts = [
            (player.l3_average, 0.5),
            (player.l5_average, 0.3),
            (player.average_points, 0.2),
        ];
        let mut total = 0.0;
        let mut weight = 0.0;
        for (value, w) in parts {
            if let Some(v) = value {
                total += v * w;
                weight += w;
            }
        }
        if weight <= 0.0 {
            return None;
        }
        Some(total / weight)
    }

    fn projected_price_change(&self, player: &Player) -> Option<f64> {
        let score = self.projected_score(player)?;
        self.price_change_for_score(player, score)
    }
}

/// Per-round projections supplied by the remote API, keyed by player id.
/// Players missing from the map fall back to `fallback`.
#[derive(Debug, Clone)]
pub struct RoundProjections<P> {
    pub round: u32,
    pub scores: HashMap<String, f64>,
    pub fallback: P,
    pub price_per_point: f64,
}

impl<P: Projector> RoundProjections<P> {
    pub fn new(round: u32, scores: HashMap<String, f64>, fallback: P, price_per_point: f64) -> Self {
        Self {
            round,
            scores,
            fallback,
            price_per_point,
        }
    }
}

impl<P: Projector> Projector for RoundProjections<P> {
    fn projected_score(&self, player: &Player) -> Option<f64> {
        self.scores
            .get(&player.id)
            .copied()
            .or_else(|| self.fallback.projected_score(player))
    }

    fn projected_price_change(&self, player: &Player) -> Option<f64> {
        match self.scores.get(&player.id) {
            Some(score) => {
                let break_even = player.break_even?;
                Some((score - break_even) * self.price_per_point)
            }
            None => self.fallback.projected_price_change(player),
        }
    }
}

/// Mock projector: formula projection plus a per-player noise term derived
/// from `seed` and the player id, so repeated calls agree.
#[derive(Debug, Clone, Copy)]
pub struct SeededProjector {
    pub seed: u64,
    pub spread: f64,
    pub base: FormulaProjector,
}

impl SeededProjector {
    pub fn new(seed: u64, spread: f64, base: FormulaProjector) -> Self {
        Self { seed, spread, base }
    }

    fn noise(&self, player: &Player) -> f64 {
        if self.spread <= 0.0 {
            return 0.0;
        }
        let mut rng = StdRng::seed_from_u64(self.seed ^ id_hash(&player.id));
        rng.gen_range(-self.spread..=self.spread)
    }
}

impl Projector for SeededProjector {
    fn projected_score(&self, player: &Player) -> Option<f64> {
        let score = self.base.projected_score(player)?;
        Some((score + self.noise(player)).max(0.0))
    }

    fn projected_price_change(&self, player: &Player) -> Option<f64> {
        let score = self.projected_score(player)?;
        self.base.price_change_for_score(player, score)
    }
}

/// Fallback model selected from configuration: the plain formula for live
/// data, the seeded variant for mock sessions.
#[derive(Debug, Clone, Copy)]
pub enum ProjectionModel {
    Formula(FormulaProjector),
    Seeded(SeededProjector),
}

impl Projector for ProjectionModel {
    fn projected_score(&self, player: &Player) -> Option<f64> {
        match self {
            ProjectionModel::Formula(p) => p.projected_score(player),
            ProjectionModel::Seeded(p) => p.projected_score(player),
        }
    }

    fn projected_price_change(&self, player: &Player) -> Option<f64> {
        match self {
            ProjectionModel::Formula(p) => p.projected_price_change(player),
            ProjectionModel::Seeded(p) => p.projected_price_change(player),
        }
    }
}

/// FNV-1a over the id bytes.
fn id_hash(id: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in id.bytes() {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_player() -> Player {
        Player {
            l3_average: Some(110.0),
            l5_average: Some(100.0),
            average_points: Some(90.0),
            break_even: Some(95.0),
            ..Player::new("7", "Form")
        }
    }

    #[test]
    fn formula_blends_recent_form() {
        let p = form_player();
        let proj = FormulaProjector::new(1000.0);
        let score = proj.projected_score(&p).expect("score");
        assert!((score - 103.0).abs() < 1e-9);
        let change = proj.projected_price_change(&p).expect("change");
        assert!((change - 8000.0).abs() < 1e-6);
    }

    #[test]
    fn formula_renormalises_missing_parts() {
        let p = Player {
            average_points: Some(80.0),
            ..Player::new("1", "Avg only")
        };
        let score = FormulaProjector::default().projected_score(&p).expect("score");
        assert!((score - 80.0).abs() < 1e-9);
        assert_eq!(FormulaProjector::default().projected_price_change(&p), None);
    }

    #[test]
    fn seeded_projector_is_repeatable() {
        let p = form_player();
        let a = SeededProjector::new(42, 10.0, FormulaProjector::default());
        let b = SeededProjector::new(42, 10.0, FormulaProjector::default());
        assert_eq!(a.projected_score(&p), b.projected_score(&p));
    }

    #[test]
    fn round_projections_prefer_remote_score() {
        let p = form_player();
        let mut scores = HashMap::new();
        scores.insert("7".to_string(), 120.0);
        let proj = RoundProjections::new(3, scores, FormulaProjector::default(), 1000.0);
        assert_eq!(proj.projected_score(&p), Some(120.0));
        assert_eq!(proj.projected_price_change(&p), Some(25_000.0));
        let other = Player {
            average_points: Some(50.0),
            ..Player::new("8", "Other")
        };
        assert_eq!(proj.projected_score(&other), Some(50.0));
    }
}

use anyhow::{Result, bail};

use crate::player::Player;
use crate::projection::Projector;

#[derive(Debug, Clone, PartialEq)]
pub struct TradePair {
    pub out: Player,
    pub incoming: Player,
}

impl TradePair {
    /// Positive when the incoming player costs more. Missing prices count as zero.
    pub fn price_difference(&self) -> f64 {
        self.incoming.price.unwrap_or(0.0) - self.out.price.unwrap_or(0.0)
    }

    pub fn projected_score_gain(&self, projector: &dyn Projector) -> f64 {
        projector.projected_score(&self.incoming).unwrap_or(0.0)
            - projector.projected_score(&self.out).unwrap_or(0.0)
    }
}

/// Insertion-ordered list of trade comparisons. Lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct TradeList {
    pairs: Vec<TradePair>,
}

impl TradeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, out: Player, incoming: Player) -> Result<()> {
        if out.id == incoming.id {
            bail!("cannot trade {} for themselves", out.name);
        }
        self.pairs.push(TradePair { out, incoming });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<TradePair> {
        if index < self.pairs.len() {
            Some(self.pairs.remove(index))
        } else {
            None
        }
    }

    pub fn pairs(&self) -> &[TradePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn net_price_difference(&self) -> f64 {
        self.pairs.iter().map(TradePair::price_difference).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::FormulaProjector;

    fn priced(id: &str, price: Option<f64>, avg: Option<f64>) -> Player {
        Player {
            price,
            average_points: avg,
            ..Player::new(id, format!("Player {id}"))
        }
    }

    #[test]
    fn deltas_treat_missing_as_zero() {
        let pair = TradePair {
            out: priced("1", None, Some(80.0)),
            incoming: priced("2", Some(600_000.0), None),
        };
        assert_eq!(pair.price_difference(), 600_000.0);
        assert_eq!(pair.projected_score_gain(&FormulaProjector::default()), -80.0);
    }

    #[test]
    fn list_keeps_insertion_order_and_removes_by_index() {
        let mut list = TradeList::new();
        list.push(priced("1", Some(1.0), None), priced("2", Some(3.0), None))
            .expect("push");
        list.push(priced("3", Some(5.0), None), priced("4", Some(4.0), None))
            .expect("push");
        assert_eq!(list.net_price_difference(), 1.0);
        let removed = list.remove(0).expect("removed");
        assert_eq!(removed.out.id, "1");
        assert_eq!(list.pairs()[0].out.id, "3");
        assert!(list.remove(5).is_none());
    }

    #[test]
    fn self_trade_is_rejected() {
        let mut list = TradeList::new();
        assert!(list.push(priced("1", None, None), priced("1", None, None)).is_err());
        assert!(list.is_empty());
    }
}

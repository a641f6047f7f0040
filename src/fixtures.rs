use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::player::{Player, Position};

pub const NEUTRAL_DIFFICULTY: f64 = 3.0;
const DIFFICULTY_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub round: u32,
    pub home: String,
    pub away: String,
    #[serde(default)]
    pub venue: Option<String>,
}

impl Fixture {
    pub fn involves(&self, team: &str) -> bool {
        self.home.eq_ignore_ascii_case(team) || self.away.eq_ignore_ascii_case(team)
    }

    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.home.eq_ignore_ascii_case(team) {
            Some(&self.away)
        } else if self.away.eq_ignore_ascii_case(team) {
            Some(&self.home)
        } else {
            None
        }
    }
}

/// Defence-vs-position ratings: how hard `team` is to score against for a
/// position, 1 (easy) to 5 (hard). Team keys are stored lowercased.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DvpTable {
    ratings: HashMap<String, HashMap<Position, f64>>,
}

impl DvpTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, team: &str, position: Position, rating: f64) {
        self.ratings
            .entry(team.to_lowercase())
            .or_default()
            .insert(position, rating.clamp(1.0, 5.0));
    }

    pub fn rating(&self, team: &str, position: Position) -> Option<f64> {
        self.ratings
            .get(&team.to_lowercase())
            .and_then(|by_pos| by_pos.get(&position))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

fn upcoming_for<'a>(
    team: &'a str,
    fixtures: &'a [Fixture],
    from_round: u32,
) -> impl Iterator<Item = &'a Fixture> + 'a {
    let mut rows: Vec<&Fixture> = fixtures
        .iter()
        .filter(|f| f.round >= from_round && f.involves(team))
        .collect();
    rows.sort_by_key(|f| f.round);
    rows.into_iter()
}

pub fn next_fixture<'a>(team: &str, fixtures: &'a [Fixture], from_round: u32) -> Option<&'a Fixture> {
    fixtures
        .iter()
        .filter(|f| f.round >= from_round && f.involves(team))
        .min_by_key(|f| f.round)
}

/// Mean DVP rating of the next three opponents. Unrated opponents count as
/// neutral; `None` when the team has no upcoming fixtures.
pub fn three_round_difficulty(
    team: &str,
    position: Position,
    fixtures: &[Fixture],
    dvp: &DvpTable,
    from_round: u32,
) -> Option<f64> {
    let ratings: Vec<f64> = upcoming_for(team, fixtures, from_round)
        .take(DIFFICULTY_WINDOW)
        .filter_map(|f| f.opponent_of(team))
        .map(|opp| dvp.rating(opp, position).unwrap_or(NEUTRAL_DIFFICULTY))
        .collect();
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}

/// Fills fixture context only where the record leaves it absent.
pub fn enrich_players(players: &mut [Player], fixtures: &[Fixture], dvp: &DvpTable, round: u32) {
    if fixtures.is_empty() {
        return;
    }
    for player in players.iter_mut() {
        let Some(team) = player.team.clone() else {
            continue;
        };
        if let Some(next) = next_fixture(&team, fixtures, round) {
            if player.next_opponent.is_none() {
                player.next_opponent = next.opponent_of(&team).map(str::to_string);
            }
            if player.next_venue.is_none() {
                player.next_venue = next.venue.clone();
            }
        }
        if player.opponent_3_round_difficulty.is_none()
            && let Some(position) = player.position
        {
            player.opponent_3_round_difficulty =
                three_round_difficulty(&team, position, fixtures, dvp, round);
        }
    }
}

//! Client side of the stats API. Every field is optional on the wire and
//! field names drift between endpoints, so parsing walks `serde_json::Value`
//! with alias lists instead of strict structs.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use crate::fixtures::{DvpTable, Fixture};
use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::player::{Player, Position};

#[derive(Debug, Clone, Default)]
pub struct FixturePayload {
    pub fixtures: Vec<Fixture>,
    pub dvp: DvpTable,
}

pub fn fetch_players(base: &str, max_age: Duration) -> Result<Vec<Player>> {
    let client = http_client()?;
    let url = format!("{base}/players");
    let body = fetch_json_cached(client, &url, &[], Some(max_age)).context("players request failed")?;
    let players = parse_players_json(&body)?;
    info!(count = players.len(), "players fetched");
    Ok(players)
}

pub fn fetch_fixtures(base: &str, max_age: Duration) -> Result<FixturePayload> {
    let client = http_client()?;
    let url = format!("{base}/fixtures");
    let body =
        fetch_json_cached(client, &url, &[], Some(max_age)).context("fixtures request failed")?;
    parse_fixtures_json(&body)
}

pub fn fetch_projections(base: &str, round: u32, max_age: Duration) -> Result<HashMap<String, f64>> {
    let client = http_client()?;
    let url = format!("{base}/projections?round={round}");
    let body =
        fetch_json_cached(client, &url, &[], Some(max_age)).context("projections request failed")?;
    parse_projections_json(&body)
}

/// Accepts a bare array or an object envelope (`players`, `data`, `items`).
/// Records without an id or name are dropped.
pub fn parse_players_json(raw: &str) -> Result<Vec<Player>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid players json")?;
    let Some(items) = envelope_array(&root, &["players", "data", "items"]) else {
        return Ok(Vec::new());
    };
    Ok(items.iter().filter_map(parse_player).collect())
}

fn parse_player(value: &Value) -> Option<Player> {
    let id = pick_string(value, &["id", "playerId", "player_id"])?;
    let name = pick_string(value, &["name", "playerName", "player_name", "fullName"])
        .or_else(|| {
            let first = pick_string(value, &["firstName", "first_name"])?;
            let last = pick_string(value, &["lastName", "last_name"])?;
            Some(format!("{first} {last}"))
        })?;

    Some(Player {
        id,
        name,
        team: pick_string(value, &["team", "club", "teamName", "team_name"]),
        position: pick_string(value, &["position", "pos", "positions"])
            .as_deref()
            .and_then(Position::parse),
        price: pick_f64(value, &["price", "cost"]),
        break_even: pick_f64(value, &["breakEven", "break_even", "breakeven", "be"]),
        price_change: pick_f64(value, &["priceChange", "price_change"]),
        projected_price_change: pick_f64(
            value,
            &["projectedPriceChange", "projected_price_change"],
        ),
        average_points: pick_f64(value, &["averagePoints", "average_points", "avg", "average"]),
        last_score: pick_f64(value, &["lastScore", "last_score", "last"]),
        l3_average: pick_f64(value, &["l3Average", "l3_average", "last3Avg", "l3"]),
        l5_average: pick_f64(value, &["l5Average", "l5_average", "last5Avg", "l5"]),
        total_points: pick_f64(value, &["totalPoints", "total_points", "total"]),
        rounds_played: pick_f64(value, &["roundsPlayed", "rounds_played", "games", "gamesPlayed"])
            .filter(|v| *v >= 0.0)
            .map(|v| v as u32),
        standard_deviation: pick_f64(
            value,
            &["standardDeviation", "standard_deviation", "stdDev", "sd"],
        ),
        high_score: pick_f64(value, &["highScore", "high_score", "high"]),
        low_score: pick_f64(value, &["lowScore", "low_score", "low"]),
        is_injured: pick_bool(value, &["isInjured", "is_injured", "injured"]),
        is_suspended: pick_bool(value, &["isSuspended", "is_suspended", "suspended"]),
        is_favorite: false,
        next_opponent: pick_string(value, &["nextOpponent", "next_opponent", "opponent"]),
        next_venue: pick_string(value, &["nextVenue", "next_venue", "venue"]),
        opponent_3_round_difficulty: pick_f64(
            value,
            &[
                "opponent3RoundDifficulty",
                "opponent_3_round_difficulty",
                "difficulty",
            ],
        ),
    })
}

/// Fixtures come as an array or `{ "fixtures": [...], "dvp": { team: { pos: rating } } }`.
pub fn parse_fixtures_json(raw: &str) -> Result<FixturePayload> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(FixturePayload::default());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;
    let fixtures = envelope_array(&root, &["fixtures", "data", "items"])
        .map(|items| items.iter().filter_map(parse_fixture).collect())
        .unwrap_or_default();

    let mut dvp = DvpTable::new();
    if let Some(teams) = root.get("dvp").and_then(Value::as_object) {
        for (team, by_pos) in teams {
            let Some(by_pos) = by_pos.as_object() else {
                continue;
            };
            for (pos, rating) in by_pos {
                if let (Some(position), Some(rating)) = (Position::parse(pos), as_f64(rating)) {
                    dvp.set(team, position, rating);
                }
            }
        }
    }
    Ok(FixturePayload { fixtures, dvp })
}

fn parse_fixture(value: &Value) -> Option<Fixture> {
    let round = pick_f64(value, &["round", "roundNumber", "round_number"])?;
    if round < 0.0 {
        return None;
    }
    Some(Fixture {
        round: round as u32,
        home: pick_string(value, &["home", "homeTeam", "home_team"])?,
        away: pick_string(value, &["away", "awayTeam", "away_team"])?,
        venue: pick_string(value, &["venue", "ground"]),
    })
}

/// Projection rows keyed by player id. Accepts `[{id, projectedScore}]` or a
/// plain `{ id: score }` object.
pub fn parse_projections_json(raw: &str) -> Result<HashMap<String, f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(HashMap::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid projections json")?;
    if let Some(items) = envelope_array(&root, &["projections", "data", "items"]) {
        return Ok(items
            .iter()
            .filter_map(|item| {
                let id = pick_string(item, &["id", "playerId", "player_id"])?;
                let score = pick_f64(
                    item,
                    &["projectedScore", "projected_score", "projection", "score"],
                )?;
                Some((id, score))
            })
            .collect());
    }
    let Some(map) = root.as_object() else {
        return Ok(HashMap::new());
    };
    Ok(map
        .iter()
        .filter_map(|(id, v)| as_f64(v).map(|score| (id.clone(), score)))
        .collect())
}

fn envelope_array<'a>(root: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Some(arr) = root.as_array() {
        return Some(arr);
    }
    keys.iter()
        .find_map(|key| root.get(*key).and_then(Value::as_array))
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(as_string)
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pick_f64(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(as_f64)
}

fn as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn pick_bool(value: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_f64_strips_currency_formatting() {
        assert_eq!(as_f64(&Value::String("$850,000".to_string())), Some(850_000.0));
        assert_eq!(as_f64(&Value::String("n/a".to_string())), None);
        assert_eq!(as_f64(&Value::Null), None);
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let players = parse_players_json(r#"[{"id": 12, "name": "X"}]"#).expect("parse");
        assert_eq!(players[0].id, "12");
    }
}

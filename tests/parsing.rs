use std::fs;
use std::path::PathBuf;

use afl_fantasy_terminal::api_fetch::{
    parse_fixtures_json, parse_players_json, parse_projections_json,
};
use afl_fantasy_terminal::fixtures::{enrich_players, three_round_difficulty};
use afl_fantasy_terminal::player::Position;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_players_fixture() {
    let raw = read_fixture("players.json");
    let players = parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(players.len(), 4);

    let bont = &players[0];
    assert_eq!(bont.id, "101");
    assert_eq!(bont.name, "Marcus Bontempelli");
    assert_eq!(bont.position, Some(Position::Midfielder));
    assert_eq!(bont.price, Some(1_100_000.0));
    assert_eq!(bont.rounds_played, Some(5));
    assert_eq!(bont.standard_deviation, Some(14.1));
    assert!(!bont.is_injured);

    let daicos = &players[1];
    assert_eq!(daicos.id, "102");
    assert_eq!(daicos.name, "Nick Daicos");
    assert_eq!(daicos.position, Some(Position::Midfielder));
    assert_eq!(daicos.price, Some(950_000.0));
    assert_eq!(daicos.break_even, Some(104.0));
    assert_eq!(daicos.price_change, Some(-8000.0));
    assert_eq!(daicos.l3_average, None);
}

#[test]
fn players_fixture_flags_and_sparse_records() {
    let raw = read_fixture("players.json");
    let players = parse_players_json(&raw).expect("fixture should parse");
    let de_goey = &players[2];
    assert!(de_goey.is_injured);
    assert_eq!(de_goey.average_points, Some(74.5));
    assert_eq!(de_goey.break_even, None);

    let gawn = &players[3];
    assert!(gawn.is_suspended);
    assert_eq!(gawn.position, Some(Position::Ruck));
}

#[test]
fn players_accepts_bare_array_and_empty_body() {
    let players =
        parse_players_json(r#"[{"id":"1","name":"A"},{"id":"2"}]"#).expect("array parses");
    assert_eq!(players.len(), 1);
    assert!(parse_players_json("").expect("empty ok").is_empty());
    assert!(parse_players_json("null").expect("null ok").is_empty());
    assert!(parse_players_json(r#"{"other": 1}"#).expect("object ok").is_empty());
    assert!(parse_players_json("{not json").is_err());
}

#[test]
fn parses_fixtures_and_dvp() {
    let raw = read_fixture("fixtures.json");
    let payload = parse_fixtures_json(&raw).expect("fixture should parse");
    assert_eq!(payload.fixtures.len(), 6);
    assert_eq!(payload.fixtures[0].home, "Western Bulldogs");
    assert_eq!(payload.fixtures[0].venue.as_deref(), Some("Marvel Stadium"));
    assert_eq!(payload.fixtures[2].venue.as_deref(), Some("MCG"));
    assert_eq!(payload.fixtures[3].venue, None);

    assert_eq!(
        payload.dvp.rating("collingwood", Position::Midfielder),
        Some(5.0)
    );
    assert_eq!(
        payload.dvp.rating("Western Bulldogs", Position::Ruck),
        Some(4.0)
    );
    // Ratings are clamped into 1..=5.
    assert_eq!(payload.dvp.rating("Melbourne", Position::Forward), Some(5.0));
}

#[test]
fn fixtures_enrich_parsed_players() {
    let mut players = parse_players_json(&read_fixture("players.json")).expect("players");
    let payload = parse_fixtures_json(&read_fixture("fixtures.json")).expect("fixtures");
    enrich_players(&mut players, &payload.fixtures, &payload.dvp, 6);

    let daicos = &players[1];
    assert_eq!(daicos.next_opponent.as_deref(), Some("Western Bulldogs"));
    assert_eq!(daicos.next_venue.as_deref(), Some("Marvel Stadium"));
    // Bulldogs 1, Melbourne 2, Carlton 3.
    assert_eq!(daicos.opponent_3_round_difficulty, Some(2.0));

    let difficulty = three_round_difficulty(
        "Melbourne",
        Position::Ruck,
        &payload.fixtures,
        &payload.dvp,
        6,
    );
    // Carlton and Collingwood unrated for RUC, Bulldogs 4.
    let expected = (3.0 + 3.0 + 4.0) / 3.0;
    assert!((difficulty.expect("melbourne plays") - expected).abs() < 1e-9);
}

#[test]
fn parses_projections_fixture() {
    let raw = read_fixture("projections.json");
    let scores = parse_projections_json(&raw).expect("fixture should parse");
    assert_eq!(scores.len(), 2);
    assert_eq!(scores.get("101"), Some(&121.5));
    assert_eq!(scores.get("102"), Some(&108.0));
}

#[test]
fn projections_accept_id_map() {
    let scores = parse_projections_json(r#"{"101": 99.5, "102": "bad"}"#).expect("map parses");
    assert_eq!(scores.len(), 1);
    assert_eq!(scores.get("101"), Some(&99.5));
}

use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::api_fetch;
use crate::config::{AppConfig, DataSource};
use crate::fixtures::{DvpTable, Fixture};
use crate::player::{ALL_POSITIONS, Player, Position};
use crate::state::{Delta, ProviderCommand};

pub const AFL_TEAMS: [&str; 18] = [
    "Adelaide",
    "Brisbane",
    "Carlton",
    "Collingwood",
    "Essendon",
    "Fremantle",
    "Geelong",
    "Gold Coast",
    "GWS",
    "Hawthorn",
    "Melbourne",
    "North Melbourne",
    "Port Adelaide",
    "Richmond",
    "St Kilda",
    "Sydney",
    "West Coast",
    "Western Bulldogs",
];

const VENUES: [&str; 8] = [
    "MCG",
    "Marvel Stadium",
    "Adelaide Oval",
    "Optus Stadium",
    "Gabba",
    "SCG",
    "GMHBA Stadium",
    "People First Stadium",
];

const FIRST_NAMES: [&str; 16] = [
    "Marcus", "Nick", "Zak", "Tom", "Jack", "Errol", "Max", "Caleb", "Sam", "Josh", "Harry",
    "Tim", "Lachie", "Jordan", "Patrick", "Christian",
];

const LAST_NAMES: [&str; 16] = [
    "Bontempelli", "Daicos", "Butters", "Green", "Macrae", "Gulden", "Gawn", "Serong", "Walsh",
    "Dunkley", "Sheezel", "English", "Neale", "Dawson", "Cripps", "Petracca",
];

const MOCK_ROUNDS: u32 = 24;

/// Spawns the data thread. It serves commands until the UI drops its sender.
pub fn spawn_provider(config: AppConfig, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        info!(source = config.source_label(), "provider started");
        for cmd in cmd_rx {
            let keep_going = match config.data_source {
                DataSource::Api => serve_api(&config, &tx, cmd),
                DataSource::Mock => serve_mock(&config, &tx, cmd),
            };
            if !keep_going {
                break;
            }
        }
        info!("provider stopped");
    });
}

fn serve_api(config: &AppConfig, tx: &Sender<Delta>, cmd: ProviderCommand) -> bool {
    let delta = match cmd {
        ProviderCommand::FetchPlayers { request_id } => {
            match api_fetch::fetch_players(&config.api_base, config.stale_after) {
                Ok(players) => Delta::PlayersLoaded {
                    request_id,
                    players,
                },
                Err(err) => {
                    warn!("players fetch failed: {err:#}");
                    Delta::FetchFailed {
                        request_id,
                        message: format!("{err:#}"),
                    }
                }
            }
        }
        ProviderCommand::FetchFixtures => {
            match api_fetch::fetch_fixtures(&config.api_base, config.stale_after) {
                Ok(payload) => Delta::FixturesLoaded {
                    fixtures: payload.fixtures,
                    dvp: payload.dvp,
                },
                Err(err) => {
                    warn!("fixtures fetch failed: {err:#}");
                    Delta::Log(format!("[WARN] Fixtures fetch error: {err:#}"))
                }
            }
        }
        ProviderCommand::FetchProjections { round } => {
            match api_fetch::fetch_projections(&config.api_base, round, config.stale_after) {
                Ok(scores) => Delta::ProjectionsLoaded { round, scores },
                Err(err) => {
                    warn!(round, "projections fetch failed: {err:#}");
                    Delta::Log(format!("[WARN] Projections fetch error: {err:#}"))
                }
            }
        }
    };
    tx.send(delta).is_ok()
}

fn serve_mock(config: &AppConfig, tx: &Sender<Delta>, cmd: ProviderCommand) -> bool {
    let delta = match cmd {
        ProviderCommand::FetchPlayers { request_id } => {
            thread::sleep(config.mock_latency);
            // Each request gets its own stream so refreshes show movement.
            let seed = config.mock_seed.wrapping_add(request_id);
            Delta::PlayersLoaded {
                request_id,
                players: mock_players(seed, config.mock_players),
            }
        }
        ProviderCommand::FetchFixtures => {
            let (fixtures, dvp) = mock_fixtures(config.mock_seed);
            Delta::FixturesLoaded { fixtures, dvp }
        }
        // Mock sessions project through the seeded fallback model.
        ProviderCommand::FetchProjections { .. } => return true,
    };
    tx.send(delta).is_ok()
}

/// Deterministic roster for a seed.
pub fn mock_players(seed: u64, count: usize) -> Vec<Player> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|idx| {
            let first = FIRST_NAMES[idx % FIRST_NAMES.len()];
            let last = LAST_NAMES[(idx / FIRST_NAMES.len() + idx * 7) % LAST_NAMES.len()];
            let position = ALL_POSITIONS[rng.gen_range(0..ALL_POSITIONS.len())];
            let rookie = rng.gen_bool(0.25);
            let average: f64 = if rookie {
                rng.gen_range(35.0..75.0)
            } else {
                match position {
                    Position::Ruck => rng.gen_range(75.0..120.0),
                    Position::Midfielder => rng.gen_range(70.0..125.0),
                    _ => rng.gen_range(55.0..100.0),
                }
            };
            let sd: f64 = rng.gen_range(12.0..32.0);
            let rounds: u32 = rng.gen_range(1..=12);
            let l3 = (average + rng.gen_range(-18.0..18.0)).max(0.0);
            let l5 = (average + rng.gen_range(-10.0..10.0)).max(0.0);
            let price = if rookie {
                rng.gen_range(230_000.0..350_000.0_f64)
            } else {
                (average * 8_500.0).clamp(300_000.0, 1_100_000.0)
            };
            let break_even = if rookie {
                rng.gen_range(-40.0..40.0_f64)
            } else {
                average + rng.gen_range(-25.0..25.0)
            };
            let has_history = rounds > 2;
            Player {
                id: format!("{}", 1000 + idx),
                name: format!("{first} {last}"),
                team: Some(AFL_TEAMS[rng.gen_range(0..AFL_TEAMS.len())].to_string()),
                position: Some(position),
                price: Some((price / 1000.0).round() * 1000.0),
                break_even: Some(break_even.round()),
                price_change: Some((rng.gen_range(-40_000.0..60_000.0_f64) / 1000.0).round() * 1000.0),
                projected_price_change: None,
                average_points: Some((average * 10.0).round() / 10.0),
                last_score: Some((average + rng.gen_range(-30.0..30.0)).max(0.0).round()),
                l3_average: has_history.then_some((l3 * 10.0).round() / 10.0),
                l5_average: (rounds > 4).then_some((l5 * 10.0).round() / 10.0),
                total_points: Some((average * f64::from(rounds)).round()),
                rounds_played: Some(rounds),
                standard_deviation: has_history.then_some((sd * 10.0).round() / 10.0),
                high_score: Some((average + sd * 1.8).round()),
                low_score: Some((average - sd * 1.6).max(0.0).round()),
                is_injured: rng.gen_bool(0.05),
                is_suspended: rng.gen_bool(0.02),
                is_favorite: false,
                next_opponent: None,
                next_venue: None,
                opponent_3_round_difficulty: None,
            }
        })
        .collect()
}

/// Round-robin draw across `MOCK_ROUNDS` rounds plus a random DVP table.
pub fn mock_fixtures(seed: u64) -> (Vec<Fixture>, DvpTable) {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let teams: Vec<&str> = AFL_TEAMS.to_vec();
    let n = teams.len();
    let mut fixtures = Vec::with_capacity(MOCK_ROUNDS as usize * n / 2);
    for round in 1..=MOCK_ROUNDS {
        // Circle method: team 0 fixed, the rest rotate.
        let shift = (round as usize - 1) % (n - 1);
        let mut order = vec![teams[0]];
        order.extend((0..n - 1).map(|i| teams[1 + (i + shift) % (n - 1)]));
        for i in 0..n / 2 {
            let (home, away) = if round % 2 == 0 {
                (order[n - 1 - i], order[i])
            } else {
                (order[i], order[n - 1 - i])
            };
            fixtures.push(Fixture {
                round,
                home: home.to_string(),
                away: away.to_string(),
                venue: Some(VENUES[rng.gen_range(0..VENUES.len())].to_string()),
            });
        }
    }

    let mut dvp = DvpTable::new();
    for team in &teams {
        for position in ALL_POSITIONS {
            dvp.set(team, position, f64::from(rng.gen_range(1..=5u8)));
        }
    }
    (fixtures, dvp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_players_are_deterministic() {
        assert_eq!(mock_players(7, 20), mock_players(7, 20));
        assert_ne!(mock_players(7, 20), mock_players(8, 20));
    }

    #[test]
    fn mock_fixtures_pair_every_team_each_round() {
        let (fixtures, dvp) = mock_fixtures(1);
        assert!(!dvp.is_empty());
        for round in 1..=MOCK_ROUNDS {
            let mut seen: Vec<&str> = fixtures
                .iter()
                .filter(|f| f.round == round)
                .flat_map(|f| [f.home.as_str(), f.away.as_str()])
                .collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), AFL_TEAMS.len());
        }
    }
}

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::config::{AppConfig, DataSource};
use crate::fixtures::{self, DvpTable, Fixture};
use crate::player::{ALL_POSITIONS, Player, Position, position_label};
use crate::projection::{
    FormulaProjector, ProjectionModel, Projector, RoundProjections, SeededProjector,
};
use crate::stats_table::{Category, StatsTable, TableView, category_label};
use crate::tools::ToolTab;
use crate::trades::TradeList;

const MAX_LOGS: usize = 200;
const MOCK_PROJECTION_SPREAD: f64 = 8.0;

/// Price filter presets cycled from the keyboard: (label, min, max).
pub const PRICE_BANDS: [(&str, Option<f64>, Option<f64>); 5] = [
    ("Any", None, None),
    ("Rookie <=$350k", None, Some(350_000.0)),
    ("Mid $350k-$600k", Some(350_000.0), Some(600_000.0)),
    ("Upper $600k-$800k", Some(600_000.0), Some(800_000.0)),
    ("Premium >=$800k", Some(800_000.0), None),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Stats,
    Tools,
    Trades,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub table: StatsTable,
    /// Records exactly as the source delivered them.
    pub source_players: Vec<Player>,
    /// `source_players` plus favourites, fixture context and projections.
    pub players: Vec<Player>,
    pub fixtures: Vec<Fixture>,
    pub dvp: DvpTable,
    pub projections: RoundProjections<ProjectionModel>,
    pub current_round: u32,
    pub favorites: HashSet<String>,
    pub selected: usize,
    pub detail_open: bool,
    pub search_active: bool,
    pub price_band: usize,
    pub pending_trade_out: Option<Player>,
    pub trades: TradeList,
    pub trade_selected: usize,
    pub tool_tab: ToolTab,
    pub tool_selected: usize,
    pub rookie_max_price: f64,
    pub load: LoadStatus,
    pub latest_request: u64,
    pub fetched_at: Option<SystemTime>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        let formula = FormulaProjector::new(config.price_per_point);
        let model = match config.data_source {
            DataSource::Api => ProjectionModel::Formula(formula),
            DataSource::Mock => ProjectionModel::Seeded(SeededProjector::new(
                config.mock_seed,
                MOCK_PROJECTION_SPREAD,
                formula,
            )),
        };
        Self {
            screen: Screen::Stats,
            table: StatsTable::new(),
            source_players: Vec::new(),
            players: Vec::new(),
            fixtures: Vec::new(),
            dvp: DvpTable::new(),
            projections: RoundProjections::new(
                config.current_round,
                HashMap::new(),
                model,
                config.price_per_point,
            ),
            current_round: config.current_round,
            favorites: HashSet::new(),
            selected: 0,
            detail_open: false,
            search_active: false,
            price_band: 0,
            pending_trade_out: None,
            trades: TradeList::new(),
            trade_selected: 0,
            tool_tab: ToolTab::Captains,
            tool_selected: 0,
            rookie_max_price: config.rookie_max_price,
            load: LoadStatus::Idle,
            latest_request: 0,
            fetched_at: None,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn view(&self) -> TableView<'_> {
        self.table.view(&self.players)
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.view().rows().get(self.selected).copied()
    }

    pub fn selected_player_id(&self) -> Option<String> {
        self.selected_player().map(|p| p.id.clone())
    }

    /// Issues a new players request id. Responses tagged with an older id are
    /// dropped by [`apply_delta`].
    pub fn begin_players_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.load = LoadStatus::Loading;
        self.latest_request
    }

    pub fn is_stale(&self, now: SystemTime, stale_after: Duration) -> bool {
        match self.fetched_at {
            Some(at) => now
                .duration_since(at)
                .map(|age| age >= stale_after)
                .unwrap_or(false),
            None => true,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn select_next(&mut self) {
        let total = self.view().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.view().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.view().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    /// Re-points the cursor at `id` after the row order changed, or resets it.
    fn reselect(&mut self, id: Option<String>) {
        let pos = id.and_then(|id| self.view().rows().iter().position(|p| p.id == id));
        self.selected = pos.unwrap_or(0);
    }

    pub fn set_category(&mut self, category: Category) {
        let id = self.selected_player_id();
        self.table.set_category(category);
        self.reselect(id);
    }

    pub fn next_category(&mut self) {
        let id = self.selected_player_id();
        self.table.next_category();
        self.reselect(id);
    }

    pub fn prev_category(&mut self) {
        let id = self.selected_player_id();
        self.table.prev_category();
        self.reselect(id);
    }

    pub fn click_focused_header(&mut self) {
        let id = self.selected_player_id();
        if let Some(sort) = self.table.click_focused_header() {
            debug!(category = ?self.table.category, ?sort, "sort toggled");
        }
        self.reselect(id);
    }

    pub fn open_detail(&mut self) {
        self.detail_open = self.selected_player().is_some();
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    pub fn toggle_favorite_selected(&mut self) {
        let Some(player) = self.selected_player().cloned() else {
            return;
        };
        let mut change = None;
        self.table
            .toggle_favorite(&player, |id, fav| change = Some((id.to_string(), fav)));
        if let Some((id, fav)) = change {
            self.set_favorite(&id, fav);
        }
    }

    pub fn set_favorite(&mut self, id: &str, favorite: bool) {
        if favorite {
            self.favorites.insert(id.to_string());
        } else {
            self.favorites.remove(id);
        }
        for player in self.players.iter_mut().filter(|p| p.id == id) {
            player.is_favorite = favorite;
        }
    }

    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    pub fn stop_search(&mut self) {
        self.search_active = false;
    }

    pub fn push_search_char(&mut self, ch: char) {
        let id = self.selected_player_id();
        self.table.filter.name_query.push(ch);
        self.reselect(id);
    }

    pub fn pop_search_char(&mut self) {
        let id = self.selected_player_id();
        self.table.filter.name_query.pop();
        self.reselect(id);
    }

    pub fn teams(&self) -> Vec<String> {
        self.players
            .iter()
            .filter_map(|p| p.team.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// None -> first team -> ... -> last team -> None.
    pub fn cycle_team_filter(&mut self) {
        let teams = self.teams();
        let next = match self.table.filter.team.as_deref() {
            None => teams.first().cloned(),
            Some(current) => teams
                .iter()
                .position(|t| t == current)
                .and_then(|idx| teams.get(idx + 1).cloned()),
        };
        self.table.filter.team = next;
        self.clamp_selection();
    }

    pub fn cycle_position_filter(&mut self) {
        self.table.filter.position = match self.table.filter.position {
            None => Some(ALL_POSITIONS[0]),
            Some(current) => ALL_POSITIONS
                .iter()
                .position(|p| *p == current)
                .and_then(|idx| ALL_POSITIONS.get(idx + 1).copied()),
        };
        self.clamp_selection();
    }

    pub fn cycle_price_band(&mut self) {
        self.price_band = (self.price_band + 1) % PRICE_BANDS.len();
        let (_, min, max) = PRICE_BANDS[self.price_band];
        self.table.filter.price_min = min;
        self.table.filter.price_max = max;
        self.clamp_selection();
    }

    pub fn clear_filters(&mut self) {
        let id = self.selected_player_id();
        self.table.filter = Default::default();
        self.price_band = 0;
        self.search_active = false;
        self.reselect(id);
    }

    pub fn filter_summary(&self) -> String {
        let f = &self.table.filter;
        let mut parts = Vec::new();
        if !f.name_query.is_empty() {
            parts.push(format!("name~\"{}\"", f.name_query));
        }
        if let Some(team) = &f.team {
            parts.push(format!("team={team}"));
        }
        if let Some(pos) = f.position {
            parts.push(format!("pos={}", position_label(pos)));
        }
        if self.price_band != 0 {
            parts.push(PRICE_BANDS[self.price_band].0.to_string());
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// First press marks the outgoing player, second press the incoming one.
    pub fn mark_trade(&mut self) {
        let Some(player) = self.selected_player().cloned() else {
            return;
        };
        match self.pending_trade_out.take() {
            None => {
                self.push_log(format!("[INFO] Trade out: {}", player.name));
                self.pending_trade_out = Some(player);
            }
            Some(out) => {
                let msg = format!("[INFO] Trade added: {} -> {}", out.name, player.name);
                match self.trades.push(out, player) {
                    Ok(()) => self.push_log(msg),
                    Err(err) => self.push_log(format!("[WARN] {err}")),
                }
            }
        }
    }

    pub fn cancel_pending_trade(&mut self) {
        self.pending_trade_out = None;
    }

    pub fn remove_selected_trade(&mut self) {
        if self.trades.remove(self.trade_selected).is_some() {
            self.push_log("[INFO] Trade removed");
        }
        if self.trade_selected >= self.trades.len() {
            self.trade_selected = self.trades.len().saturating_sub(1);
        }
    }

    pub fn select_trade_next(&mut self) {
        let total = self.trades.len();
        self.trade_selected = if total == 0 {
            0
        } else {
            (self.trade_selected + 1) % total
        };
    }

    pub fn select_trade_prev(&mut self) {
        let total = self.trades.len();
        if total == 0 {
            self.trade_selected = 0;
        } else if self.trade_selected == 0 {
            self.trade_selected = total - 1;
        } else {
            self.trade_selected -= 1;
        }
    }

    pub fn cycle_tool_tab(&mut self) {
        self.tool_tab = match self.tool_tab {
            ToolTab::Captains => ToolTab::CashCows,
            ToolTab::CashCows => ToolTab::Timing,
            ToolTab::Timing => ToolTab::Captains,
        };
        self.tool_selected = 0;
    }

    pub fn select_tool_next(&mut self, total: usize) {
        self.tool_selected = if total == 0 {
            0
        } else {
            (self.tool_selected + 1) % total
        };
    }

    pub fn select_tool_prev(&mut self, total: usize) {
        if total == 0 {
            self.tool_selected = 0;
        } else if self.tool_selected == 0 {
            self.tool_selected = total - 1;
        } else {
            self.tool_selected -= 1;
        }
    }

    /// Installs a fresh source snapshot and rebuilds the displayed rows.
    pub fn replace_players(&mut self, players: Vec<Player>) {
        self.source_players = players;
        self.rederive_players();
    }

    /// Rebuilds `players` from `source_players` under the current favourites,
    /// fixtures and projections. Derived values never leak into the source,
    /// so a new fixture list or projection round replaces the old context.
    pub fn rederive_players(&mut self) {
        let id = self.selected_player_id();
        let mut players = self.source_players.clone();
        for player in &mut players {
            player.is_favorite = self.favorites.contains(&player.id);
        }
        fixtures::enrich_players(&mut players, &self.fixtures, &self.dvp, self.current_round);
        for player in players
            .iter_mut()
            .filter(|p| p.projected_price_change.is_none())
        {
            player.projected_price_change = self.projections.projected_price_change(player);
        }
        self.players = players;
        self.reselect(id.clone());
        if self.detail_open && (id.is_none() || self.selected_player_id() != id) {
            self.detail_open = false;
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    PlayersLoaded {
        request_id: u64,
        players: Vec<Player>,
    },
    FetchFailed {
        request_id: u64,
        message: String,
    },
    FixturesLoaded {
        fixtures: Vec<Fixture>,
        dvp: DvpTable,
    },
    ProjectionsLoaded {
        round: u32,
        scores: HashMap<String, f64>,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchPlayers { request_id: u64 },
    FetchFixtures,
    FetchProjections { round: u32 },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::PlayersLoaded {
            request_id,
            players,
        } => {
            if request_id < state.latest_request {
                debug!(request_id, latest = state.latest_request, "superseded players response");
                return;
            }
            let count = players.len();
            state.replace_players(players);
            state.load = LoadStatus::Loaded;
            state.fetched_at = Some(SystemTime::now());
            state.push_log(format!("[INFO] Loaded {count} players"));
        }
        Delta::FetchFailed {
            request_id,
            message,
        } => {
            if request_id < state.latest_request {
                return;
            }
            state.push_log(format!("[WARN] Player fetch failed: {message}"));
            state.load = LoadStatus::Failed(message);
        }
        Delta::FixturesLoaded { fixtures, dvp } => {
            state.fixtures = fixtures;
            state.dvp = dvp;
            state.rederive_players();
            state.push_log(format!(
                "[INFO] Loaded {} fixtures",
                state.fixtures.len()
            ));
        }
        Delta::ProjectionsLoaded { round, scores } => {
            state.push_log(format!(
                "[INFO] Round {round} projections: {} players",
                scores.len()
            ));
            state.projections.round = round;
            state.projections.scores = scores;
            state.rederive_players();
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Stats => "STATS",
        Screen::Tools => "TOOLS",
        Screen::Trades => "TRADES",
    }
}

pub fn load_label(load: &LoadStatus) -> String {
    match load {
        LoadStatus::Idle => "idle".to_string(),
        LoadStatus::Loading => "loading…".to_string(),
        LoadStatus::Loaded => "ok".to_string(),
        LoadStatus::Failed(_) => "failed (r to retry)".to_string(),
    }
}

pub fn category_tabs(active: Category) -> String {
    crate::stats_table::ALL_CATEGORIES
        .iter()
        .map(|c| {
            if *c == active {
                format!("[{}]", category_label(*c))
            } else {
                category_label(*c).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn position_filter_label(position: Option<Position>) -> &'static str {
    position.map(position_label).unwrap_or("All")
}

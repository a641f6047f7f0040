use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Local};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use tracing::{info, warn};

use afl_fantasy_terminal::config::AppConfig;
use afl_fantasy_terminal::export::{default_export_name, export_table_xlsx};
use afl_fantasy_terminal::player::{
    Player, format_points, format_price, format_signed, format_text, position_label,
};
use afl_fantasy_terminal::projection::Projector;
use afl_fantasy_terminal::state::{
    self, AppState, LoadStatus, ProviderCommand, Screen, apply_delta, category_tabs, load_label,
    screen_label,
};
use afl_fantasy_terminal::stats_table::{SortField, TableView, direction_arrow, field_label};
use afl_fantasy_terminal::tools::{
    self, DEFAULT_CASH_ROUNDS, DEFAULT_TIMING_THRESHOLD, ToolTab, timing_label, tool_tab_label,
};
use afl_fantasy_terminal::{logging, persist, provider};

const CAPTAIN_PICKS: usize = 10;

struct App {
    state: AppState,
    config: AppConfig,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    last_poll: Instant,
}

impl App {
    fn new(config: AppConfig, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::with_config(&config),
            config,
            should_quit: false,
            cmd_tx,
            last_poll: Instant::now(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_overlay = false;
            }
            return;
        }
        if self.state.detail_open {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => self.state.close_detail(),
                KeyCode::Char('f') => self.state.toggle_favorite_selected(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('1') => self.state.screen = Screen::Stats,
            KeyCode::Char('2') => self.state.screen = Screen::Tools,
            KeyCode::Char('3') => self.state.screen = Screen::Trades,
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_all(true),
            _ => match self.state.screen {
                Screen::Stats => self.on_stats_key(key),
                Screen::Tools => self.on_tools_key(key),
                Screen::Trades => self.on_trades_key(key),
            },
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.state.stop_search(),
            KeyCode::Backspace => self.state.pop_search_char(),
            KeyCode::Char(ch) => self.state.push_search_char(ch),
            _ => {}
        }
    }

    fn on_stats_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.table.next_column(),
            KeyCode::Char('h') | KeyCode::Left => self.state.table.prev_column(),
            KeyCode::Tab => self.state.next_category(),
            KeyCode::BackTab => self.state.prev_category(),
            KeyCode::Char('s') | KeyCode::Char(' ') => self.state.click_focused_header(),
            KeyCode::Enter | KeyCode::Char('d') => self.state.open_detail(),
            KeyCode::Char('f') => self.state.toggle_favorite_selected(),
            KeyCode::Char('/') => self.state.start_search(),
            KeyCode::Char('t') => self.state.cycle_team_filter(),
            KeyCode::Char('p') => self.state.cycle_position_filter(),
            KeyCode::Char('$') => self.state.cycle_price_band(),
            KeyCode::Char('x') => self.state.clear_filters(),
            KeyCode::Char('o') => self.state.mark_trade(),
            KeyCode::Esc => self.state.cancel_pending_trade(),
            KeyCode::Char('e') => self.export_table(),
            _ => {}
        }
    }

    fn on_tools_key(&mut self, key: KeyEvent) {
        let total = self.tool_row_count();
        match key.code {
            KeyCode::Tab => self.state.cycle_tool_tab(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_tool_next(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_tool_prev(total),
            _ => {}
        }
    }

    fn on_trades_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_trade_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_trade_prev(),
            KeyCode::Char('d') | KeyCode::Delete => self.state.remove_selected_trade(),
            KeyCode::Esc => self.state.cancel_pending_trade(),
            _ => {}
        }
    }

    fn tool_row_count(&self) -> usize {
        let projector = &self.state.projections;
        match self.state.tool_tab {
            ToolTab::Captains => {
                tools::captain_candidates(&self.state.players, projector, CAPTAIN_PICKS).len()
            }
            ToolTab::CashCows => tools::cash_cows(
                &self.state.players,
                projector,
                self.state.rookie_max_price,
                DEFAULT_CASH_ROUNDS,
            )
            .len(),
            ToolTab::Timing => self.state.view().len(),
        }
    }

    fn send(&mut self, cmd: ProviderCommand, announce: bool) -> bool {
        let Some(tx) = &self.cmd_tx else {
            if announce {
                self.state.push_log("[INFO] Data provider unavailable");
            }
            return false;
        };
        if tx.send(cmd).is_err() {
            if announce {
                self.state.push_log("[WARN] Data provider stopped");
            }
            return false;
        }
        true
    }

    fn request_players(&mut self, announce: bool) {
        let request_id = self.state.begin_players_request();
        if self.send(ProviderCommand::FetchPlayers { request_id }, announce) {
            if announce {
                self.state.push_log("[INFO] Player refresh requested");
            }
        } else {
            self.state.load = LoadStatus::Failed("provider unavailable".to_string());
        }
        self.last_poll = Instant::now();
    }

    fn request_all(&mut self, announce: bool) {
        self.send(ProviderCommand::FetchFixtures, false);
        let round = self.state.current_round;
        self.send(ProviderCommand::FetchProjections { round }, false);
        self.request_players(announce);
    }

    fn maybe_poll(&mut self) {
        if self.last_poll.elapsed() >= self.config.poll_interval
            && self.state.load != LoadStatus::Loading
        {
            self.request_players(false);
        }
    }

    fn on_focus_gained(&mut self) {
        if self.state.load != LoadStatus::Loading
            && self
                .state
                .is_stale(SystemTime::now(), self.config.stale_after)
        {
            self.request_players(false);
        }
    }

    fn export_table(&mut self) {
        let category = self.state.table.category;
        let path = PathBuf::from(default_export_name(category));
        let result = {
            let view = self.state.view();
            export_table_xlsx(&path, category, view.rows())
        };
        match result {
            Ok(rows) => {
                info!(rows, path = %path.display(), "table exported");
                self.state
                    .push_log(format!("[INFO] Exported {rows} rows to {}", path.display()));
            }
            Err(err) => {
                warn!("export failed: {err:#}");
                self.state.push_log(format!("[WARN] Export failed: {err:#}"));
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    if let Err(err) = logging::init_logging() {
        eprintln!("logging disabled: {err:#}");
    }
    let config = AppConfig::from_env();
    info!(source = config.source_label(), api = %config.api_base, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    provider::spawn_provider(config.clone(), tx, cmd_rx);

    let mut app = App::new(config, Some(cmd_tx));
    persist::load_into_state(&mut app.state);
    app.request_all(false);

    let res = run_app(&mut terminal, &mut app, rx);

    persist::save_from_state(&app.state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_poll();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::FocusGained => app.on_focus_gained(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app))
        .block(Block::default().borders(Borders::BOTTOM))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Stats => render_stats(frame, chunks[1], &app.state),
        Screen::Tools => render_tools(frame, chunks[1], &app.state),
        Screen::Trades => render_trades(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.detail_open
        && let Some(player) = app.state.selected_player()
    {
        render_player_detail(frame, frame.size(), player, &app.state);
    }

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let state = &app.state;
    let updated = state
        .fetched_at
        .map(|t| DateTime::<Local>::from(t).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    format!(
        "AFL FANTASY | {} | {} | Round {} | {} | updated {updated}",
        screen_label(state.screen),
        app.config.source_label(),
        state.current_round,
        load_label(&state.load),
    )
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to filter by name | Enter/Esc Done | Backspace Delete".to_string();
    }
    match state.screen {
        Screen::Stats => "Tab Category | h/l Column | s Sort | j/k Move | Enter Detail | f Fav | / Search | t Team | p Pos | $ Price | x Clear | o Trade | e Export | r Refresh | ? Help | q Quit".to_string(),
        Screen::Tools => "1 Stats | 3 Trades | Tab Tool | j/k Move | r Refresh | ? Help | q Quit".to_string(),
        Screen::Trades => "1 Stats | 2 Tools | j/k Move | d Remove | Esc Cancel pending | ? Help | q Quit".to_string(),
    }
}

fn render_stats(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(category_tabs(state.table.category)), sections[0]);

    let mut filter_line = format!("Filters: {}", state.filter_summary());
    if state.search_active {
        filter_line = format!("Search: {}_", state.table.filter.name_query);
    }
    if let Some(out) = &state.pending_trade_out {
        filter_line.push_str(&format!(" | Trading out {} (o to pick incoming)", out.name));
    }
    frame.render_widget(
        Paragraph::new(filter_line).style(Style::default().fg(Color::Cyan)),
        sections[1],
    );

    let list_area = sections[2];
    let view = state.view();
    let rows = match &view {
        TableView::EmptySource => {
            render_empty(frame, list_area, &empty_source_message(&state.load));
            return;
        }
        TableView::NoMatches => {
            render_empty(frame, list_area, "No players match the current filters (x clears)");
            return;
        }
        TableView::Rows(rows) => rows,
    };

    let columns = state.table.columns();
    let sort = state.table.active_sort();
    let header_cells = columns.iter().enumerate().map(|(idx, field)| {
        let mut label = field_label(*field).to_string();
        if sort.field == Some(*field)
            && let Some(direction) = sort.direction
        {
            label.push(' ');
            label.push_str(direction_arrow(direction));
        }
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if idx == state.table.column {
            style = style.add_modifier(Modifier::UNDERLINED).fg(Color::Yellow);
        }
        Cell::from(label).style(style)
    });
    let header = Row::new(header_cells);

    let body = rows.iter().map(|player| {
        let cells = columns.iter().map(|field| Cell::from(cell_text(player, *field)));
        let mut row = Row::new(cells);
        if player.is_injured || player.is_suspended {
            row = row.style(Style::default().fg(Color::Red));
        } else if player.is_favorite {
            row = row.style(Style::default().fg(Color::Yellow));
        }
        row
    });

    let widths = columns.iter().map(|field| column_width(*field));
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::TOP))
        .highlight_style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .highlight_symbol("> ");
    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, list_area, &mut table_state);
}

fn empty_source_message(load: &LoadStatus) -> String {
    match load {
        LoadStatus::Failed(msg) => format!("Failed to load players: {msg}\nPress r to retry"),
        LoadStatus::Loading => "Loading players…".to_string(),
        _ => "No players loaded".to_string(),
    }
}

fn render_empty(frame: &mut Frame, area: Rect, text: &str) {
    let empty = Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(empty, area);
}

fn column_width(field: SortField) -> Constraint {
    match field {
        SortField::Name => Constraint::Min(22),
        SortField::Team | SortField::NextOpponent => Constraint::Length(17),
        SortField::NextVenue => Constraint::Length(21),
        SortField::Position => Constraint::Length(5),
        SortField::Price | SortField::PriceChange | SortField::ProjectedPriceChange => {
            Constraint::Length(10)
        }
        _ => Constraint::Length(8),
    }
}

fn cell_text(player: &Player, field: SortField) -> String {
    match field {
        SortField::Name => {
            let mut name = String::new();
            if player.is_favorite {
                name.push_str("★ ");
            }
            name.push_str(&player.name);
            let status = player.status_label();
            if !status.is_empty() {
                name.push_str(&format!(" [{status}]"));
            }
            name
        }
        SortField::Team => format_text(player.team.as_deref()),
        SortField::Position => player
            .position
            .map(position_label)
            .unwrap_or("-")
            .to_string(),
        SortField::Price => format_price(player.price),
        SortField::BreakEven => format_points(player.break_even),
        SortField::PriceChange => format_signed(player.price_change),
        SortField::ProjectedPriceChange => format_signed(player.projected_price_change),
        SortField::AveragePoints => format_points(player.average_points),
        SortField::LastScore => format_points(player.last_score),
        SortField::L3Average => format_points(player.l3_average),
        SortField::L5Average => format_points(player.l5_average),
        SortField::TotalPoints => format_points(player.total_points),
        SortField::RoundsPlayed => format_points(player.rounds_played.map(f64::from)),
        SortField::StandardDeviation => format_points(player.standard_deviation),
        SortField::HighScore => format_points(player.high_score),
        SortField::LowScore => format_points(player.low_score),
        SortField::NextOpponent => format_text(player.next_opponent.as_deref()),
        SortField::NextVenue => format_text(player.next_venue.as_deref()),
        SortField::OpponentDifficulty => player
            .opponent_3_round_difficulty
            .map(|d| format!("{d:.1}"))
            .unwrap_or_else(|| "-".to_string()),
    }
}

fn render_player_detail(frame: &mut Frame, area: Rect, player: &Player, state: &AppState) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let projector = &state.projections;
    let projected = projector.projected_score(player);
    let projected_change = player
        .projected_price_change
        .or_else(|| projector.projected_price_change(player));
    let signal = tools::timing_signal(player, projector, DEFAULT_TIMING_THRESHOLD);

    let lines = [
        format!(
            "{}{}",
            if player.is_favorite { "★ " } else { "" },
            player.name
        ),
        format!(
            "{} | {} | {}",
            format_text(player.team.as_deref()),
            player.position.map(position_label).unwrap_or("-"),
            if player.status_label().is_empty() {
                "Available"
            } else {
                player.status_label()
            }
        ),
        String::new(),
        format!(
            "Price {}  BE {}  Δ {}  Proj Δ {}",
            format_price(player.price),
            format_points(player.break_even),
            format_signed(player.price_change),
            format_signed(projected_change)
        ),
        format!(
            "Avg {}  Last {}  L3 {}  L5 {}",
            format_points(player.average_points),
            format_points(player.last_score),
            format_points(player.l3_average),
            format_points(player.l5_average)
        ),
        format!(
            "Total {}  Games {}  SD {}  High {}  Low {}",
            format_points(player.total_points),
            format_points(player.rounds_played.map(f64::from)),
            format_points(player.standard_deviation),
            format_points(player.high_score),
            format_points(player.low_score)
        ),
        format!(
            "Next {} @ {}  Difficulty(3) {}",
            format_text(player.next_opponent.as_deref()),
            format_text(player.next_venue.as_deref()),
            player
                .opponent_3_round_difficulty
                .map(|d| format!("{d:.1}"))
                .unwrap_or_else(|| "-".to_string())
        ),
        String::new(),
        format!(
            "Round {} projection {}  Signal {}",
            projector.round,
            format_points(projected.map(|s| (s * 10.0).round() / 10.0)),
            timing_label(signal)
        ),
        String::new(),
        "f Favourite | Esc Close".to_string(),
    ]
    .join("\n");

    let detail = Paragraph::new(lines)
        .block(Block::default().title("Player").borders(Borders::ALL));
    frame.render_widget(detail, popup_area);
}

fn render_tools(frame: &mut Frame, area: Rect, state: &AppState) {
    let projector = &state.projections;
    let lines: Vec<String> = match state.tool_tab {
        ToolTab::Captains => tools::captain_candidates(&state.players, projector, CAPTAIN_PICKS)
            .iter()
            .enumerate()
            .map(|(idx, pick)| {
                format!(
                    "{:>2}. {:<24} {:<17} proj {:>6.1}  conf {:>3}%",
                    idx + 1,
                    pick.player.name,
                    format_text(pick.player.team.as_deref()),
                    pick.projected_score,
                    pick.confidence
                )
            })
            .collect(),
        ToolTab::CashCows => tools::cash_cows(
            &state.players,
            projector,
            state.rookie_max_price,
            DEFAULT_CASH_ROUNDS,
        )
        .iter()
        .map(|cow| {
            format!(
                "{:<24} {:>8}  Δ/rd {:>7}  {}-rd gain {:>7}",
                cow.player.name,
                format_price(cow.player.price),
                format_signed(Some(cow.projected_price_change)),
                DEFAULT_CASH_ROUNDS,
                format_signed(Some(cow.projected_gain))
            )
        })
        .collect(),
        ToolTab::Timing => state
            .view()
            .rows()
            .iter()
            .map(|player| {
                let signal = tools::timing_signal(player, projector, DEFAULT_TIMING_THRESHOLD);
                format!(
                    "{:<5} {:<24} {:>8}  BE {:>5}  proj Δ {:>7}",
                    timing_label(signal),
                    player.name,
                    format_price(player.price),
                    format_points(player.break_even),
                    format_signed(projector.projected_price_change(player))
                )
            })
            .collect(),
    };

    let title = tool_tab_label(state.tool_tab);
    let text = if lines.is_empty() {
        "Nothing to show yet".to_string()
    } else {
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let prefix = if idx == state.tool_selected { "> " } else { "  " };
                format!("{prefix}{line}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let scroll = state.tool_selected.saturating_sub(area.height.saturating_sub(3) as usize);
    let widget = Paragraph::new(text)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_trades(frame: &mut Frame, area: Rect, state: &AppState) {
    let projector = &state.projections;
    let mut lines = Vec::new();
    if let Some(out) = &state.pending_trade_out {
        lines.push(format!("Pending: {} out, pick incoming from Stats with o", out.name));
        lines.push(String::new());
    }
    if state.trades.is_empty() {
        lines.push("No trades yet. Press o on two players in Stats to compare.".to_string());
    }
    for (idx, pair) in state.trades.pairs().iter().enumerate() {
        let prefix = if idx == state.trade_selected { "> " } else { "  " };
        lines.push(format!(
            "{prefix}{:<22} -> {:<22} Δ$ {:>7}  Δpts {:>+6.1}",
            pair.out.name,
            pair.incoming.name,
            format_signed(Some(pair.price_difference())),
            pair.projected_score_gain(projector)
        ));
    }
    if !state.trades.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Net price change: {}",
            format_signed(Some(state.trades.net_price_difference()))
        ));
    }
    let widget = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Trades").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "AFL Fantasy Terminal - Help",
        "",
        "Global:",
        "  1 / 2 / 3    Stats / Tools / Trades",
        "  r            Refresh (retry after a failure)",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Stats:",
        "  Tab/S-Tab    Next/previous category",
        "  h/l ←/→      Move column cursor",
        "  s / Space    Sort column: asc, desc, off",
        "  j/k ↑/↓      Move",
        "  Enter / d    Player detail",
        "  f            Toggle favourite",
        "  /            Search by name",
        "  t / p / $    Cycle team / position / price filter",
        "  x            Clear filters",
        "  o            Mark trade out, then trade in",
        "  e            Export table to xlsx",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

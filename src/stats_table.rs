//! Multi-category player table: per-category sort state, comparator and filters.
//!
//! Rows are always derived from the full source slice, so loosening a filter
//! re-reveals rows and clearing a sort restores insertion order.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::player::{Player, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Basic,
    Fantasy,
    Value,
    Consistency,
    Opposition,
    Venue,
}

pub const ALL_CATEGORIES: [Category; 6] = [
    Category::Basic,
    Category::Fantasy,
    Category::Value,
    Category::Consistency,
    Category::Opposition,
    Category::Venue,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Name,
    Team,
    Position,
    Price,
    BreakEven,
    PriceChange,
    ProjectedPriceChange,
    AveragePoints,
    LastScore,
    L3Average,
    L5Average,
    TotalPoints,
    RoundsPlayed,
    StandardDeviation,
    HighScore,
    LowScore,
    NextOpponent,
    NextVenue,
    OpponentDifficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort choice for one category. `field == None` means insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction: Some(direction),
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.field.is_some() && self.direction.is_some()
    }
}

/// Three-state header cycle: unsorted -> ascending -> descending -> unsorted.
/// Clicking a column other than the sorted one starts that column at ascending.
pub fn next_sort(current: SortState, clicked: SortField) -> SortState {
    match (current.field, current.direction) {
        (Some(field), Some(SortDirection::Ascending)) if field == clicked => {
            SortState::by(clicked, SortDirection::Descending)
        }
        (Some(field), Some(SortDirection::Descending)) if field == clicked => SortState::unsorted(),
        _ => SortState::by(clicked, SortDirection::Ascending),
    }
}

pub fn category_columns(category: Category) -> &'static [SortField] {
    match category {
        Category::Basic => &[
            SortField::Name,
            SortField::Team,
            SortField::Position,
            SortField::Price,
            SortField::AveragePoints,
            SortField::LastScore,
        ],
        Category::Fantasy => &[
            SortField::Name,
            SortField::TotalPoints,
            SortField::AveragePoints,
            SortField::L3Average,
            SortField::L5Average,
            SortField::HighScore,
            SortField::LowScore,
        ],
        Category::Value => &[
            SortField::Name,
            SortField::Price,
            SortField::BreakEven,
            SortField::PriceChange,
            SortField::ProjectedPriceChange,
        ],
        Category::Consistency => &[
            SortField::Name,
            SortField::AveragePoints,
            SortField::StandardDeviation,
            SortField::HighScore,
            SortField::LowScore,
            SortField::RoundsPlayed,
        ],
        Category::Opposition => &[
            SortField::Name,
            SortField::Team,
            SortField::NextOpponent,
            SortField::OpponentDifficulty,
            SortField::AveragePoints,
        ],
        Category::Venue => &[
            SortField::Name,
            SortField::Team,
            SortField::NextVenue,
            SortField::AveragePoints,
            SortField::LastScore,
        ],
    }
}

/// Keyed map of per-category sort state.
#[derive(Debug, Clone, Default)]
pub struct SortBook {
    states: HashMap<Category, SortState>,
}

impl SortBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> SortState {
        self.states.get(&category).copied().unwrap_or_default()
    }

    pub fn toggle(&mut self, category: Category, field: SortField) -> SortState {
        let next = next_sort(self.get(category), field);
        if next.is_sorted() {
            self.states.insert(category, next);
        } else {
            self.states.remove(&category);
        }
        next
    }

    pub fn clear(&mut self, category: Category) {
        self.states.remove(&category);
    }
}

enum SortKey<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

fn sort_key(player: &Player, field: SortField) -> SortKey<'_> {
    match field {
        SortField::Name => SortKey::Text(Some(player.name.as_str())),
        SortField::Team => SortKey::Text(player.team.as_deref()),
        SortField::NextOpponent => SortKey::Text(player.next_opponent.as_deref()),
        SortField::NextVenue => SortKey::Text(player.next_venue.as_deref()),
        SortField::Position => SortKey::Number(player.position.map(|p| f64::from(p.rank()))),
        SortField::Price => SortKey::Number(player.price),
        SortField::BreakEven => SortKey::Number(player.break_even),
        SortField::PriceChange => SortKey::Number(player.price_change),
        SortField::ProjectedPriceChange => SortKey::Number(player.projected_price_change),
        SortField::AveragePoints => SortKey::Number(player.average_points),
        SortField::LastScore => SortKey::Number(player.last_score),
        SortField::L3Average => SortKey::Number(player.l3_average),
        SortField::L5Average => SortKey::Number(player.l5_average),
        SortField::TotalPoints => SortKey::Number(player.total_points),
        SortField::RoundsPlayed => SortKey::Number(player.rounds_played.map(f64::from)),
        SortField::StandardDeviation => SortKey::Number(player.standard_deviation),
        SortField::HighScore => SortKey::Number(player.high_score),
        SortField::LowScore => SortKey::Number(player.low_score),
        SortField::OpponentDifficulty => SortKey::Number(player.opponent_3_round_difficulty),
    }
}

pub fn is_text_field(field: SortField) -> bool {
    matches!(
        field,
        SortField::Name | SortField::Team | SortField::NextOpponent | SortField::NextVenue
    )
}

/// Ascending comparison for one field. Missing text sorts as "", missing numbers as 0.
pub fn compare_players(a: &Player, b: &Player, field: SortField) -> Ordering {
    match (sort_key(a, field), sort_key(b, field)) {
        (SortKey::Text(x), SortKey::Text(y)) => compare_text(x.unwrap_or(""), y.unwrap_or("")),
        (SortKey::Number(x), SortKey::Number(y)) => x
            .unwrap_or(0.0)
            .partial_cmp(&y.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Case- and accent-insensitive order ("Ölund" sorts with "Olund"). Strings
/// that only differ by accents fall back to their lowercased code points.
fn compare_text(a: &str, b: &str) -> Ordering {
    collation_chars(a)
        .cmp(collation_chars(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
}

fn collation_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).flat_map(|c| {
        let (single, expanded) = match fold_latin(c) {
            Some(base) => (None, base),
            None => (Some(c), ""),
        };
        single.into_iter().chain(expanded.chars())
    })
}

/// Base letters for lowercase Latin-1 and Latin Extended-A accented letters.
fn fold_latin(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ţ' | 'ť' | 'ŧ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'þ' => "th",
        _ => return None,
    };
    Some(base)
}

/// Stable sort of `rows` for a category. A field outside the category's
/// columns leaves insertion order untouched.
pub fn sort_rows(rows: &mut [&Player], category: Category, sort: SortState) {
    let (Some(field), Some(direction)) = (sort.field, sort.direction) else {
        return;
    };
    if !category_columns(category).contains(&field) {
        return;
    }
    match direction {
        SortDirection::Ascending => rows.sort_by(|a, b| compare_players(a, b, field)),
        SortDirection::Descending => rows.sort_by(|a, b| compare_players(b, a, field)),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    pub name_query: String,
    pub team: Option<String>,
    pub position: Option<Position>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl PlayerFilter {
    pub fn is_empty(&self) -> bool {
        self.name_query.trim().is_empty()
            && self.team.is_none()
            && self.position.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
    }

    pub fn matches(&self, player: &Player) -> bool {
        let query = self.name_query.trim();
        if !query.is_empty() && !contains_ci(&player.name, query) {
            return false;
        }
        if let Some(team) = self.team.as_deref()
            && !player
                .team
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(team))
        {
            return false;
        }
        if let Some(position) = self.position
            && player.position != Some(position)
        {
            return false;
        }
        let price = player.price.unwrap_or(0.0);
        if let Some(min) = self.price_min
            && price < min
        {
            return false;
        }
        if let Some(max) = self.price_max
            && price > max
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, source: &'a [Player]) -> Vec<&'a Player> {
        source.iter().filter(|p| self.matches(p)).collect()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView<'a> {
    /// The source collection itself is empty.
    EmptySource,
    /// Source has rows but every one was filtered out.
    NoMatches,
    Rows(Vec<&'a Player>),
}

impl<'a> TableView<'a> {
    pub fn rows(&self) -> &[&'a Player] {
        match self {
            TableView::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Table controller: active category, per-category sort book, filter and
/// column cursor. Holds no player data of its own.
#[derive(Debug, Clone)]
pub struct StatsTable {
    pub category: Category,
    pub sorts: SortBook,
    pub filter: PlayerFilter,
    pub column: usize,
}

impl Default for StatsTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTable {
    pub fn new() -> Self {
        Self {
            category: Category::Basic,
            sorts: SortBook::new(),
            filter: PlayerFilter::default(),
            column: 0,
        }
    }

    pub fn columns(&self) -> &'static [SortField] {
        category_columns(self.category)
    }

    pub fn active_sort(&self) -> SortState {
        self.sorts.get(self.category)
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.clamp_column();
    }

    pub fn next_category(&mut self) {
        let idx = ALL_CATEGORIES
            .iter()
            .position(|c| *c == self.category)
            .unwrap_or(0);
        self.set_category(ALL_CATEGORIES[(idx + 1) % ALL_CATEGORIES.len()]);
    }

    pub fn prev_category(&mut self) {
        let idx = ALL_CATEGORIES
            .iter()
            .position(|c| *c == self.category)
            .unwrap_or(0);
        let prev = if idx == 0 {
            ALL_CATEGORIES.len() - 1
        } else {
            idx - 1
        };
        self.set_category(ALL_CATEGORIES[prev]);
    }

    pub fn next_column(&mut self) {
        let total = self.columns().len();
        if total > 0 {
            self.column = (self.column + 1) % total;
        }
    }

    pub fn prev_column(&mut self) {
        let total = self.columns().len();
        if total == 0 {
            return;
        }
        self.column = if self.column == 0 {
            total - 1
        } else {
            self.column - 1
        };
    }

    pub fn focused_field(&self) -> Option<SortField> {
        self.columns().get(self.column).copied()
    }

    /// Header click on `field` within the active category.
    pub fn click_header(&mut self, field: SortField) -> SortState {
        self.sorts.toggle(self.category, field)
    }

    pub fn click_focused_header(&mut self) -> Option<SortState> {
        let field = self.focused_field()?;
        Some(self.click_header(field))
    }

    pub fn view<'a>(&self, source: &'a [Player]) -> TableView<'a> {
        if source.is_empty() {
            return TableView::EmptySource;
        }
        let mut rows = self.filter.apply(source);
        if rows.is_empty() {
            return TableView::NoMatches;
        }
        sort_rows(&mut rows, self.category, self.active_sort());
        TableView::Rows(rows)
    }

    /// Forwards a favourite toggle for `player` to the caller's store.
    pub fn toggle_favorite(&self, player: &Player, mut on_toggle: impl FnMut(&str, bool)) {
        on_toggle(&player.id, !player.is_favorite);
    }

    fn clamp_column(&mut self) {
        let total = self.columns().len();
        if self.column >= total {
            self.column = total.saturating_sub(1);
        }
    }
}

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Basic => "Basic",
        Category::Fantasy => "Fantasy",
        Category::Value => "Value",
        Category::Consistency => "Consistency",
        Category::Opposition => "Opposition",
        Category::Venue => "Venue",
    }
}

pub fn field_label(field: SortField) -> &'static str {
    match field {
        SortField::Name => "Player",
        SortField::Team => "Team",
        SortField::Position => "Pos",
        SortField::Price => "Price",
        SortField::BreakEven => "BE",
        SortField::PriceChange => "Δ$",
        SortField::ProjectedPriceChange => "Proj Δ$",
        SortField::AveragePoints => "Avg",
        SortField::LastScore => "Last",
        SortField::L3Average => "L3",
        SortField::L5Average => "L5",
        SortField::TotalPoints => "Total",
        SortField::RoundsPlayed => "Games",
        SortField::StandardDeviation => "SD",
        SortField::HighScore => "High",
        SortField::LowScore => "Low",
        SortField::NextOpponent => "Opp",
        SortField::NextVenue => "Venue",
        SortField::OpponentDifficulty => "Diff(3)",
    }
}

pub fn direction_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    }
}

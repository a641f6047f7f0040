use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Defender,
    Midfielder,
    Ruck,
    Forward,
}

pub const ALL_POSITIONS: [Position; 4] = [
    Position::Defender,
    Position::Midfielder,
    Position::Ruck,
    Position::Forward,
];

impl Position {
    /// Accepts `DEF`, `Defender`, `D` and dual-position strings like `MID/FWD`
    /// (first listed position wins).
    pub fn parse(raw: &str) -> Option<Position> {
        let first = raw
            .split(['/', ',', '|', ' '])
            .map(str::trim)
            .find(|part| !part.is_empty())?;
        match first.to_ascii_lowercase().as_str() {
            "d" | "def" | "defender" | "back" => Some(Position::Defender),
            "m" | "c" | "mid" | "midfielder" | "midfield" => Some(Position::Midfielder),
            "r" | "ruc" | "ruck" => Some(Position::Ruck),
            "f" | "fwd" | "forward" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Ruck => 3,
            Position::Forward => 4,
        }
    }
}

pub fn position_label(position: Position) -> &'static str {
    match position {
        Position::Defender => "DEF",
        Position::Midfielder => "MID",
        Position::Ruck => "RUC",
        Position::Forward => "FWD",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,

    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub break_even: Option<f64>,
    #[serde(default)]
    pub price_change: Option<f64>,
    #[serde(default)]
    pub projected_price_change: Option<f64>,

    #[serde(default)]
    pub average_points: Option<f64>,
    #[serde(default)]
    pub last_score: Option<f64>,
    #[serde(default)]
    pub l3_average: Option<f64>,
    #[serde(default)]
    pub l5_average: Option<f64>,
    #[serde(default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub rounds_played: Option<u32>,
    #[serde(default)]
    pub standard_deviation: Option<f64>,
    #[serde(default)]
    pub high_score: Option<f64>,
    #[serde(default)]
    pub low_score: Option<f64>,

    #[serde(default)]
    pub is_injured: bool,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub is_favorite: bool,

    #[serde(default)]
    pub next_opponent: Option<String>,
    #[serde(default)]
    pub next_venue: Option<String>,
    #[serde(default)]
    pub opponent_3_round_difficulty: Option<f64>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_available(&self) -> bool {
        !self.is_injured && !self.is_suspended
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_injured {
            "INJ"
        } else if self.is_suspended {
            "SUS"
        } else {
            ""
        }
    }
}

pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() >= 1000.0 => format!("${:.0}k", v / 1000.0),
        Some(v) => format!("${v:.0}"),
        None => "-".to_string(),
    }
}

pub fn format_points(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract().abs() < f64::EPSILON => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

pub fn format_signed(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() >= 1000.0 => format!("{:+.0}k", v / 1000.0),
        Some(v) => format!("{v:+.0}"),
        None => "-".to_string(),
    }
}

pub fn format_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parse_accepts_aliases() {
        assert_eq!(Position::parse("DEF"), Some(Position::Defender));
        assert_eq!(Position::parse("midfielder"), Some(Position::Midfielder));
        assert_eq!(Position::parse("RUC"), Some(Position::Ruck));
        assert_eq!(Position::parse("MID/FWD"), Some(Position::Midfielder));
        assert_eq!(Position::parse(" f "), Some(Position::Forward));
        assert_eq!(Position::parse("goalie"), None);
        assert_eq!(Position::parse(""), None);
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(format_price(None), "-");
        assert_eq!(format_points(None), "-");
        assert_eq!(format_signed(None), "-");
        assert_eq!(format_text(Some("  ")), "-");
        assert_eq!(format_price(Some(850_000.0)), "$850k");
        assert_eq!(format_points(Some(118.5)), "118.5");
        assert_eq!(format_points(Some(97.0)), "97");
        assert_eq!(format_signed(Some(-23_000.0)), "-23k");
    }
}

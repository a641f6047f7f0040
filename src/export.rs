use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::player::{Player, format_text, position_label};
use crate::stats_table::{Category, SortField, category_columns, category_label, field_label};

/// Writes the given rows (already filtered and sorted) as one worksheet
/// holding the category's columns. Returns the number of data rows written.
pub fn export_table_xlsx(path: &Path, category: Category, rows: &[&Player]) -> Result<usize> {
    let columns = category_columns(category);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(category_label(category))
        .context("name worksheet")?;

    let header = Format::new().set_bold();
    for (col_idx, field) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, field_label(*field), &header)
            .with_context(|| format!("write header {col_idx}"))?;
    }

    for (row_idx, player) in rows.iter().enumerate() {
        write_player_row(worksheet, row_idx as u32 + 1, columns, player)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;
    Ok(rows.len())
}

fn write_player_row(
    worksheet: &mut Worksheet,
    row: u32,
    columns: &[SortField],
    player: &Player,
) -> Result<()> {
    for (col_idx, field) in columns.iter().enumerate() {
        let col = col_idx as u16;
        let written = match cell_value(player, *field) {
            Cell::Text(text) => worksheet.write_string(row, col, text),
            Cell::Number(value) => worksheet.write_number(row, col, value),
        };
        written.with_context(|| format!("write cell ({row},{col})"))?;
    }
    Ok(())
}

enum Cell {
    Text(String),
    Number(f64),
}

fn cell_value(player: &Player, field: SortField) -> Cell {
    let number = |v: Option<f64>| match v {
        Some(v) => Cell::Number(v),
        None => Cell::Text("-".to_string()),
    };
    match field {
        SortField::Name => Cell::Text(player.name.clone()),
        SortField::Team => Cell::Text(format_text(player.team.as_deref())),
        SortField::Position => Cell::Text(
            player
                .position
                .map(position_label)
                .unwrap_or("-")
                .to_string(),
        ),
        SortField::NextOpponent => Cell::Text(format_text(player.next_opponent.as_deref())),
        SortField::NextVenue => Cell::Text(format_text(player.next_venue.as_deref())),
        SortField::Price => number(player.price),
        SortField::BreakEven => number(player.break_even),
        SortField::PriceChange => number(player.price_change),
        SortField::ProjectedPriceChange => number(player.projected_price_change),
        SortField::AveragePoints => number(player.average_points),
        SortField::LastScore => number(player.last_score),
        SortField::L3Average => number(player.l3_average),
        SortField::L5Average => number(player.l5_average),
        SortField::TotalPoints => number(player.total_points),
        SortField::RoundsPlayed => number(player.rounds_played.map(f64::from)),
        SortField::StandardDeviation => number(player.standard_deviation),
        SortField::HighScore => number(player.high_score),
        SortField::LowScore => number(player.low_score),
        SortField::OpponentDifficulty => number(player.opponent_3_round_difficulty),
    }
}

pub fn default_export_name(category: Category) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!(
        "afl_{}_{stamp}.xlsx",
        category_label(category).to_ascii_lowercase()
    )
}

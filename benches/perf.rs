use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use afl_fantasy_terminal::api_fetch::parse_players_json;
use afl_fantasy_terminal::player::Position;
use afl_fantasy_terminal::projection::FormulaProjector;
use afl_fantasy_terminal::provider::mock_players;
use afl_fantasy_terminal::stats_table::{Category, SortField, StatsTable};
use afl_fantasy_terminal::tools::{cash_cows, captain_candidates};

fn players_json(count: usize) -> String {
    serde_json::to_string(&mock_players(3, count)).expect("mock players serialize")
}

fn bench_table(c: &mut Criterion) {
    let players = mock_players(42, 800);

    let mut sorted = StatsTable::new();
    sorted.set_category(Category::Value);
    sorted.click_header(SortField::BreakEven);
    c.bench_function("view_800_sorted_breakeven", |b| {
        b.iter(|| black_box(sorted.view(black_box(&players)).len()))
    });

    let mut by_name = StatsTable::new();
    by_name.click_header(SortField::Name);
    by_name.click_header(SortField::Name);
    c.bench_function("view_800_sorted_name_desc", |b| {
        b.iter(|| black_box(by_name.view(black_box(&players)).len()))
    });

    let mut filtered = StatsTable::new();
    filtered.filter.name_query = "da".to_string();
    filtered.filter.position = Some(Position::Midfielder);
    filtered.filter.price_max = Some(900_000.0);
    filtered.click_header(SortField::AveragePoints);
    c.bench_function("view_800_filtered", |b| {
        b.iter(|| black_box(filtered.view(black_box(&players)).len()))
    });
}

fn bench_tools(c: &mut Criterion) {
    let players = mock_players(42, 800);
    let projector = FormulaProjector::default();
    c.bench_function("captains_800", |b| {
        b.iter(|| black_box(captain_candidates(black_box(&players), &projector, 10).len()))
    });
    c.bench_function("cash_cows_800", |b| {
        b.iter(|| black_box(cash_cows(black_box(&players), &projector, 350_000.0, 3).len()))
    });
}

fn bench_parse(c: &mut Criterion) {
    let raw = players_json(800);
    c.bench_function("parse_players_800", |b| {
        b.iter(|| black_box(parse_players_json(black_box(&raw)).expect("valid json")))
    });
}

criterion_group!(benches, bench_table, bench_tools, bench_parse);
criterion_main!(benches);

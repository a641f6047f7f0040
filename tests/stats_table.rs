use afl_fantasy_terminal::player::{Player, Position};
use afl_fantasy_terminal::provider::mock_players;
use afl_fantasy_terminal::stats_table::{
    ALL_CATEGORIES, Category, PlayerFilter, SortDirection, SortField, SortState, StatsTable,
    TableView, category_columns, compare_players, sort_rows,
};

fn player(id: &str, name: &str, team: &str, price: f64, avg: f64) -> Player {
    Player {
        team: Some(team.to_string()),
        price: Some(price),
        average_points: Some(avg),
        ..Player::new(id, name)
    }
}

fn names(view: &TableView<'_>) -> Vec<String> {
    view.rows().iter().map(|p| p.name.clone()).collect()
}

fn two_stars() -> Vec<Player> {
    vec![
        player("1", "Bontempelli", "Western Bulldogs", 850_000.0, 118.5),
        player("2", "Daicos", "Collingwood", 720_000.0, 115.2),
    ]
}

#[test]
fn price_header_cycles_asc_desc_then_insertion_order() {
    let source = two_stars();
    let mut table = StatsTable::new();

    table.click_header(SortField::Price);
    assert_eq!(names(&table.view(&source)), vec!["Daicos", "Bontempelli"]);

    table.click_header(SortField::Price);
    assert_eq!(names(&table.view(&source)), vec!["Bontempelli", "Daicos"]);

    table.click_header(SortField::Price);
    assert_eq!(table.active_sort(), SortState::unsorted());
    assert_eq!(names(&table.view(&source)), vec!["Bontempelli", "Daicos"]);
}

#[test]
fn team_filter_keeps_matching_subset_in_order() {
    let source = vec![
        player("1", "Nick Daicos", "Collingwood", 950_000.0, 112.0),
        player("2", "Marcus Bontempelli", "Western Bulldogs", 1_100_000.0, 118.4),
        player("3", "Jordan De Goey", "Collingwood", 620_000.0, 74.5),
        player("4", "Tim English", "Western Bulldogs", 880_000.0, 104.0),
    ];
    let mut table = StatsTable::new();
    table.filter.team = Some("Collingwood".to_string());

    assert_eq!(
        names(&table.view(&source)),
        vec!["Nick Daicos", "Jordan De Goey"]
    );
}

#[test]
fn empty_source_renders_marker_not_empty_rows() {
    let table = StatsTable::new();
    let view = table.view(&[]);
    assert_eq!(view, TableView::EmptySource);
    assert!(view.is_empty());
}

#[test]
fn filtered_to_nothing_is_distinct_from_empty_source() {
    let source = two_stars();
    let mut table = StatsTable::new();
    table.filter.name_query = "zzz".to_string();
    assert_eq!(table.view(&source), TableView::NoMatches);

    table.filter.name_query.clear();
    assert_eq!(table.view(&source).len(), 2);
}

#[test]
fn sort_state_is_independent_per_category() {
    for clicked in ALL_CATEGORIES {
        let mut table = StatsTable::new();
        table.set_category(Category::Value);
        table.click_header(SortField::BreakEven);
        let value_sort = table.active_sort();

        let field = category_columns(clicked)[1];
        table.set_category(clicked);
        let before: Vec<SortState> = ALL_CATEGORIES
            .iter()
            .map(|c| table.sorts.get(*c))
            .collect();
        table.click_header(field);

        for (idx, other) in ALL_CATEGORIES.iter().enumerate() {
            if *other != clicked {
                assert_eq!(table.sorts.get(*other), before[idx], "{other:?} disturbed");
            }
        }
        if clicked != Category::Value {
            assert_eq!(table.sorts.get(Category::Value), value_sort);
        }
    }
}

#[test]
fn every_column_walks_the_three_state_cycle() {
    for category in ALL_CATEGORIES {
        for field in category_columns(category) {
            let mut table = StatsTable::new();
            table.set_category(category);
            assert_eq!(
                table.click_header(*field),
                SortState::by(*field, SortDirection::Ascending)
            );
            assert_eq!(
                table.click_header(*field),
                SortState::by(*field, SortDirection::Descending)
            );
            assert_eq!(table.click_header(*field), SortState::unsorted());
        }
    }
}

#[test]
fn sorting_is_stable_and_idempotent() {
    for seed in 0..8u64 {
        let source = mock_players(seed, 120);
        for category in ALL_CATEGORIES {
            for field in category_columns(category) {
                for direction in [SortDirection::Ascending, SortDirection::Descending] {
                    let sort = SortState::by(*field, direction);
                    let mut once: Vec<&Player> = source.iter().collect();
                    sort_rows(&mut once, category, sort);
                    let mut twice = once.clone();
                    sort_rows(&mut twice, category, sort);
                    let once_ids: Vec<&str> = once.iter().map(|p| p.id.as_str()).collect();
                    let twice_ids: Vec<&str> = twice.iter().map(|p| p.id.as_str()).collect();
                    assert_eq!(once_ids, twice_ids);

                    // Equal keys keep source order.
                    for pair in once.windows(2) {
                        if compare_players(pair[0], pair[1], *field).is_eq() {
                            let a = source.iter().position(|p| p.id == pair[0].id);
                            let b = source.iter().position(|p| p.id == pair[1].id);
                            assert!(a < b, "unstable order for {field:?}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn missing_numbers_sort_as_zero() {
    let source = vec![
        player("1", "Plus", "A", 100.0, 5.0),
        Player::new("2", "Missing"),
        Player {
            price: Some(-10.0),
            ..Player::new("3", "Minus")
        },
    ];
    let mut table = StatsTable::new();
    table.click_header(SortField::Price);
    assert_eq!(names(&table.view(&source)), vec!["Minus", "Missing", "Plus"]);
}

#[test]
fn text_columns_ignore_case() {
    let source = vec![
        player("1", "zeke", "A", 1.0, 1.0),
        player("2", "Adam", "A", 1.0, 1.0),
        player("3", "bill", "A", 1.0, 1.0),
    ];
    let mut table = StatsTable::new();
    table.click_header(SortField::Name);
    assert_eq!(names(&table.view(&source)), vec!["Adam", "bill", "zeke"]);
}

#[test]
fn foreign_field_falls_back_to_insertion_order() {
    let source = two_stars();
    let mut rows: Vec<&Player> = source.iter().rev().collect();
    sort_rows(
        &mut rows,
        Category::Fantasy,
        SortState::by(SortField::Price, SortDirection::Ascending),
    );
    let ids: Vec<&str> = rows.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[test]
fn filters_are_subsets_and_tightening_never_grows() {
    for seed in 0..6u64 {
        let source = mock_players(seed, 150);
        let loose = PlayerFilter {
            name_query: "a".to_string(),
            price_min: Some(200_000.0),
            price_max: Some(1_000_000.0),
            ..PlayerFilter::default()
        };
        let loose_rows = loose.apply(&source);
        assert!(loose_rows.iter().all(|p| source.iter().any(|s| s.id == p.id)));

        let narrower_name = PlayerFilter {
            name_query: "ar".to_string(),
            ..loose.clone()
        };
        let narrower_price = PlayerFilter {
            price_min: Some(400_000.0),
            price_max: Some(800_000.0),
            ..loose.clone()
        };
        let with_position = PlayerFilter {
            position: Some(Position::Midfielder),
            ..loose.clone()
        };
        for tight in [narrower_name, narrower_price, with_position] {
            let tight_rows = tight.apply(&source);
            assert!(tight_rows.len() <= loose_rows.len());
            assert!(tight_rows.iter().all(|p| loose.matches(p)));
        }
    }
}

#[test]
fn loosening_a_filter_re_reveals_rows() {
    let source = two_stars();
    let mut table = StatsTable::new();
    table.filter.price_max = Some(800_000.0);
    assert_eq!(names(&table.view(&source)), vec!["Daicos"]);
    table.filter.price_max = None;
    assert_eq!(names(&table.view(&source)), vec!["Bontempelli", "Daicos"]);
}

#[test]
fn price_range_is_inclusive() {
    let source = two_stars();
    let filter = PlayerFilter {
        price_min: Some(720_000.0),
        price_max: Some(850_000.0),
        ..PlayerFilter::default()
    };
    assert_eq!(filter.apply(&source).len(), 2);
}

#[test]
fn favourite_toggle_goes_through_callback_only() {
    let source = two_stars();
    let table = StatsTable::new();
    let mut seen = Vec::new();
    table.toggle_favorite(&source[1], |id, fav| seen.push((id.to_string(), fav)));
    assert_eq!(seen, vec![("2".to_string(), true)]);
    assert!(!source[1].is_favorite);
}

#[test]
fn text_columns_fold_accents() {
    let source = vec![
        player("1", "Zorko", "A", 1.0, 1.0),
        player("2", "Ölund", "A", 1.0, 1.0),
        player("3", "Oliver", "A", 1.0, 1.0),
        player("4", "Olund", "A", 1.0, 1.0),
    ];
    let mut table = StatsTable::new();
    table.click_header(SortField::Name);
    assert_eq!(
        names(&table.view(&source)),
        vec!["Oliver", "Olund", "Ölund", "Zorko"]
    );
}

use criterion::{Criterion, criterion_group, criterion_main};
use memory_matrix_core::*;
use std::hint::black_box;

fn tile_set_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_set");
    for (tiles, rows, cols) in [(3, 3, 3), (10, 6, 7), (17, 10, 10), (100, 10, 10)] {
        group.bench_function(format!("{tiles}_on_{rows}x{cols}"), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                TileSet::create(black_box(tiles), rows, cols, seed).unwrap()
            })
        });
    }
    group.finish();
}

/// Clears every level until the trials run out.
fn perfect_game(seed: u64) -> GameState {
    let mut state = GameState::new(GameRules::default(), seed)
        .unwrap()
        .apply(Action::Start);
    while !state.is_over() {
        let (row, col) = state.tiles().closed_positions().next().unwrap();
        state = state.apply(Action::click(row, col));
    }
    state
}

/// Misses until the trials run out.
fn losing_game(seed: u64) -> GameState {
    let mut state = GameState::new(GameRules::default(), seed)
        .unwrap()
        .apply(Action::Start);
    while !state.is_over() {
        state = state.apply(Action::click_index(usize::MAX));
    }
    state
}

fn full_games(c: &mut Criterion) {
    c.bench_function("perfect_game", |b| b.iter(|| perfect_game(black_box(42))));
    c.bench_function("losing_game", |b| b.iter(|| losing_game(black_box(42))));
}

criterion_group!(benches, tile_set_generation, full_games);
criterion_main!(benches);

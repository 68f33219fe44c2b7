use criterion::{black_box, criterion_group, criterion_main, Criterion};
use color_lines::core::{Board, GameController};
use color_lines::types::{GameConfig, Position};

fn half_full_board() -> Board {
    let mut board = Board::new(9, 7, 12345);
    board.spawn(40);
    board
}

fn bench_check(c: &mut Criterion) {
    let board = Board::from_diagram(&[
        "1...1...1",
        ".1..1..1.",
        "..1.1.1..",
        "...111...",
        "111111111",
        "...111...",
        "..1.1.1..",
        ".1..1..1.",
        "1...1...1",
    ]);

    c.bench_function("check_star_all_axes", |b| {
        b.iter(|| board.check(black_box(Position::new(4, 4))))
    });
}

fn bench_path(c: &mut Criterion) {
    let board = half_full_board();
    let src = Position::new(0, 0);
    let free = board.free_cells();
    let dst = free.last().copied().unwrap_or(Position::new(8, 8));

    c.bench_function("path_half_full", |b| {
        b.iter(|| board.path(black_box(src), black_box(dst)))
    });
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("spawn_3_on_empty", |b| {
        b.iter(|| {
            let mut board = Board::new(9, 7, 12345);
            board.spawn(black_box(3))
        })
    });
}

fn bench_controller_pass(c: &mut Criterion) {
    let mut ctl = GameController::new(&GameConfig::default());
    let mut now_ms = 0u64;

    c.bench_function("controller_step_16ms", |b| {
        b.iter(|| {
            now_ms += 16;
            ctl.step(black_box(now_ms), None)
        })
    });
}

criterion_group!(
    benches,
    bench_check,
    bench_path,
    bench_spawn,
    bench_controller_pass
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tetris_cle::core::{Field, GameState};
use tetris_cle::term::{FrameBuffer, GameView, Viewport, WINDOW_HEIGHT, WINDOW_WIDTH};
use tetris_cle::types::{Cell, GameAction, PieceKind, Rotation};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if state.game_over() {
                state = GameState::new(12345);
            }
            state.tick(black_box(Some(GameAction::SoftDrop)))
        })
    });
}

fn bench_fits(c: &mut Criterion) {
    let field = Field::new();

    c.bench_function("fits", |b| {
        b.iter(|| {
            field.fits(
                black_box(PieceKind::T),
                black_box(Rotation::East),
                black_box(4),
                black_box(8),
            )
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut full = Field::new();
    for y in 13..17 {
        for x in 1..=10 {
            full.set(x, y, Cell::Occupied(PieceKind::I));
        }
    }

    c.bench_function("detect_and_clear_4_lines", |b| {
        b.iter_batched(
            || full.clone(),
            |mut field| {
                let lines = field.detect_full_lines(13, 17);
                field.clear_marked_lines(&lines);
                field
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_render(c: &mut Criterion) {
    let snap = GameState::new(12345).snapshot();
    let view = GameView::default();
    let viewport = Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("render_frame", |b| {
        b.iter(|| view.render_into(black_box(&snap), viewport, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_fits,
    bench_line_clear,
    bench_render
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrafill_core::{BitBoard, Piece, Quad};
use tetrafill_engine::{fill_horizontal_x4, fill_vertical_x4, reach_all, Mobility, ReachEngine};

const PIECES: [(Piece, &str); 7] = [
    (Piece::I, "I"),
    (Piece::O, "O"),
    (Piece::T, "T"),
    (Piece::S, "S"),
    (Piece::Z, "Z"),
    (Piece::J, "J"),
    (Piece::L, "L"),
];

fn messy_board() -> BitBoard {
    BitBoard::field(10)
        | BitBoard::from_diagram(
            "
            #.........
            ##....#...
            ###..###..
            ####.####.
            ###..#####
            ",
        )
}

fn bench_reach(c: &mut Criterion) {
    let engine = ReachEngine::default();
    for (name, board) in [("empty", BitBoard::field(10)), ("messy", messy_board())] {
        for (piece, piece_name) in PIECES {
            c.bench_function(&format!("reach_{}_{}", name, piece_name), |b| {
                b.iter(|| engine.reach(black_box(&board), black_box(piece)))
            });
        }
    }
}

fn bench_primitives(c: &mut Criterion) {
    let board = messy_board();
    let mobility = Mobility::new(&board, Piece::T, 10);
    let seed = Quad::from_fn(|o| *mobility.get(o) & BitBoard::line(20, 0x10));

    c.bench_function("mobility_t", |b| {
        b.iter(|| Mobility::new(black_box(&board), Piece::T, 10))
    });
    c.bench_function("fill_horizontal_x4", |b| {
        b.iter(|| fill_horizontal_x4(black_box(mobility.planes()), black_box(seed)))
    });
    c.bench_function("fill_vertical_x4", |b| {
        b.iter(|| fill_vertical_x4(black_box(mobility.planes()), black_box(seed)))
    });
    c.bench_function("placements_t", |b| {
        let reach = ReachEngine::default().reach(&board, Piece::T);
        b.iter(|| reach.as_ref().map(|r| black_box(r).placements().len()))
    });
}

fn bench_batch(c: &mut Criterion) {
    let engine = ReachEngine::default();
    let board = messy_board();
    c.bench_function("reach_all_parallel", |b| {
        b.iter(|| reach_all(&engine, black_box(&board)))
    });
}

criterion_group!(benches, bench_reach, bench_primitives, bench_batch);
criterion_main!(benches);

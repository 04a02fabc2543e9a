use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_solver::sudoku::board::Board;
use sudoku_solver::sudoku::solver::Solver;

const CLASSIC_PUZZLE: &str =
    "53XX7XXXX6XX195XXXX98XXXX6X8XXX6XXX34XX8X3XX17XXX2XXX6X6XXXX28XXXX419XX5XXXX8XX79";

// "AI Escargot", sparse givens, deep search.
const HARD_PUZZLE: &str =
    "1XXXX7X9XX3XX2XXX8XX96XX5XXXX53XX9XXX1XX8XXX26XXXX4XXX3XXXXXX1XX4XXXXXX7XX7XXX3XX";

const EMPTY_PUZZLE: &str =
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX";

fn bench_solve(c: &mut Criterion, name: &str, line: &str) {
    let board: Board = line.parse().unwrap();

    c.bench_function(name, |b| {
        b.iter(|| {
            let mut solver = Solver::new(black_box(board));
            let solved = solver.solve();
            black_box(solved);
        })
    });
}

fn bench_classic(c: &mut Criterion) {
    bench_solve(c, "solve - classic puzzle", CLASSIC_PUZZLE);
}

fn bench_hard(c: &mut Criterion) {
    bench_solve(c, "solve - hard puzzle", HARD_PUZZLE);
}

fn bench_empty(c: &mut Criterion) {
    bench_solve(c, "solve - empty grid", EMPTY_PUZZLE);
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse - classic puzzle", |b| {
        b.iter(|| {
            let board: Board = black_box(CLASSIC_PUZZLE).parse().unwrap();
            black_box(board);
        })
    });
}

criterion_group!(benches, bench_classic, bench_hard, bench_empty, bench_parse);
criterion_main!(benches);

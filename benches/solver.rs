//! Benchmarks for the edge-matching solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use edgematch::persistence;
use edgematch::puzzle::{Puzzle, QUARTET, UNICORN};
use edgematch::{compare, format_listing, format_solution, solve, Orientation, SolveOptions};

/// Benchmark the complete unicorn search.
fn bench_solve(c: &mut Criterion) {
    let puzzle = Puzzle::new(&UNICORN).unwrap();

    c.bench_function("solve_unicorn", |b| {
        b.iter(|| solve(black_box(&puzzle), SolveOptions::default()))
    });
}

/// Benchmark the 4x4 search, sequential and forked.
fn bench_solve_quartet(c: &mut Criterion) {
    let puzzle = Puzzle::new(&QUARTET).unwrap();

    let mut group = c.benchmark_group("quartet");
    group.sample_size(10);
    group.bench_function("sequential", |b| {
        b.iter(|| solve(black_box(&puzzle), SolveOptions::default()))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            solve(
                black_box(&puzzle),
                SolveOptions {
                    parallel: true,
                    ..SolveOptions::default()
                },
            )
        })
    });
    group.finish();
}

/// Benchmark rotating a single card through every orientation.
fn bench_rotations(c: &mut Criterion) {
    let puzzle = Puzzle::new(&UNICORN).unwrap();
    let card = puzzle.cards()[0];

    c.bench_function("edges_under_all_orientations", |b| {
        b.iter(|| Orientation::ALL.map(|orientation| black_box(&card).edges_under(orientation)))
    });
}

/// Benchmark formatting a solution for display.
fn bench_format_solution(c: &mut Criterion) {
    let puzzle = Puzzle::new(&UNICORN).unwrap();
    let solutions = solve(&puzzle, SolveOptions::default());
    let solution = &solutions[0];

    c.bench_function("format_solution", |b| {
        b.iter(|| format_solution(&puzzle, black_box(solution)))
    });
}

/// Benchmark parsing a listing and comparing it with fresh solutions.
fn bench_parse_and_compare(c: &mut Criterion) {
    let puzzle = Puzzle::new(&UNICORN).unwrap();
    let solutions = solve(&puzzle, SolveOptions::default());
    let listing = format_listing(&puzzle, &solutions);

    c.bench_function("parse_and_compare", |b| {
        b.iter(|| {
            let known = persistence::parse(&puzzle, black_box(&listing)).unwrap();
            compare(&puzzle, &known, &solutions)
        })
    });
}

criterion_group!(
    benches,
    bench_solve,
    bench_solve_quartet,
    bench_rotations,
    bench_format_solution,
    bench_parse_and_compare
);
criterion_main!(benches);

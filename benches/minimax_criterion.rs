use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use verdant_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use verdant_chess::game_state::position::Position;
use verdant_chess::search::minimax::{MinimaxSearch, SearchConfig};

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
    },
    SearchCase {
        name: "scholars_mate",
        fen: "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 3",
    },
    SearchCase {
        name: "tactical",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    SearchCase {
        name: "end_kpk",
        fen: "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1",
    },
];

fn bench_minimax(c: &mut Criterion) {
    let depth = std::env::var("VERDANT_SEARCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(2);

    let mut group = c.benchmark_group("minimax_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let position = Position::from_fen(case.fen).expect("benchmark FEN should parse");

        for (label, alpha_beta) in [("pruned", true), ("full", false)] {
            let config = SearchConfig {
                depth,
                alpha_beta,
                use_cache: true,
            };
            let mut bench_position = position.clone();
            let mut search = MinimaxSearch::new(config);

            // Search must leave the position untouched.
            let before = bench_position.snapshot();
            search.search(&mut bench_position).expect("search should run");
            assert_eq!(bench_position.snapshot(), before);

            group.bench_function(BenchmarkId::new(case.name, format!("{label}_d{depth}")), |b| {
                b.iter(|| {
                    let report = search
                        .search(black_box(&mut bench_position))
                        .expect("search should run");
                    black_box(report.leaf_nodes)
                });
            });
        }
    }

    group.finish();
}

criterion_group!(minimax_benches, bench_minimax);
criterion_main!(minimax_benches);

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use tile_search::*;

const WALKABLE: [char; 4] = ['d', 'd', 'g', 'm'];

/// A bordered open map with scattered water, goal in the far corner.
fn random_world(n: usize, seed: u64) -> GridWorld {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = String::new();
    for y in 0..n {
        for x in 0..n {
            let code = if x == 0 || y == 0 || x == n - 1 || y == n - 1 {
                'b'
            } else if (x, y) == (n - 2, n - 2) {
                'e'
            } else if (x, y) == (1, 1) || !rng.gen_bool(0.15) {
                WALKABLE[rng.gen_range(0..WALKABLE.len())]
            } else {
                'w'
            };
            map.push(code);
        }
        map.push('\n');
    }
    GridWorld::parse(&map).unwrap_or_else(|e| panic!("{e}"))
}

fn strategy_bench(c: &mut Criterion) {
    let start = Pose::new(1, 1, Orientation::South);
    for n in [16, 48] {
        let world = random_world(n, 0);
        for (strategy, heuristic) in [
            (Strategy::UniformCost, HeuristicKind::Manhattan),
            (Strategy::Greedy, HeuristicKind::Manhattan),
            (Strategy::AStar, HeuristicKind::Manhattan),
            (Strategy::AStar, HeuristicKind::Euclidean),
        ] {
            let config = SearchConfig::new(strategy, heuristic);
            c.bench_function(format!("{n}x{n}, {strategy} ({heuristic:?})").as_str(), |b| {
                b.iter(|| black_box(search(&world, start, &config)))
            });
        }
    }
}

fn reference_bench(c: &mut Criterion) {
    let world = GridWorld::parse(REFERENCE_MAP).unwrap_or_else(|e| panic!("{e}"));
    let config = SearchConfig::default();
    c.bench_function("reference map, UCS", |b| {
        b.iter(|| black_box(search(&world, REFERENCE_START, &config)))
    });
    c.bench_function("reference map, explorer", |b| {
        b.iter(|| {
            let mut explorer =
                IncrementalExplorer::new(&world, REFERENCE_START, HeuristicKind::Manhattan)
                    .unwrap_or_else(|e| panic!("{e}"));
            let children = explorer.children(explorer.root()).to_vec();
            for child in children {
                black_box(explorer.expand(child).map(|c| c.len()).ok());
            }
        })
    });
}

criterion_group!(benches, strategy_bench, reference_bench);
criterion_main!(benches);

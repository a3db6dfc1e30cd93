/// Fuzzes the search by checking on many random maps that every strategy finds a path exactly
/// when the goal shares a walkable component with the start, and that uniform-cost search and A*
/// (with either heuristic) agree on the cheapest cost.
use rand::prelude::*;
use tile_search::pose::replay;
use tile_search::*;

const INNER: [char; 5] = ['d', 'd', 'g', 'm', 'w'];

fn random_world(n: usize, rng: &mut StdRng) -> GridWorld {
    let goal = (n - 2, n - 2);
    let mut map = String::new();
    for y in 0..n {
        for x in 0..n {
            let code = if x == 0 || y == 0 || x == n - 1 || y == n - 1 {
                'b'
            } else if (x, y) == goal {
                'e'
            } else if (x, y) == (1, 1) {
                'd'
            } else if rng.gen_bool(0.25) {
                // Extra blockers make disconnected maps common.
                if rng.gen_bool(0.5) {
                    't'
                } else {
                    'r'
                }
            } else {
                INNER[rng.gen_range(0..INNER.len())]
            };
            map.push(code);
        }
        map.push('\n');
    }
    GridWorld::parse(&map).unwrap()
}

fn run(world: &GridWorld, strategy: Strategy, heuristic: HeuristicKind) -> Option<PathReport> {
    let start = Pose::new(1, 1, Orientation::East);
    match search(world, start, &SearchConfig::new(strategy, heuristic)) {
        Ok(report) => Some(report),
        Err(Error::NoPathFound) => None,
        Err(e) => panic!("unexpected error {e}"),
    }
}

#[test]
fn fuzz() {
    const N: usize = 7;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let world = random_world(N, &mut rng);
        let reachable = world.reachable(&Point::new(1, 1), &world.goal());
        for strategy in [Strategy::UniformCost, Strategy::Greedy, Strategy::AStar] {
            let report = run(&world, strategy, HeuristicKind::Manhattan);
            // Show the map if the outcome disagrees with the component check
            if report.is_some() != reachable {
                println!("{strategy}:\n{world}");
            }
            assert_eq!(report.is_some(), reachable);
        }
    }
}

#[test]
fn fuzz_cost() {
    const N: usize = 7;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let world = random_world(N, &mut rng);
        let Some(ucs) = run(&world, Strategy::UniformCost, HeuristicKind::Manhattan) else {
            continue;
        };
        for heuristic in [HeuristicKind::Manhattan, HeuristicKind::Euclidean] {
            let astar = run(&world, Strategy::AStar, heuristic).unwrap();
            if astar.total_cost != ucs.total_cost {
                println!("{world}\nUCS: {:?}\nA*: {:?}", ucs.actions(), astar.actions());
            }
            assert_eq!(astar.total_cost, ucs.total_cost);
        }
        let greedy = run(&world, Strategy::Greedy, HeuristicKind::Manhattan).unwrap();
        assert!(greedy.total_cost >= ucs.total_cost);
    }
}

#[test]
fn fuzz_replay() {
    const N: usize = 6;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_GRIDS {
        let world = random_world(N, &mut rng);
        for strategy in [Strategy::UniformCost, Strategy::Greedy, Strategy::AStar] {
            let Some(report) = run(&world, strategy, HeuristicKind::Euclidean) else {
                continue;
            };
            let poses = replay(report.start, &report.actions(), &world);
            let last = poses.last().unwrap();
            assert!(last.is_goal(&world));
            let cost: u32 = poses.iter().map(|p| p.cost(&world)).sum();
            assert_eq!(cost, report.total_cost);
        }
    }
}

#[test]
fn fuzz_precheck() {
    const N: usize = 6;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..N_GRIDS {
        let world = random_world(N, &mut rng);
        // Any inner cell, blocked or not.
        let start = Pose::new(
            rng.gen_range(1..N as i32 - 1),
            rng.gen_range(1..N as i32 - 1),
            Orientation::North,
        );
        let plain = SearchConfig::default();
        let prechecked = SearchConfig {
            precheck_reachability: true,
            ..SearchConfig::default()
        };
        let found = search(&world, start, &plain);
        if found.is_ok() != world.reachable(&start.position(), &world.goal()) {
            println!("start {start}:\n{world}");
        }
        assert_eq!(found.is_ok(), world.reachable(&start.position(), &world.goal()));
        assert_eq!(found, search(&world, start, &prechecked));
    }
}

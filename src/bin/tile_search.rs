use std::fs;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env};
use log::{error, LevelFilter};
use tile_search::{
    GridWorld, HeuristicKind, Orientation, PathReport, Pose, SearchConfig, SearchDriver, Status,
    Strategy, REFERENCE_MAP, REFERENCE_START,
};

/// Finds a cheapest (or merely good) route for a turning agent across a tile map
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map file; the built-in reference map is used when omitted
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// ucs, greedy or astar
    #[arg(short, long, default_value = "ucs")]
    strategy: Strategy,

    /// manhattan or euclidean
    #[arg(long, default_value = "manhattan")]
    heuristic: HeuristicKind,

    /// Start pose as x,y,orientation (for example 1,1,S)
    #[arg(long, value_parser = parse_pose)]
    start: Option<Pose>,

    /// Stop after this many steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Reject unreachable goals before searching
    #[arg(long)]
    precheck: bool,

    /// Print a progress line after every step
    #[arg(long)]
    trace_steps: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_pose(s: &str) -> Result<Pose, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, o] = parts.as_slice() else {
        return Err(format!("expected x,y,orientation but got {s:?}"));
    };
    let x = x.parse::<i32>().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.parse::<i32>().map_err(|e| format!("bad y {y:?}: {e}"))?;
    let orientation = o.parse::<Orientation>()?;
    Ok(Pose::new(x, y, orientation))
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

fn print_path(world: &GridWorld, report: &PathReport) {
    println!("{world}");
    println!("start {} (cost {})", report.start, report.start_cost);
    for (i, step) in report.steps.iter().enumerate() {
        println!(
            "{:>4}  {:<10} -> {}  +{}",
            i + 1,
            step.action.to_string(),
            step.pose,
            step.step_cost
        );
    }
    let codes: String = report.actions().iter().map(|a| a.code()).collect();
    println!("actions: {codes}");
    println!(
        "total cost {}, forward energy {}",
        report.total_cost,
        report.forward_energy()
    );
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let map_data = match &args.map {
        Some(path) => match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                error!("Cannot read {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => REFERENCE_MAP.to_owned(),
    };
    let world = match GridWorld::parse(&map_data) {
        Ok(world) => world,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = SearchConfig {
        step_budget: args.max_steps,
        precheck_reachability: args.precheck,
        ..SearchConfig::new(args.strategy, args.heuristic)
    };
    let start = args.start.unwrap_or(REFERENCE_START);
    let mut driver = match SearchDriver::from_config(&world, &config, start) {
        Ok(driver) => driver,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let trace_steps = args.trace_steps;
    let status = driver.run_with(|report| {
        if trace_steps {
            eprintln!(
                "step {:>5}  frontier {:>5}  explored {:>5}  enqueued {:>5}",
                report.step, report.frontier_len, report.explored_len, report.enqueued
            );
        }
        ControlFlow::Continue(())
    });

    if args.json {
        let output = serde_json::json!({
            "strategy": config.strategy,
            "heuristic": config.heuristic,
            "stats": driver.report(),
            "path": driver.path_report(),
        });
        println!("{output:#}");
    } else {
        match status {
            Status::Found(_) => {
                if let Some(report) = driver.path_report() {
                    println!("{} search", config.strategy);
                    print_path(&world, &report);
                }
            }
            Status::NoPathFound => println!("no path exists"),
            Status::Running => println!("stopped after {} steps", driver.steps()),
        }
        let stats = driver.report();
        println!(
            "{} steps, {} poses explored, {} nodes enqueued",
            stats.step, stats.explored_len, stats.enqueued
        );
    }

    match status {
        Status::NoPathFound => ExitCode::from(2),
        _ => ExitCode::SUCCESS,
    }
}

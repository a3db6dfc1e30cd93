//! # tile_search
//!
//! State-space search for a single agent on a weighted tile grid. The agent has a position and a
//! facing, and can move forward or turn left or right; every action charges the traversal cost of
//! the tile the agent ends up on. Three interchangeable strategies share one search loop:
//! [uniform-cost](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! [greedy best-first](https://en.wikipedia.org/wiki/Best-first_search) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm).
//!
//! Runs can be driven to completion or one step at a time through [SearchDriver], and the state
//! space can be explored by hand with [IncrementalExplorer]. Connected components of walkable
//! cells are pre-computed so an unreachable goal can optionally be rejected without searching.
pub mod config;
pub mod driver;
pub mod error;
pub mod explorer;
pub mod frontier;
pub mod history;
pub mod node;
pub mod pose;
pub mod report;
pub mod solver;
pub mod tile;
pub mod world;

pub use config::SearchConfig;
pub use driver::{SearchDriver, Status};
pub use error::{Error, MapDefect, Result};
pub use explorer::IncrementalExplorer;
pub use history::History;
pub use node::{NodeId, SearchNode, SearchTree};
pub use pose::{Action, HeuristicKind, Orientation, Pose};
pub use report::{PathReport, StepReport};
pub use solver::{SearchStrategy, Strategy};
pub use tile::Tile;
pub use world::{GridWorld, Point};

/// The 8x11 reference layout. Digits along the edges are border labels and block movement.
pub const REFERENCE_MAP: &str = include_str!("../maps/reference.map");

/// Where the agent starts on [REFERENCE_MAP].
pub const REFERENCE_START: Pose = Pose::new(1, 1, Orientation::South);

/// Runs a search to completion and returns the winning path, or [Error::NoPathFound].
pub fn search(world: &GridWorld, start: Pose, config: &SearchConfig) -> Result<PathReport> {
    let mut driver = SearchDriver::from_config(world, config, start)?;
    driver.solve()?;
    driver.path_report().ok_or(Error::NoPathFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_search_reaches_goal() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let report = search(&world, REFERENCE_START, &SearchConfig::default()).unwrap();
        let last = report.steps.last().unwrap();
        assert_eq!(last.pose.position(), world.goal());
    }
}

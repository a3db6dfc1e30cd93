use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::node::SearchNode;
use crate::pose::{HeuristicKind, Pose};
use crate::world::Point;

pub mod astar;
pub mod greedy;
pub mod uniform_cost;

use astar::AstarSolver;
use greedy::GreedySolver;
use uniform_cost::UniformCostSolver;

/// The part of a search run that differs between strategies: how nodes are estimated and in
/// which order the frontier serves them. The driver skeleton is shared.
pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    /// Estimate attached to every node as `h`. Fixed for the whole run.
    fn heuristic(&self, pose: &Pose, goal: &Point) -> f64;

    /// Frontier key of a node. Also the metric compared when a cheaper node for a pose already in
    /// the frontier shows up.
    fn priority(&self, node: &SearchNode) -> f64;
}

impl<S: SearchStrategy + ?Sized> SearchStrategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn heuristic(&self, pose: &Pose, goal: &Point) -> f64 {
        (**self).heuristic(pose, goal)
    }
    fn priority(&self, node: &SearchNode) -> f64 {
        (**self).priority(node)
    }
}

/// Strategy selector supplied by the caller at the start of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    UniformCost,
    Greedy,
    AStar,
}

impl Strategy {
    /// Builds the solver for this selector. The heuristic is ignored by uniform-cost search.
    pub fn solver(self, heuristic: HeuristicKind) -> Box<dyn SearchStrategy> {
        match self {
            Strategy::UniformCost => Box::new(UniformCostSolver),
            Strategy::Greedy => Box::new(GreedySolver::new(heuristic)),
            Strategy::AStar => Box::new(AstarSolver::new(heuristic)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::UniformCost => write!(f, "UCS"),
            Strategy::Greedy => write!(f, "Greedy"),
            Strategy::AStar => write!(f, "A*"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Strategy, String> {
        match s.to_ascii_lowercase().as_str() {
            "ucs" | "uniform" | "uniformcost" | "uniform-cost" => Ok(Strategy::UniformCost),
            "greedy" | "gbfs" => Ok(Strategy::Greedy),
            "astar" | "a*" => Ok(Strategy::AStar),
            other => Err(format!("unknown strategy {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Orientation;
    use crate::world::GridWorld;

    #[test]
    fn priorities_follow_strategy() {
        let world = GridWorld::parse("bbbbb\nbgdeb\nbbbbb").unwrap();
        let goal = world.goal();
        let pose = Pose::new(1, 1, Orientation::East);
        for (strategy, expected) in [
            (Strategy::UniformCost, 2.0),
            (Strategy::Greedy, 2.0),
            (Strategy::AStar, 4.0),
        ] {
            let solver = strategy.solver(HeuristicKind::Manhattan);
            let node = SearchNode::root(pose, &world, solver.heuristic(&pose, &goal));
            assert_eq!(solver.priority(&node), expected, "{}", solver.name());
        }
    }

    #[test]
    fn uniform_cost_ignores_heuristic() {
        let solver = Strategy::UniformCost.solver(HeuristicKind::Euclidean);
        let pose = Pose::new(0, 0, Orientation::North);
        assert_eq!(solver.heuristic(&pose, &Point::new(30, 40)), 0.0);
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!("UCS".parse::<Strategy>(), Ok(Strategy::UniformCost));
        assert_eq!("greedy".parse::<Strategy>(), Ok(Strategy::Greedy));
        assert_eq!("A*".parse::<Strategy>(), Ok(Strategy::AStar));
        assert!("bfs".parse::<Strategy>().is_err());
    }
}

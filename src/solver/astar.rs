use crate::{
    node::SearchNode,
    pose::{HeuristicKind, Pose},
    solver::SearchStrategy,
    world::Point,
};

/// Orders the frontier by `f = g + h`.
///
/// Both heuristics measure grid distance as if every step cost 1. Every action charges at least
/// 1 here, so the estimate never exceeds the true remaining cost, but it is loose on mud and grass.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic: HeuristicKind,
}

impl AstarSolver {
    pub fn new(heuristic: HeuristicKind) -> AstarSolver {
        AstarSolver { heuristic }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new(HeuristicKind::Manhattan)
    }
}

impl SearchStrategy for AstarSolver {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn heuristic(&self, pose: &Pose, goal: &Point) -> f64 {
        pose.heuristic(goal, self.heuristic)
    }

    fn priority(&self, node: &SearchNode) -> f64 {
        node.f()
    }
}

use crate::{
    node::SearchNode,
    pose::{HeuristicKind, Pose},
    solver::SearchStrategy,
    world::Point,
};

/// Orders the frontier by the heuristic alone. Usually expands few nodes but gives no guarantee
/// on path cost.
#[derive(Clone, Debug)]
pub struct GreedySolver {
    pub heuristic: HeuristicKind,
}

impl GreedySolver {
    pub fn new(heuristic: HeuristicKind) -> GreedySolver {
        GreedySolver { heuristic }
    }
}

impl SearchStrategy for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn heuristic(&self, pose: &Pose, goal: &Point) -> f64 {
        pose.heuristic(goal, self.heuristic)
    }

    fn priority(&self, node: &SearchNode) -> f64 {
        node.h()
    }
}

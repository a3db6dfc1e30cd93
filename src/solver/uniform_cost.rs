use crate::{
    node::SearchNode,
    pose::Pose,
    solver::SearchStrategy,
    world::Point,
};

/// Orders the frontier by accumulated cost `g`. Optimal under the tile cost model.
#[derive(Clone, Debug)]
pub struct UniformCostSolver;

impl SearchStrategy for UniformCostSolver {
    fn name(&self) -> &'static str {
        "uniform-cost"
    }

    /// Not used for ordering, stored as 0.
    fn heuristic(&self, _: &Pose, _: &Point) -> f64 {
        0.0
    }

    fn priority(&self, node: &SearchNode) -> f64 {
        f64::from(node.g())
    }
}

//! Plain data records handed to whatever renders search progress. No markup is produced here.

use serde::{Deserialize, Serialize};

use crate::driver::Status;
use crate::error::{Error, Result};
use crate::node::{NodeId, SearchNode, SearchTree};
use crate::pose::{Action, Pose};
use crate::world::GridWorld;

/// Snapshot of a run after one dequeue and expand cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Number of steps taken so far.
    pub step: usize,
    pub frontier_len: usize,
    pub explored_len: usize,
    /// Nodes that were ever newly pushed to the frontier, the start node included.
    pub enqueued: usize,
    /// Frontier entries replaced by a better node for the same pose.
    pub replaced: usize,
    /// Nodes generated so far.
    pub tree_len: usize,
    pub status: Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub action: Action,
    /// Pose after the action.
    pub pose: Pose,
    /// Cost charged for the resulting pose.
    pub step_cost: u32,
}

/// The winning path, ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub start: Pose,
    pub start_cost: u32,
    pub steps: Vec<PathStep>,
    /// Equals `g` of the goal node: the start cost plus every step cost.
    pub total_cost: u32,
}

impl PathReport {
    /// Builds the report for the path from the root of `tree` to `goal`. Fails with
    /// [Error::UnknownNode] if `goal` does not belong to `tree`.
    pub fn from_tree(tree: &SearchTree, goal: NodeId, world: &GridWorld) -> Result<PathReport> {
        let goal_node = tree.get(goal).ok_or(Error::UnknownNode(goal))?;
        let nodes = tree.path_nodes(goal);
        let start = nodes
            .first()
            .and_then(|&id| tree.get(id))
            .map(SearchNode::pose)
            .ok_or(Error::UnknownNode(goal))?;
        let steps = nodes
            .iter()
            .skip(1)
            .filter_map(|&id| {
                let node = &tree[id];
                node.action().map(|action| PathStep {
                    action,
                    pose: node.pose(),
                    step_cost: node.pose().cost(world),
                })
            })
            .collect();
        Ok(PathReport {
            start,
            start_cost: start.cost(world),
            steps,
            total_cost: goal_node.g(),
        })
    }

    pub fn actions(&self) -> Vec<Action> {
        self.steps.iter().map(|s| s.action).collect()
    }

    /// Cost summed over forward moves only.
    pub fn forward_energy(&self) -> u32 {
        self.steps
            .iter()
            .filter(|s| s.action == Action::Forward)
            .map(|s| s.step_cost)
            .sum()
    }
}

//! The search loop shared by every strategy.
//!
//! A [SearchDriver] owns all the mutable state of one run (node arena, frontier, explored set and
//! counters) and advances it one dequeue and expand cycle at a time. Running to completion is just
//! stepping until the status changes, so a caller can stop between any two steps and inspect or
//! resume the run.
//!
//! Poses are never reopened: once a pose has been expanded it stays in the explored set for the
//! rest of the run, even if a cheaper path to it turns up later. With the heuristics provided this
//! keeps uniform-cost and A* optimal, while greedy search may settle on a costlier path.

use fxhash::FxHashSet;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::node::{NodeId, SearchNode, SearchTree};
use crate::pose::Pose;
use crate::report::{PathReport, StepReport};
use crate::solver::SearchStrategy;
use crate::world::GridWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Running,
    Found(NodeId),
    NoPathFound,
}

impl Status {
    pub fn is_finished(&self) -> bool {
        *self != Status::Running
    }
}

pub struct SearchDriver<'w, S> {
    world: &'w GridWorld,
    solver: S,
    tree: SearchTree,
    frontier: Frontier,
    explored: FxHashSet<Pose>,
    root: NodeId,
    status: Status,
    steps: usize,
    enqueued: usize,
    replaced: usize,
    step_budget: Option<usize>,
}

impl<'w> SearchDriver<'w, Box<dyn SearchStrategy>> {
    /// Sets up a run as described by a [SearchConfig].
    pub fn from_config(
        world: &'w GridWorld,
        config: &SearchConfig,
        start: Pose,
    ) -> Result<SearchDriver<'w, Box<dyn SearchStrategy>>> {
        let mut driver =
            SearchDriver::new(world, config.solver(), start)?.with_step_budget(config.step_budget);
        if config.precheck_reachability {
            driver.precheck_reachability();
        }
        Ok(driver)
    }
}

impl<'w, S: SearchStrategy> SearchDriver<'w, S> {
    /// Seeds the frontier with the start node. Fails if the start lies outside the grid.
    pub fn new(world: &'w GridWorld, solver: S, start: Pose) -> Result<SearchDriver<'w, S>> {
        if !world.in_bounds(start.x, start.y) {
            return Err(Error::OutOfBounds {
                x: start.x,
                y: start.y,
            });
        }
        let goal = world.goal();
        let mut tree = SearchTree::new();
        let root_node = SearchNode::root(start, world, solver.heuristic(&start, &goal));
        let priority = solver.priority(&root_node);
        let root = tree.insert(root_node);
        let mut frontier = Frontier::new();
        frontier.push(root, start, priority);
        info!(
            "Starting {} search from {} towards {}",
            solver.name(),
            start,
            goal
        );
        Ok(SearchDriver {
            world,
            solver,
            tree,
            frontier,
            explored: FxHashSet::default(),
            root,
            status: Status::Running,
            steps: 0,
            enqueued: 1,
            replaced: 0,
            step_budget: None,
        })
    }

    /// Caps the number of steps [run](Self::run) takes. The run stays resumable afterwards.
    pub fn with_step_budget(mut self, step_budget: Option<usize>) -> Self {
        self.step_budget = step_budget;
        self
    }

    /// Fails the run up front if the start and goal are on different walkable components.
    pub fn precheck_reachability(&mut self) {
        let start = self.tree[self.root].pose().position();
        let goal = self.world.goal();
        if self.status == Status::Running && !self.world.reachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            self.status = Status::NoPathFound;
        }
    }

    /// One dequeue and expand cycle. Does nothing once the run has finished.
    pub fn step(&mut self) -> Status {
        if self.status.is_finished() {
            return self.status;
        }
        let id = match self.frontier.pop_min() {
            Ok((id, _)) => id,
            Err(_) => {
                warn!(
                    "Frontier exhausted after {} steps, {} poses explored",
                    self.steps,
                    self.explored.len()
                );
                self.status = Status::NoPathFound;
                return self.status;
            }
        };
        self.steps += 1;
        let pose = self.tree[id].pose();
        if pose.is_goal(self.world) {
            info!(
                "Reached goal {} after {} steps with cost {}",
                pose,
                self.steps,
                self.tree[id].g()
            );
            self.status = Status::Found(id);
            return self.status;
        }
        self.explored.insert(self.tree[id].key());
        let goal = self.world.goal();
        let solver = &self.solver;
        // Ids popped from the frontier always belong to this run's tree.
        let children = self
            .tree
            .expand(id, self.world, |p| solver.heuristic(p, &goal))
            .unwrap_or_default();
        for child in children {
            self.update_frontier(child);
        }
        debug!(
            "Step {}: expanded {}, frontier {}, explored {}",
            self.steps,
            self.tree[id],
            self.frontier.len(),
            self.explored.len()
        );
        self.status
    }

    /// Applies the frontier update rule to a freshly generated child: settled poses are dropped,
    /// poses already pending may be improved, anything else is pushed.
    fn update_frontier(&mut self, child: NodeId) {
        let node = &self.tree[child];
        let pose = node.key();
        let priority = self.solver.priority(node);
        if self.explored.contains(&pose) {
            trace!("Discarding {}: already explored", pose);
        } else if self.frontier.contains_pose(&pose) {
            if self.frontier.replace_if_better(child, pose, priority) {
                self.replaced += 1;
            }
        } else {
            self.frontier.push(child, pose, priority);
            self.enqueued += 1;
        }
    }

    /// Steps until the run finishes or the step budget is used up.
    pub fn run(&mut self) -> Status {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Like [run](Self::run), but hands a [StepReport] to `hook` after every step. The hook is
    /// where a caller yields, renders or throttles; returning [ControlFlow::Break] stops the run
    /// without finishing it.
    pub fn run_with<F>(&mut self, mut hook: F) -> Status
    where
        F: FnMut(&StepReport) -> ControlFlow<()>,
    {
        while !self.status.is_finished() {
            if self.step_budget.is_some_and(|budget| self.steps >= budget) {
                debug!("Step budget of {} used up", self.steps);
                break;
            }
            self.step();
            if hook(&self.report()).is_break() {
                debug!("Run interrupted by caller after {} steps", self.steps);
                break;
            }
        }
        self.status
    }

    /// Runs to completion and returns the goal node, or [Error::NoPathFound].
    pub fn solve(&mut self) -> Result<NodeId> {
        match self.run() {
            Status::Found(id) => Ok(id),
            _ => Err(Error::NoPathFound),
        }
    }

    pub fn report(&self) -> StepReport {
        StepReport {
            step: self.steps,
            frontier_len: self.frontier.len(),
            explored_len: self.explored.len(),
            enqueued: self.enqueued,
            replaced: self.replaced,
            tree_len: self.tree.len(),
            status: self.status,
        }
    }

    /// The winning path, once one has been found.
    pub fn path_report(&self) -> Option<PathReport> {
        match self.status {
            Status::Found(id) => PathReport::from_tree(&self.tree, id, self.world).ok(),
            _ => None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }
    pub fn steps(&self) -> usize {
        self.steps
    }
    pub fn enqueued(&self) -> usize {
        self.enqueued
    }
    /// Frontier entries superseded by a cheaper node for the same pose.
    pub fn replaced(&self) -> usize {
        self.replaced
    }
    pub fn root(&self) -> NodeId {
        self.root
    }
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }
    pub fn is_explored(&self, pose: &Pose) -> bool {
        self.explored.contains(pose)
    }
    pub fn explored(&self) -> impl Iterator<Item = &Pose> + '_ {
        self.explored.iter()
    }
    pub fn world(&self) -> &'w GridWorld {
        self.world
    }
    pub fn solver(&self) -> &S {
        &self.solver
    }
}

//! Manual, caller-driven exploration of the search tree.
//!
//! [IncrementalExplorer] builds a tree one expansion at a time using the same expansion primitive
//! as the driver, but keeps no frontier, no explored set and performs no goal test. It is meant
//! for stepping through the state space by hand and for visualisation.

use log::debug;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::history::History;
use crate::node::{NodeId, SearchNode, SearchTree};
use crate::pose::{HeuristicKind, Pose};
use crate::world::GridWorld;

/// Counts over the live tree: inner nodes have been expanded, leaves are still open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplorerStats {
    pub explored: usize,
    pub frontier: usize,
}

pub struct IncrementalExplorer<'w> {
    world: &'w GridWorld,
    heuristic: HeuristicKind,
    tree: SearchTree,
    /// Children generated for each node, indexed by [NodeId]. Generated at most once per node.
    generated: Vec<SmallVec<[NodeId; 3]>>,
    /// Whether a node is currently expanded in the visible tree.
    expanded: Vec<bool>,
    root: NodeId,
    current: Vec<NodeId>,
}

impl<'w> IncrementalExplorer<'w> {
    /// Creates the tree and expands its root.
    pub fn new(
        world: &'w GridWorld,
        start: Pose,
        heuristic: HeuristicKind,
    ) -> Result<IncrementalExplorer<'w>> {
        if !world.in_bounds(start.x, start.y) {
            return Err(Error::OutOfBounds {
                x: start.x,
                y: start.y,
            });
        }
        let mut tree = SearchTree::new();
        let root = tree.insert(SearchNode::root(
            start,
            world,
            start.heuristic(&world.goal(), heuristic),
        ));
        let mut explorer = IncrementalExplorer {
            world,
            heuristic,
            tree,
            generated: Vec::new(),
            expanded: Vec::new(),
            root,
            current: vec![root],
        };
        explorer.expand(root)?;
        Ok(explorer)
    }

    /// Shows the children of `node`, replacing its previous subtree. Children are generated the
    /// first time a node is expanded and reused afterwards, so repeated expansion does not grow
    /// the tree.
    pub fn expand(&mut self, node: NodeId) -> Result<&[NodeId]> {
        if !self.tree.contains(node) {
            return Err(Error::UnknownNode(node));
        }
        let ix = node.index();
        if self.generated.get(ix).map_or(true, |c| c.is_empty()) {
            let goal = self.world.goal();
            let kind = self.heuristic;
            let generated = self
                .tree
                .expand(node, self.world, |p| p.heuristic(&goal, kind))?;
            self.generated.resize(self.tree.len(), SmallVec::new());
            self.expanded.resize(self.tree.len(), false);
            self.generated[ix] = generated;
        } else {
            self.collapse_below(node);
        }
        self.expanded[ix] = true;
        debug!(
            "Expanded {} into {} children",
            self.tree[node],
            self.generated[ix].len()
        );
        Ok(&self.generated[ix])
    }

    /// Hides every expanded descendant of `node`.
    fn collapse_below(&mut self, node: NodeId) {
        let mut stack: Vec<NodeId> = self.generated[node.index()].to_vec();
        while let Some(id) = stack.pop() {
            let ix = id.index();
            if self.expanded.get(ix).copied().unwrap_or(false) {
                self.expanded[ix] = false;
                stack.extend_from_slice(&self.generated[ix]);
            }
        }
    }

    /// Makes `node` the current point of playback and expands it.
    pub fn select(&mut self, node: NodeId) -> Result<&[NodeId]> {
        self.expand(node)?;
        self.current = self.tree.path_nodes(node);
        Ok(&self.current)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Children of `node` in the visible tree, empty unless it is expanded.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.expanded.get(node.index()) {
            Some(true) => &self.generated[node.index()],
            _ => &[],
        }
    }

    /// Path from the root to the selected node.
    pub fn current_path(&self) -> &[NodeId] {
        &self.current
    }

    pub fn current_pose(&self) -> Pose {
        self.current
            .last()
            .map(|&id| self.tree[id].pose())
            .unwrap_or_else(|| self.tree[self.root].pose())
    }

    /// The selected path as playback history.
    pub fn history(&self) -> Result<History> {
        let selected = self.current.last().copied().unwrap_or(self.root);
        History::from_path(&self.tree, selected)
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Walks the visible tree from the root. Subtrees collapsed by a re-expansion are not counted.
    pub fn stats(&self) -> ExplorerStats {
        let mut stats = ExplorerStats {
            explored: 0,
            frontier: 0,
        };
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            let children = self.children(node);
            if children.is_empty() {
                stats.frontier += 1;
            } else {
                stats.explored += 1;
                stack.extend_from_slice(children);
            }
        }
        stats
    }
}

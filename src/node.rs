//! Search nodes and the arena they live in.
//!
//! Nodes are created once and never mutated. Each node refers to its parent by [NodeId], so the
//! nodes generated during a run form a tree rooted at the start node without any reference
//! cycles. The arena keeps every generated node alive until it is dropped, which is what path
//! reconstruction and introspection rely on.

use core::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::pose::{Action, Pose};
use crate::world::GridWorld;

/// Handle to a node inside a [SearchTree].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode {
    pose: Pose,
    parent: Option<NodeId>,
    action: Option<Action>,
    g: u32,
    h: f64,
    depth: usize,
}

impl SearchNode {
    /// The root pays for the tile it starts on.
    pub fn root(pose: Pose, world: &GridWorld, h: f64) -> SearchNode {
        SearchNode {
            pose,
            parent: None,
            action: None,
            g: pose.cost(world),
            h,
            depth: 0,
        }
    }

    /// A child is charged the cost of the pose it ends up in, even when the action was a turn or
    /// a bump into a wall.
    pub fn child(
        parent_id: NodeId,
        parent: &SearchNode,
        action: Action,
        world: &GridWorld,
        h: f64,
    ) -> SearchNode {
        let pose = parent.pose.transition(action, world);
        SearchNode {
            pose,
            parent: Some(parent_id),
            action: Some(action),
            g: parent.g + pose.cost(world),
            h,
            depth: parent.depth + 1,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
    pub fn action(&self) -> Option<Action> {
        self.action
    }
    /// Accumulated path cost.
    pub fn g(&self) -> u32 {
        self.g
    }
    /// Heuristic estimate to the goal.
    pub fn h(&self) -> f64 {
        self.h
    }
    pub fn f(&self) -> f64 {
        f64::from(self.g) + self.h
    }
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// Identity used for explored-set and frontier membership. Two distinct nodes with the same
    /// pose share a key.
    pub fn key(&self) -> Pose {
        self.pose
    }
}

impl fmt::Display for SearchNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.action {
            Some(action) => write!(f, "{} -> ", action.code())?,
            None => write!(f, "S -> ")?,
        }
        write!(
            f,
            "{},{} (g: {}, h: {}, f: {})",
            self.pose.x,
            self.pose.y,
            self.g,
            self.h,
            self.f()
        )
    }
}

/// Arena owning every node generated during one run.
#[derive(Clone, Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> SearchTree {
        SearchTree::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(ix, n)| (NodeId(ix), n))
    }

    /// Generates one child per action of the node's pose and adds them to the arena. This is the
    /// single expansion primitive shared by the driver and the explorer. Fails with
    /// [Error::UnknownNode] if `id` does not belong to this tree.
    pub fn expand<FH>(
        &mut self,
        id: NodeId,
        world: &GridWorld,
        mut heuristic: FH,
    ) -> Result<SmallVec<[NodeId; 3]>>
    where
        FH: FnMut(&Pose) -> f64,
    {
        let parent = self.get(id).ok_or(Error::UnknownNode(id))?.clone();
        Ok(parent
            .pose
            .actions()
            .into_iter()
            .map(|action| {
                let next = parent.pose.transition(action, world);
                let h = heuristic(&next);
                self.insert(SearchNode::child(id, &parent, action, world, h))
            })
            .collect())
    }

    /// Nodes from the root to `id`, both inclusive. Empty if `id` does not belong to this tree.
    pub fn path_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = itertools::unfold(Some(id), |next| {
            let current = (*next)?;
            *next = self.get(current)?.parent;
            Some(current)
        })
        .collect();
        path.reverse();
        path
    }

    /// Actions leading from the root to `id`. The root's own missing action is not included.
    pub fn path_actions(&self, id: NodeId) -> Vec<Action> {
        self.path_nodes(id)
            .into_iter()
            .filter_map(|n| self.nodes[n.0].action)
            .collect()
    }
}

/// Panics on an id from another tree, like slice indexing; [SearchTree::get] is the checked
/// form.
impl Index<NodeId> for SearchTree {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Orientation;
    use crate::REFERENCE_MAP;

    #[test]
    fn root_pays_for_its_tile() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        // (1,2) is mud.
        let root = SearchNode::root(Pose::new(1, 2, Orientation::North), &world, 3.0);
        assert_eq!(root.g(), 4);
        assert_eq!(root.f(), 7.0);
        assert_eq!(root.parent(), None);
        assert_eq!(root.action(), None);
    }

    #[test]
    fn children_accumulate_cost_of_resulting_pose() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let mut tree = SearchTree::new();
        let root = tree.insert(SearchNode::root(
            Pose::new(1, 1, Orientation::South),
            &world,
            0.0,
        ));
        let children = tree.expand(root, &world, |_| 0.0).unwrap();
        assert_eq!(children.len(), 3);
        let forward = &tree[children[0]];
        assert_eq!(forward.pose(), Pose::new(1, 2, Orientation::South));
        assert_eq!(forward.g(), 1 + 4);
        let left = &tree[children[1]];
        assert_eq!(left.pose(), Pose::new(1, 1, Orientation::East));
        assert_eq!(left.g(), 2);
        for &child in &children {
            assert_eq!(tree[child].parent(), Some(root));
            assert_eq!(tree[child].depth(), 1);
        }
    }

    #[test]
    fn bump_still_costs() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let mut tree = SearchTree::new();
        let root = tree.insert(SearchNode::root(
            Pose::new(1, 1, Orientation::North),
            &world,
            0.0,
        ));
        let children = tree.expand(root, &world, |_| 0.0).unwrap();
        let bumped = &tree[children[0]];
        assert_eq!(bumped.pose(), tree[root].pose());
        assert_eq!(bumped.g(), tree[root].g() + 1);
        assert_eq!(bumped.key(), tree[root].key());
    }

    #[test]
    fn path_reconstruction() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let mut tree = SearchTree::new();
        let root = tree.insert(SearchNode::root(
            Pose::new(1, 1, Orientation::South),
            &world,
            0.0,
        ));
        let first = tree.expand(root, &world, |_| 0.0).unwrap();
        let second = tree.expand(first[1], &world, |_| 0.0).unwrap();
        let leaf = second[0];
        assert_eq!(tree.path_nodes(leaf), vec![root, first[1], leaf]);
        assert_eq!(
            tree.path_actions(leaf),
            vec![Action::TurnLeft, Action::Forward]
        );
        assert_eq!(tree.path_nodes(root), vec![root]);
        assert!(tree.path_actions(root).is_empty());
        assert_eq!(tree[leaf].pose(), Pose::new(2, 1, Orientation::East));
    }

    #[test]
    fn foreign_ids_are_rejected() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let mut tree = SearchTree::new();
        let root = tree.insert(SearchNode::root(
            Pose::new(1, 1, Orientation::South),
            &world,
            0.0,
        ));
        let mut other = tree.clone();
        let foreign = other.expand(root, &world, |_| 0.0).unwrap()[2];
        assert_eq!(
            tree.expand(foreign, &world, |_| 0.0),
            Err(Error::UnknownNode(foreign))
        );
        assert_eq!(tree.len(), 1);
        assert!(tree.get(foreign).is_none());
        assert!(tree.path_nodes(foreign).is_empty());
        assert!(tree.path_actions(foreign).is_empty());
    }
}

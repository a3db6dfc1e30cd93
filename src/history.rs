use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::node::{NodeId, SearchTree};
use crate::pose::{Action, Pose};
use crate::world::GridWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub pose: Pose,
    /// [None] for the starting entry.
    pub action: Option<Action>,
    /// Cost charged on arriving at this entry.
    pub cost: u32,
}

/// The agent's recorded trajectory for step-by-step playback. Never empty: the first entry is
/// the start. Serialized as the plain entry list; deserializing an empty list fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl TryFrom<Vec<HistoryEntry>> for History {
    type Error = Error;

    fn try_from(entries: Vec<HistoryEntry>) -> Result<History> {
        if entries.is_empty() {
            return Err(Error::EmptyHistory);
        }
        Ok(History { entries })
    }
}

impl From<History> for Vec<HistoryEntry> {
    fn from(history: History) -> Vec<HistoryEntry> {
        history.entries
    }
}

impl History {
    pub fn new(start: Pose, world: &GridWorld) -> History {
        History {
            entries: vec![HistoryEntry {
                pose: start,
                action: None,
                cost: start.cost(world),
            }],
        }
    }

    /// Records the path from the root of `tree` to `node`.
    pub fn from_path(tree: &SearchTree, node: NodeId) -> Result<History> {
        let mut previous_g = 0;
        let entries: Vec<HistoryEntry> = tree
            .path_nodes(node)
            .into_iter()
            .filter_map(|id| tree.get(id))
            .map(|n| {
                let entry = HistoryEntry {
                    pose: n.pose(),
                    action: n.action(),
                    cost: n.g() - previous_g,
                };
                previous_g = n.g();
                entry
            })
            .collect();
        if entries.is_empty() {
            return Err(Error::UnknownNode(node));
        }
        Ok(History { entries })
    }

    /// Moves the agent manually and records the result.
    pub fn apply(&mut self, action: Action, world: &GridWorld) -> Pose {
        let pose = self.current().transition(action, world);
        self.entries.push(HistoryEntry {
            pose,
            action: Some(action),
            cost: pose.cost(world),
        });
        pose
    }

    /// Rewinds to entry `index`, discarding everything recorded after it.
    pub fn reset_to(&mut self, index: usize) -> Result<Pose> {
        if index >= self.entries.len() {
            return Err(Error::HistoryIndex {
                index,
                len: self.entries.len(),
            });
        }
        self.entries.truncate(index + 1);
        Ok(self.current())
    }

    pub fn current(&self) -> Pose {
        self.entries[self.entries.len() - 1].pose
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn actions(&self) -> Vec<Action> {
        self.entries.iter().filter_map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_cost(&self) -> u32 {
        self.entries.iter().map(|e| e.cost).sum()
    }

    /// Cost summed over forward moves only.
    pub fn forward_energy(&self) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.action == Some(Action::Forward))
            .map(|e| e.cost)
            .sum()
    }

    pub fn reached_goal(&self, world: &GridWorld) -> bool {
        self.current().is_goal(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::SearchDriver;
    use crate::node::SearchNode;
    use crate::pose::Orientation;
    use crate::solver::uniform_cost::UniformCostSolver;
    use crate::REFERENCE_MAP;

    #[test]
    fn manual_playback_and_reset() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let start = Pose::new(1, 1, Orientation::South);
        let mut history = History::new(start, &world);
        history.apply(Action::Forward, &world);
        history.apply(Action::TurnLeft, &world);
        history.apply(Action::Forward, &world);
        assert_eq!(history.len(), 4);
        assert_eq!(history.current(), Pose::new(2, 2, Orientation::East));
        // dirt, mud, mud (turn), grass
        assert_eq!(history.total_cost(), 1 + 4 + 4 + 2);
        assert_eq!(history.forward_energy(), 4 + 2);

        assert_eq!(
            history.reset_to(1).unwrap(),
            Pose::new(1, 2, Orientation::South)
        );
        assert_eq!(history.len(), 2);
        assert_eq!(history.actions(), vec![Action::Forward]);
        assert_eq!(
            history.reset_to(5),
            Err(Error::HistoryIndex { index: 5, len: 2 })
        );
        assert_eq!(history.reset_to(0).unwrap(), start);
    }

    #[test]
    fn recorded_search_path_matches_goal_cost() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let start = Pose::new(1, 1, Orientation::South);
        let mut driver = SearchDriver::new(&world, UniformCostSolver, start).unwrap();
        let goal = driver.solve().unwrap();
        let history = History::from_path(driver.tree(), goal).unwrap();
        assert_eq!(history.entries()[0].pose, start);
        assert_eq!(history.total_cost(), driver.tree()[goal].g());
        assert!(history.reached_goal(&world));
        assert_eq!(history.actions(), driver.tree().path_actions(goal));
    }

    #[test]
    fn empty_history_does_not_deserialize() {
        let err = serde_json::from_str::<History>("[]").unwrap_err();
        assert!(err.to_string().contains("starting entry"));

        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let mut history = History::new(Pose::new(1, 1, Orientation::South), &world);
        history.apply(Action::Forward, &world);
        let json = serde_json::to_string(&history).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
        assert_eq!(back.current(), Pose::new(1, 2, Orientation::South));
    }

    #[test]
    fn foreign_node_has_no_history() {
        let world = GridWorld::parse(REFERENCE_MAP).unwrap();
        let mut tree = SearchTree::new();
        let root = tree.insert(SearchNode::root(
            Pose::new(1, 1, Orientation::South),
            &world,
            0.0,
        ));
        let mut other = tree.clone();
        let foreign = other.expand(root, &world, |_| 0.0).unwrap()[0];
        assert_eq!(
            History::from_path(&tree, foreign),
            Err(Error::UnknownNode(foreign))
        );
    }
}

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::trace;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::pose::Pose;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub type Priority = OrderedFloat<f64>;

struct SmallestPriorityHolder {
    priority: Priority,
    seq: u64,
    pose: Pose,
}

impl Eq for SmallestPriorityHolder {}

impl PartialEq for SmallestPriorityHolder {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.seq.eq(&other.seq)
    }
}

impl PartialOrd for SmallestPriorityHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestPriorityHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest priority first, then first inserted first served
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// The live entry for a pose: which node represents it and at what priority.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    node: NodeId,
    priority: Priority,
    seq: u64,
}

/// Priority queue of pending nodes, deduplicated by [Pose].
///
/// Each pose has at most one live entry, tracked in an index map. Replacing an entry pushes a
/// fresh heap item and leaves the old one behind; [Frontier::pop_min] discards heap items that no
/// longer match the live entry of their pose, so the heap order is never stale.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<SmallestPriorityHolder>,
    live: FxIndexMap<Pose, Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Inserts a node at the given priority. Equal priorities are served in insertion order. If
    /// the pose already has an entry it is superseded.
    pub fn push(&mut self, node: NodeId, pose: Pose, priority: f64) {
        let priority = OrderedFloat(priority);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(
            pose,
            Entry {
                node,
                priority,
                seq,
            },
        );
        self.heap.push(SmallestPriorityHolder {
            priority,
            seq,
            pose,
        });
    }

    /// Removes and returns the entry with the lowest priority.
    pub fn pop_min(&mut self) -> Result<(NodeId, f64)> {
        while let Some(SmallestPriorityHolder { seq, pose, .. }) = self.heap.pop() {
            if self.live.get(&pose).map(|e| e.seq) != Some(seq) {
                trace!("Discarding superseded frontier item for {}", pose);
                continue;
            }
            if let Some(entry) = self.live.swap_remove(&pose) {
                return Ok((entry.node, entry.priority.into_inner()));
            }
        }
        Err(Error::FrontierEmpty)
    }

    /// True if any entry shares the pose, regardless of the path that reached it.
    pub fn contains_pose(&self, pose: &Pose) -> bool {
        self.live.contains_key(pose)
    }

    /// Replaces the entry for `pose` if `priority` is strictly lower than the stored one.
    /// Returns whether a replacement happened.
    pub fn replace_if_better(&mut self, node: NodeId, pose: Pose, priority: f64) -> bool {
        match self.live.get(&pose).copied() {
            Some(entry) if OrderedFloat(priority) < entry.priority => {
                trace!(
                    "Replacing frontier entry for {}: {} -> {}",
                    pose,
                    entry.priority,
                    priority
                );
                self.push(node, pose, priority);
                true
            }
            _ => false,
        }
    }

    /// Priority currently stored for a pose.
    pub fn priority_of(&self, pose: &Pose) -> Option<f64> {
        self.live.get(pose).map(|e| e.priority.into_inner())
    }

    /// Node currently representing a pose.
    pub fn node_for(&self, pose: &Pose) -> Option<NodeId> {
        self.live.get(pose).map(|e| e.node)
    }

    /// Live entries, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.live
            .values()
            .map(|e| (e.node, e.priority.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

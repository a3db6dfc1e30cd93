use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tile::BLOCKED_COST;
use crate::world::{GridWorld, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// Quarter turn counter-clockwise: N -> W -> S -> E -> N.
    pub fn left(self) -> Orientation {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }
    /// Quarter turn clockwise: N -> E -> S -> W -> N.
    pub fn right(self) -> Orientation {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }
    /// Unit step in the facing direction, with `y` growing southwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Orientation::North => (0, -1),
            Orientation::East => (1, 0),
            Orientation::South => (0, 1),
            Orientation::West => (-1, 0),
        }
    }
    pub fn code(self) -> char {
        match self {
            Orientation::North => 'N',
            Orientation::East => 'E',
            Orientation::South => 'S',
            Orientation::West => 'W',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Orientation, String> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Orientation::North),
            "e" | "east" => Ok(Orientation::East),
            "s" | "south" => Ok(Orientation::South),
            "w" | "west" => Ok(Orientation::West),
            other => Err(format!("unknown orientation {other:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Forward,
    TurnLeft,
    TurnRight,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Forward, Action::TurnLeft, Action::TurnRight];

    pub fn code(self) -> char {
        match self {
            Action::Forward => 'f',
            Action::TurnLeft => 'l',
            Action::TurnRight => 'r',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Forward => write!(f, "Move"),
            Action::TurnLeft => write!(f, "Turn Left"),
            Action::TurnRight => write!(f, "Turn Right"),
        }
    }
}

/// Distance estimate towards the goal. Both kinds assume unit step cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Euclidean,
}

impl HeuristicKind {
    pub fn estimate(self, from: &Point, to: &Point) -> f64 {
        match self {
            HeuristicKind::Manhattan => f64::from(from.manhattan_distance(to)),
            HeuristicKind::Euclidean => from.euclidean_distance(to),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<HeuristicKind, String> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "euclidean" => Ok(HeuristicKind::Euclidean),
            other => Err(format!("unknown heuristic {other:?}")),
        }
    }
}

/// The agent's state: a cell and the direction it is facing. Equality is structural, so a
/// [Pose] doubles as the key for explored-set and frontier membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pose {
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
}

impl Pose {
    pub const fn new(x: i32, y: i32, orientation: Orientation) -> Pose {
        Pose { x, y, orientation }
    }
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Every pose offers the same three actions.
    pub fn actions(&self) -> [Action; 3] {
        Action::ALL
    }

    /// Applies an action. Turning never moves the agent; moving into a cell that is not walkable
    /// (including anything outside the grid) leaves the pose unchanged.
    pub fn transition(&self, action: Action, world: &GridWorld) -> Pose {
        match action {
            Action::TurnLeft => Pose::new(self.x, self.y, self.orientation.left()),
            Action::TurnRight => Pose::new(self.x, self.y, self.orientation.right()),
            Action::Forward => {
                let (dx, dy) = self.orientation.delta();
                let (x, y) = (self.x + dx, self.y + dy);
                if world.is_walkable(x, y) {
                    Pose::new(x, y, self.orientation)
                } else {
                    *self
                }
            }
        }
    }

    /// Cost of standing on the current cell, charged for every action that results in this pose.
    pub fn cost(&self, world: &GridWorld) -> u32 {
        world
            .cost_of(self.x, self.y)
            .unwrap_or(BLOCKED_COST)
    }

    pub fn heuristic(&self, goal: &Point, kind: HeuristicKind) -> f64 {
        kind.estimate(&self.position(), goal)
    }

    pub fn is_goal(&self, world: &GridWorld) -> bool {
        self.position() == world.goal()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(({},{}), {})", self.x, self.y, self.orientation)
    }
}

/// Replays a sequence of actions from a start pose, returning every visited pose including the
/// start.
pub fn replay(start: Pose, actions: &[Action], world: &GridWorld) -> Vec<Pose> {
    let mut poses = Vec::with_capacity(actions.len() + 1);
    poses.push(start);
    let mut current = start;
    for action in actions {
        current = current.transition(*action, world);
        poses.push(current);
    }
    poses
}

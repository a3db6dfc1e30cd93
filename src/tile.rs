use core::fmt;
use serde::{Deserialize, Serialize};

/// Cost reported for tiles the agent can never enter. It is never charged during search.
pub const BLOCKED_COST: u32 = 10_000;

/// Terrain of a single grid cell. The first four variants are walkable, the rest block movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    Dirt,
    Mud,
    Grass,
    End,
    Rock,
    Tree,
    Water,
    Brick,
}

impl Tile {
    pub const ALL: [Tile; 8] = [
        Tile::Dirt,
        Tile::Mud,
        Tile::Grass,
        Tile::End,
        Tile::Rock,
        Tile::Tree,
        Tile::Water,
        Tile::Brick,
    ];

    /// Parses a single map character. Digits are the border labels of the reference layout
    /// and are read as [Tile::Brick].
    pub fn from_code(code: char) -> Option<Tile> {
        match code {
            'd' => Some(Tile::Dirt),
            'm' => Some(Tile::Mud),
            'g' => Some(Tile::Grass),
            'e' => Some(Tile::End),
            'r' => Some(Tile::Rock),
            't' => Some(Tile::Tree),
            'w' => Some(Tile::Water),
            'b' => Some(Tile::Brick),
            c if c.is_ascii_digit() => Some(Tile::Brick),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Tile::Dirt => 'd',
            Tile::Mud => 'm',
            Tile::Grass => 'g',
            Tile::End => 'e',
            Tile::Rock => 'r',
            Tile::Tree => 't',
            Tile::Water => 'w',
            Tile::Brick => 'b',
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Dirt | Tile::Mud | Tile::Grass | Tile::End)
    }

    /// Traversal cost charged for standing on this tile.
    pub fn cost(self) -> u32 {
        match self {
            Tile::Dirt | Tile::End => 1,
            Tile::Grass => 2,
            Tile::Mud => 4,
            Tile::Rock | Tile::Tree | Tile::Water | Tile::Brick => BLOCKED_COST,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

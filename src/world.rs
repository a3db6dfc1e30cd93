use core::fmt;
use std::str::FromStr;

use log::{debug, info};
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};

use crate::error::{Error, MapDefect, Result};
use crate::tile::Tile;

/// A cell coordinate. `x` indexes columns and `y` indexes rows, with `y` growing downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
    pub fn euclidean_distance(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
    /// The four orthogonal neighbours, in north, east, south, west order.
    pub fn neumann_neighborhood(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y - 1),
            Point::new(self.x + 1, self.y),
            Point::new(self.x, self.y + 1),
            Point::new(self.x - 1, self.y),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// [GridWorld] is the immutable terrain the agent moves on: a row-major matrix of [Tile]s with
/// exactly one goal tile. Walkable cells are grouped into 4-connected components using a
/// [UnionFind] structure so reachability questions can be answered without searching.
#[derive(Clone, Debug)]
pub struct GridWorld {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
    goal: Point,
    components: UnionFind<usize>,
}

impl GridWorld {
    /// Builds a world from rows of tiles. Fails if the rows are ragged or the map does not have
    /// exactly one [Tile::End].
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<GridWorld> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapDefect::Empty.into());
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(MapDefect::RaggedRows {
                row,
                expected: width,
                found,
            }
            .into());
        }
        let tiles: Vec<Tile> = rows.into_iter().flatten().collect();
        let goals: Vec<usize> = tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Tile::End)
            .map(|(ix, _)| ix)
            .collect();
        let goal_ix = match goals.as_slice() {
            [] => return Err(MapDefect::NoGoal.into()),
            [ix] => *ix,
            _ => return Err(MapDefect::MultipleGoals { count: goals.len() }.into()),
        };
        let goal = Point::new((goal_ix % width) as i32, (goal_ix / width) as i32);
        let mut world = GridWorld {
            tiles,
            width,
            height,
            goal,
            components: UnionFind::new(width * height),
        };
        world.generate_components();
        info!("Loaded {}x{} map with goal at {}", width, height, goal);
        Ok(world)
    }

    /// Parses a newline-delimited grid of single-character tile codes. Lines are trimmed and
    /// blank lines are skipped.
    pub fn parse(map_data: &str) -> Result<GridWorld> {
        let rows = map_data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, code)| {
                        Tile::from_code(code)
                            .ok_or(Error::from(MapDefect::UnknownTile { row, col, code }))
                    })
                    .collect::<Result<Vec<Tile>>>()
            })
            .collect::<Result<Vec<Vec<Tile>>>>()?;
        GridWorld::from_rows(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn goal(&self) -> Point {
        self.goal
    }
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
    fn get_ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }
    /// The tile at a point, or [None] outside the grid.
    pub fn get(&self, point: Point) -> Option<Tile> {
        if self.in_bounds(point.x, point.y) {
            Some(self.tiles[self.get_ix(point.x, point.y)])
        } else {
            None
        }
    }
    pub fn tile_at(&self, x: i32, y: i32) -> Result<Tile> {
        self.get(Point::new(x, y))
            .ok_or(Error::OutOfBounds { x, y })
    }
    /// Out-of-bounds coordinates are never walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(Point::new(x, y)).is_some_and(Tile::is_walkable)
    }
    pub fn cost_of(&self, x: i32, y: i32) -> Result<u32> {
        self.tile_at(x, y).map(Tile::cost)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.get(*point)
            .map(|_| self.components.find(self.get_ix(point.x, point.y)))
    }
    /// Checks if an agent standing on `start` can get to `goal`. Moves only check the cell being
    /// entered, so a start on a blocked tile counts as connected to each walkable neighbour.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.in_bounds(start.x, start.y) {
            return false;
        }
        if start == goal {
            return true;
        }
        if !self.is_walkable(goal.x, goal.y) {
            return false;
        }
        let goal_ix = self.get_ix(goal.x, goal.y);
        if self.is_walkable(start.x, start.y) {
            return self
                .components
                .equiv(self.get_ix(start.x, start.y), goal_ix);
        }
        start
            .neumann_neighborhood()
            .iter()
            .filter(|p| self.is_walkable(p.x, p.y))
            .any(|p| self.components.equiv(self.get_ix(p.x, p.y), goal_ix))
    }

    /// Links up walkable orthogonal neighbours into the same components.
    fn generate_components(&mut self) {
        debug!("Generating connected components");
        let mut components = UnionFind::new(self.width * self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if !self.is_walkable(x, y) {
                    continue;
                }
                let parent_ix = self.get_ix(x, y);
                // Only looking right and down is enough, the other two are covered by the neighbour.
                for p in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.is_walkable(p.x, p.y) {
                        components.union(parent_ix, self.get_ix(p.x, p.y));
                    }
                }
            }
        }
        self.components = components;
    }
}

impl FromStr for GridWorld {
    type Err = Error;

    fn from_str(s: &str) -> Result<GridWorld> {
        GridWorld::parse(s)
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.chunks(self.width) {
            let line: String = row.iter().map(|t| t.code()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

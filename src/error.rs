//! Error taxonomy of the search core.
//!
//! Map construction failures are fatal for a run; everything that can happen once a run has
//! started is an ordinary value the caller inspects.

use thiserror::Error;

use crate::node::NodeId;

/// What exactly is wrong with a map that failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapDefect {
    #[error("map contains no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, code: char },
    #[error("map has no goal tile")]
    NoGoal,
    #[error("map has {count} goal tiles, expected exactly one")]
    MultipleGoals { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("ill-formed map: {0}")]
    IllFormedMap(#[from] MapDefect),
    #[error("({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("frontier is empty")]
    FrontierEmpty,
    #[error("no path found")]
    NoPathFound,
    #[error("history index {index} is out of range for {len} entries")]
    HistoryIndex { index: usize, len: usize },
    #[error("a history needs at least its starting entry")]
    EmptyHistory,
    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),
}

impl Error {
    /// Expected outcomes the caller can react to, as opposed to construction or programming errors.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::FrontierEmpty | Error::NoPathFound | Error::HistoryIndex { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

mod cache;
mod collective;
mod entity;

pub use cache::InternCache;
pub use collective::CollectiveGridSpace;
pub use entity::EntityGridSpace;

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::Position;

/// Cells with a weight at or above this value are impassable.
pub const IMPASSABLE_WEIGHT: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Neighborhood {
    /// Up, down, left, right.
    #[default]
    VonNeumann,
    /// Von Neumann plus the four diagonals.
    Moore,
}

/// Per-entity distance between two cells in a grid distance type.
///
/// The estimate must not exceed the cheapest move sequence, where one step
/// costs the distance between its two cells.
pub trait GridDistance: Sized {
    fn between(from: &Position, to: &Position, neighborhood: Neighborhood) -> Self;
}

impl GridDistance for f64 {
    fn between(from: &Position, to: &Position, _neighborhood: Neighborhood) -> Self {
        from.euclidean(to)
    }
}

impl GridDistance for i64 {
    // A diagonal step truncates to 1, so under Moore the true cost is the
    // Chebyshev distance, which the truncated Euclidean length can exceed.
    fn between(from: &Position, to: &Position, neighborhood: Neighborhood) -> Self {
        match neighborhood {
            Neighborhood::VonNeumann => from.euclidean(to) as i64,
            Neighborhood::Moore => from.row.abs_diff(to.row).max(from.col.abs_diff(to.col)) as i64,
        }
    }
}

/// Static per-cell obstacle weights of a rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleGrid {
    rows: usize,
    cols: usize,
    weights: Vec<i32>,
}

impl ObstacleGrid {
    pub fn from_weights(weights: Vec<Vec<i32>>) -> Result<Self> {
        ensure!(!weights.is_empty(), "obstacle grid has no rows");
        let cols = weights[0].len();
        ensure!(cols > 0, "obstacle grid has no columns");
        for (row, cells) in weights.iter().enumerate() {
            ensure!(
                cells.len() == cols,
                "obstacle grid is not rectangular, row {row} has {} cells, expected {cols}",
                cells.len()
            );
        }

        Ok(ObstacleGrid {
            rows: weights.len(),
            cols,
            weights: weights.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub fn weight(&self, position: Position) -> Option<i32> {
        self.in_bounds(position)
            .then(|| self.weights[position.row * self.cols + position.col])
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.weight(position)
            .is_some_and(|weight| weight < IMPASSABLE_WEIGHT)
    }

    /// Passable in-bounds cells reachable from `position` in one move,
    /// optionally preceded by `position` itself.
    pub fn adjacent_cells(
        &self,
        position: Position,
        neighborhood: Neighborhood,
        include_stay: bool,
    ) -> Vec<Position> {
        let capacity = match neighborhood {
            Neighborhood::VonNeumann => 5,
            Neighborhood::Moore => 9,
        };
        let mut cells = Vec::with_capacity(capacity);
        let Position { row, col } = position;

        let mut add = |cell: Position| {
            if self.is_passable(cell) {
                cells.push(cell);
            }
        };

        if include_stay {
            add(position);
        }
        if col > 0 {
            add(Position::new(row, col - 1));
        }
        if col + 1 < self.cols {
            add(Position::new(row, col + 1));
        }
        if row > 0 {
            add(Position::new(row - 1, col));
            if neighborhood == Neighborhood::Moore {
                if col > 0 {
                    add(Position::new(row - 1, col - 1));
                }
                if col + 1 < self.cols {
                    add(Position::new(row - 1, col + 1));
                }
            }
        }
        if row + 1 < self.rows {
            add(Position::new(row + 1, col));
            if neighborhood == Neighborhood::Moore {
                if col > 0 {
                    add(Position::new(row + 1, col - 1));
                }
                if col + 1 < self.cols {
                    add(Position::new(row + 1, col + 1));
                }
            }
        }

        cells
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.weights.chunks(self.cols) {
            writeln!(f, "{row:?}")?;
        }
        Ok(())
    }
}

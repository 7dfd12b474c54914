use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Cell coordinate of a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn euclidean(&self, other: &Position) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

impl From<[usize; 2]> for Position {
    fn from([row, col]: [usize; 2]) -> Self {
        Position { row, col }
    }
}

impl From<Position> for [usize; 2] {
    fn from(position: Position) -> Self {
        [position.row, position.col]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Joint configuration of all entities at one time step.
///
/// The positions are shared behind an `Rc`, so cloning is cheap and two
/// states handed out by the same intern cache compare by pointer first.
#[derive(Clone, Serialize)]
pub struct CollectiveState(Rc<[Position]>);

impl CollectiveState {
    pub fn new(positions: &[Position]) -> Self {
        CollectiveState(Rc::from(positions))
    }

    /// Builds a state from flat `row, col, row, col, ...` coordinates.
    pub fn from_coordinates(coordinates: &[usize]) -> Result<Self> {
        ensure!(
            coordinates.len() % 2 == 0,
            "invalid state size, coordinates must come in (row, col) pairs, got {}",
            coordinates.len()
        );
        let positions: Vec<Position> = coordinates
            .chunks_exact(2)
            .map(|pair| Position::new(pair[0], pair[1]))
            .collect();
        Ok(CollectiveState::new(&positions))
    }

    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ptr_eq(&self, other: &CollectiveState) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for CollectiveState {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for CollectiveState {}

impl Hash for CollectiveState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for CollectiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl From<Vec<Position>> for CollectiveState {
    fn from(positions: Vec<Position>) -> Self {
        CollectiveState(Rc::from(positions))
    }
}

/// Ordered states from start to goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path<S> {
    states: Vec<S>,
}

impl<S> Path<S> {
    pub fn from_states(states: Vec<S>) -> Self {
        Path { states }
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> Option<&S> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&S> {
        self.states.last()
    }
}

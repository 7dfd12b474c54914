use anyhow::{bail, ensure, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::iter::Sum;
use tracing::trace;

use super::cache::{InternCache, MoveCheck};
use super::{GridDistance, Neighborhood, ObstacleGrid};
use crate::common::{CollectiveState, Position};
use crate::space::{HeuristicSpace, StateSpace};

/// Joint state space of several entities moving in lockstep on one grid.
///
/// Each step every entity either stays or moves to an adjacent passable cell.
/// A joint move is only a neighbor when no two entities end on the same cell,
/// swap cells, or cross diagonally through the same 2x2 block.
///
/// The intern cache sits behind a `RefCell`, so a space must not be shared
/// between threads.
#[derive(Debug)]
pub struct CollectiveGridSpace {
    grid: ObstacleGrid,
    neighborhood: Neighborhood,
    intern: RefCell<InternCache>,
}

impl CollectiveGridSpace {
    pub fn new(grid: ObstacleGrid, neighborhood: Neighborhood) -> Self {
        let capacity = grid.rows().max(grid.cols());
        CollectiveGridSpace {
            grid,
            neighborhood,
            intern: RefCell::new(InternCache::new(capacity)),
        }
    }

    pub fn grid(&self) -> &ObstacleGrid {
        &self.grid
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Interned hit and miss counts so far.
    pub fn cache_stats(&self) -> (usize, usize) {
        let cache = self.intern.borrow();
        (cache.hits(), cache.misses())
    }

    /// Builds a validated, interned state from per-entity positions.
    pub fn collective_state(&self, positions: &[Position]) -> Result<CollectiveState> {
        ensure!(!positions.is_empty(), "collective state needs at least one entity");
        let mut seen = HashSet::with_capacity(positions.len());
        for (entity, position) in positions.iter().enumerate() {
            if !self.grid.is_passable(*position) {
                bail!("entity {entity} at {position} is outside the grid or blocked");
            }
            if !seen.insert(*position) {
                bail!("entity {entity} shares cell {position} with another entity");
            }
        }
        Ok(self.intern.borrow_mut().get(positions))
    }

    pub fn is_valid_state(&self, state: &CollectiveState) -> bool {
        let mut seen = HashSet::with_capacity(state.len());
        state
            .positions()
            .iter()
            .all(|position| self.grid.is_passable(*position) && seen.insert(*position))
    }

    fn candidate_moves(&self, state: &CollectiveState) -> Vec<Vec<Position>> {
        state
            .positions()
            .iter()
            .map(|position| self.grid.adjacent_cells(*position, self.neighborhood, true))
            .collect()
    }
}

impl StateSpace for CollectiveGridSpace {
    type State = CollectiveState;

    /// Enumerates the joint moves odometer style, one entity digit at a time.
    /// Each placement is checked against the entities already placed, so a
    /// colliding prefix is skipped together with every combination under it.
    fn neighbors_of(&self, state: &CollectiveState) -> Vec<CollectiveState> {
        let source = state.positions();
        let entities = source.len();
        let mut neighbors = Vec::new();
        if entities == 0 {
            return neighbors;
        }

        let candidates = self.candidate_moves(state);
        let mut check = MoveCheck::new(source);
        let mut combination = source.to_vec();
        let mut cursor = vec![0usize; entities];
        let mut intern = self.intern.borrow_mut();
        let mut depth = 0;

        loop {
            if let Some(&to) = candidates[depth].get(cursor[depth]) {
                if !check.try_place(depth, to) {
                    cursor[depth] += 1;
                    continue;
                }
                combination[depth] = to;
                if depth + 1 < entities {
                    depth += 1;
                    cursor[depth] = 0;
                } else {
                    neighbors.push(intern.get(&combination));
                    check.release(depth);
                    cursor[depth] += 1;
                }
            } else {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                check.release(depth);
                cursor[depth] += 1;
            }
        }

        trace!("{} neighbors of {state:?}", neighbors.len());
        neighbors
    }

    fn validate(&self, start: &CollectiveState, goal: &CollectiveState) -> Result<()> {
        ensure!(!start.is_empty(), "collective state needs at least one entity");
        ensure!(
            start.len() == goal.len(),
            "start has {} entities but goal has {}",
            start.len(),
            goal.len()
        );
        ensure!(self.is_valid_state(start), "invalid start state {start:?}");
        ensure!(self.is_valid_state(goal), "invalid goal state {goal:?}");
        Ok(())
    }
}

impl<D: GridDistance + Sum> HeuristicSpace<D> for CollectiveGridSpace {
    /// Sum of per-entity grid distances, pairing entities by index.
    fn heuristic_distance(&self, from: &CollectiveState, to: &CollectiveState) -> D {
        from.positions()
            .iter()
            .zip(to.positions())
            .map(|(a, b)| D::between(a, b, self.neighborhood))
            .sum()
    }
}

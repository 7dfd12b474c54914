use anyhow::{ensure, Result};

use super::{GridDistance, Neighborhood, ObstacleGrid};
use crate::common::Position;
use crate::space::{HeuristicSpace, StateSpace};

/// State space of a single entity moving on an obstacle grid.
#[derive(Debug, Clone)]
pub struct EntityGridSpace {
    grid: ObstacleGrid,
    neighborhood: Neighborhood,
}

impl EntityGridSpace {
    pub fn new(grid: ObstacleGrid, neighborhood: Neighborhood) -> Self {
        EntityGridSpace { grid, neighborhood }
    }

    pub fn grid(&self) -> &ObstacleGrid {
        &self.grid
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }
}

impl StateSpace for EntityGridSpace {
    type State = Position;

    fn neighbors_of(&self, state: &Position) -> Vec<Position> {
        self.grid.adjacent_cells(*state, self.neighborhood, false)
    }

    fn validate(&self, start: &Position, goal: &Position) -> Result<()> {
        for position in [start, goal] {
            ensure!(
                self.grid.is_passable(*position),
                "position {position} is outside the grid or blocked"
            );
        }
        Ok(())
    }
}

impl<D: GridDistance> HeuristicSpace<D> for EntityGridSpace {
    fn heuristic_distance(&self, from: &Position, to: &Position) -> D {
        D::between(from, to, self.neighborhood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_skip_blocked_cells() {
        let grid = ObstacleGrid::from_weights(vec![vec![0, 10], vec![0, 0]]).unwrap();
        let space = EntityGridSpace::new(grid, Neighborhood::Moore);

        let neighbors = space.neighbors_of(&Position::new(0, 0));
        assert_eq!(neighbors, vec![Position::new(1, 0), Position::new(1, 1)]);
    }

    #[test]
    fn test_heuristic_is_euclidean() {
        let grid = ObstacleGrid::from_weights(vec![vec![0; 5]; 5]).unwrap();
        let space = EntityGridSpace::new(grid, Neighborhood::VonNeumann);
        let (a, b) = (Position::new(0, 0), Position::new(3, 4));

        let float: f64 = space.heuristic_distance(&a, &b);
        let integer: i64 = space.heuristic_distance(&a, &b);
        assert_eq!(float, 5.0);
        assert_eq!(integer, 5);
    }

    #[test]
    fn test_validate_rejects_blocked_endpoints() {
        let grid = ObstacleGrid::from_weights(vec![vec![0, 10]]).unwrap();
        let space = EntityGridSpace::new(grid, Neighborhood::VonNeumann);

        assert!(space.validate(&Position::new(0, 0), &Position::new(0, 0)).is_ok());
        assert!(space.validate(&Position::new(0, 0), &Position::new(0, 1)).is_err());
        assert!(space.validate(&Position::new(3, 0), &Position::new(0, 0)).is_err());
    }
}

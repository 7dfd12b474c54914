use anyhow::{ensure, Result};
use rand::prelude::*;
use tracing::info;

use crate::common::Position;
use crate::grid::ObstacleGrid;

/// Start and goal cells, one pair per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub starts: Vec<Position>,
    pub goals: Vec<Position>,
}

impl Scenario {
    pub fn new(starts: Vec<Position>, goals: Vec<Position>) -> Result<Self> {
        ensure!(
            starts.len() == goals.len(),
            "got {} starts but {} goals",
            starts.len(),
            goals.len()
        );
        Ok(Scenario { starts, goals })
    }

    /// Picks distinct free start cells and distinct free goal cells.
    pub fn generate_randomly<R: Rng + ?Sized>(
        grid: &ObstacleGrid,
        num_agents: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut free: Vec<Position> = (0..grid.rows())
            .flat_map(|row| (0..grid.cols()).map(move |col| Position::new(row, col)))
            .filter(|position| grid.is_passable(*position))
            .collect();
        ensure!(
            free.len() >= num_agents,
            "not enough free cells ({}) for {num_agents} agents",
            free.len()
        );

        free.shuffle(rng);
        let starts = free[..num_agents].to_vec();
        free.shuffle(rng);
        let goals = free[..num_agents].to_vec();

        info!("Generate scen: starts {starts:?}, goals {goals:?}");
        Ok(Scenario { starts, goals })
    }

    pub fn num_agents(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_randomly() {
        let mut weights = vec![vec![0; 4]; 4];
        weights[1][1] = 10;
        weights[2][2] = 10;
        let grid = ObstacleGrid::from_weights(weights).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let scen = Scenario::generate_randomly(&grid, 3, &mut rng).unwrap();
        assert_eq!(scen.num_agents(), 3);
        for cells in [&scen.starts, &scen.goals] {
            let unique: HashSet<_> = cells.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(cells.iter().all(|p| grid.is_passable(*p)));
        }

        let mut again = StdRng::seed_from_u64(0);
        assert_eq!(Scenario::generate_randomly(&grid, 3, &mut again).unwrap(), scen);
    }

    #[test]
    fn test_too_many_agents() {
        let grid = ObstacleGrid::from_weights(vec![vec![0, 10]]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Scenario::generate_randomly(&grid, 2, &mut rng).is_err());
        assert!(Scenario::new(vec![Position::new(0, 0)], vec![]).is_err());
    }
}

use crate::common::{NumberHandler, Path};
use crate::space::HeuristicSpace;

/// Sums the space's step cost over consecutive states of `path`.
pub fn calculate_cost<H, SS>(path: &Path<SS::State>, space: &SS) -> H::Number
where
    H: NumberHandler,
    SS: HeuristicSpace<H::Number>,
{
    path.states()
        .windows(2)
        .fold(H::zero(), |cost, pair| {
            H::add(&cost, &space.step_cost(&pair[0], &pair[1]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{FloatHandler, IntegerHandler, Position};
    use crate::grid::{EntityGridSpace, Neighborhood, ObstacleGrid};

    #[test]
    fn test_cost_of_single_state_path_is_zero() {
        let grid = ObstacleGrid::from_weights(vec![vec![0; 3]; 3]).unwrap();
        let space = EntityGridSpace::new(grid, Neighborhood::VonNeumann);
        let path = Path::from_states(vec![Position::new(1, 1)]);
        assert_eq!(calculate_cost::<FloatHandler, _>(&path, &space), 0.0);
    }

    #[test]
    fn test_cost_sums_consecutive_steps() {
        let grid = ObstacleGrid::from_weights(vec![vec![0; 3]; 3]).unwrap();
        let space = EntityGridSpace::new(grid, Neighborhood::Moore);
        let path = Path::from_states(vec![
            Position::new(0, 0),
            Position::new(1, 1),
            Position::new(1, 2),
        ]);

        let cost = calculate_cost::<FloatHandler, _>(&path, &space);
        assert!((cost - (2f64.sqrt() + 1.0)).abs() < 1e-9);
        assert_eq!(calculate_cost::<IntegerHandler, _>(&path, &space), 2);
    }
}

mod astar;
mod cost;

pub use astar::AStar;
pub use cost::calculate_cost;

use std::collections::HashMap;
use std::hash::Hash;

use crate::common::Path;

/// Walks parent links back from `goal` and returns the start-to-goal path.
pub fn construct_path<S: Clone + Eq + Hash>(parents: &HashMap<S, S>, goal: &S) -> Path<S> {
    let mut states = vec![goal.clone()];
    let mut current = goal;
    while let Some(parent) = parents.get(current) {
        states.push(parent.clone());
        current = parent;
    }
    states.reverse();
    Path::from_states(states)
}

use anyhow::Result;
use std::fmt::Debug;
use std::hash::Hash;

use crate::common::Path;

/// Neighbor generation over a discrete state space.
pub trait StateSpace {
    type State: Clone + Eq + Hash + Debug;

    fn neighbors_of(&self, state: &Self::State) -> Vec<Self::State>;

    /// Rejects a start/goal pair that cannot be planned in this space.
    fn validate(&self, _start: &Self::State, _goal: &Self::State) -> Result<()> {
        Ok(())
    }
}

/// Distance estimates over a state space, in distance type `D`.
pub trait HeuristicSpace<D>: StateSpace {
    /// Estimated distance between two states. Must never overestimate the
    /// true cost. The search engine also uses it as the edge cost between
    /// adjacent states.
    fn heuristic_distance(&self, from: &Self::State, to: &Self::State) -> D;

    /// Real cost of one step, used when recomputing the cost of a path.
    fn step_cost(&self, from: &Self::State, to: &Self::State) -> D {
        self.heuristic_distance(from, to)
    }
}

/// Everything one search call needs.
pub struct InputPlan<'a, SS: StateSpace> {
    pub state_space: &'a SS,
    pub start: SS::State,
    pub goal: SS::State,
}

impl<'a, SS: StateSpace> InputPlan<'a, SS> {
    pub fn new(state_space: &'a SS, start: SS::State, goal: SS::State) -> Result<Self> {
        state_space.validate(&start, &goal)?;
        Ok(InputPlan {
            state_space,
            start,
            goal,
        })
    }
}

/// Planning input together with the slot the search writes its result into.
pub struct PlanningData<'a, SS: StateSpace> {
    input: InputPlan<'a, SS>,
    path: Option<Path<SS::State>>,
}

impl<'a, SS: StateSpace> PlanningData<'a, SS> {
    pub fn new(input: InputPlan<'a, SS>) -> Self {
        PlanningData { input, path: None }
    }

    pub fn input(&self) -> &InputPlan<'a, SS> {
        &self.input
    }

    pub fn path(&self) -> Option<&Path<SS::State>> {
        self.path.as_ref()
    }

    pub fn set_path(&mut self, path: Option<Path<SS::State>>) {
        self.path = path;
    }
}

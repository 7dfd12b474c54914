use super::construct_path;
use crate::common::{HandlerOrd, NumberHandler, Path, ValueSortedMap};
use crate::space::{HeuristicSpace, InputPlan, PlanningData};
use crate::stat::Stats;

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use tracing::{debug, info, instrument, trace, warn};

/// Generic A* over any [`HeuristicSpace`], with distances handled by `H`.
///
/// The heuristic doubles as the edge cost between adjacent states. Each call
/// resets and then fills [`Stats`]. Calls take `&mut self`, so sharing one
/// engine between concurrent searches needs external synchronization.
#[derive(Debug, Default)]
pub struct AStar<H: NumberHandler> {
    stats: Stats,
    expansion_limit: Option<usize>,
    _handler: PhantomData<H>,
}

struct Accumulator<S, H: NumberHandler> {
    open_set: ValueSortedMap<S, HandlerOrd<H>>,
    closed_set: HashSet<S>,
    g_score: HashMap<S, H::Number>,
    parents: HashMap<S, S>,
}

impl<H: NumberHandler> AStar<H> {
    pub fn new() -> Self {
        AStar {
            stats: Stats::default(),
            expansion_limit: None,
            _handler: PhantomData,
        }
    }

    /// Gives up once this many states have been popped from the open set.
    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = Some(limit);
        self
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Runs the search and stores the result path in `data`.
    pub fn plan<SS>(&mut self, data: &mut PlanningData<'_, SS>) -> Option<Path<SS::State>>
    where
        SS: HeuristicSpace<H::Number>,
    {
        let path = self.calculate_path(data.input());
        data.set_path(path.clone());
        path
    }

    #[instrument(skip_all, name = "a_star", fields(start = format!("{:?}", plan.start), goal = format!("{:?}", plan.goal)), level = "debug")]
    pub fn calculate_path<SS>(&mut self, plan: &InputPlan<'_, SS>) -> Option<Path<SS::State>>
    where
        SS: HeuristicSpace<H::Number>,
    {
        self.stats = Stats::default();

        let mut acc = Accumulator::<SS::State, H> {
            open_set: ValueSortedMap::new(),
            closed_set: HashSet::new(),
            g_score: HashMap::new(),
            parents: HashMap::new(),
        };
        let start_f_score = plan.state_space.heuristic_distance(&plan.start, &plan.goal);
        debug!("start f score: {start_f_score:?}");
        acc.g_score.insert(plan.start.clone(), H::zero());
        acc.open_set
            .put(plan.start.clone(), HandlerOrd::new(start_f_score));

        let path = if self.find_path(plan, &mut acc) {
            let path = construct_path(&acc.parents, &plan.goal);
            info!("path of length {} found", path.len());
            Some(path)
        } else {
            info!("path not found");
            None
        };
        self.stats.print();

        path
    }

    fn find_path<SS>(&mut self, plan: &InputPlan<'_, SS>, acc: &mut Accumulator<SS::State, H>) -> bool
    where
        SS: HeuristicSpace<H::Number>,
    {
        while !acc.open_set.is_empty() {
            if self
                .expansion_limit
                .is_some_and(|limit| self.stats.states_visited >= limit)
            {
                warn!(
                    "expansion limit of {} states reached",
                    self.stats.states_visited
                );
                self.stats.limit_reached = true;
                return false;
            }

            self.stats.record_poll(acc.open_set.len());
            let Some((current, f_score)) = acc.open_set.poll_lowest() else {
                break;
            };
            trace!("expand state: {current:?}, f score: {f_score:?}");

            if current == plan.goal {
                return true;
            }
            acc.closed_set.insert(current.clone());

            self.iterate_neighbors(plan, acc, &current);
        }
        false
    }

    fn iterate_neighbors<SS>(
        &self,
        plan: &InputPlan<'_, SS>,
        acc: &mut Accumulator<SS::State, H>,
        current: &SS::State,
    ) where
        SS: HeuristicSpace<H::Number>,
    {
        let space = plan.state_space;
        let Some(current_g_score) = acc.g_score.get(current).cloned() else {
            return;
        };

        for neighbor in space.neighbors_of(current) {
            if acc.closed_set.contains(&neighbor) {
                continue;
            }

            let tentative_g_score = H::add(
                &current_g_score,
                &space.heuristic_distance(current, &neighbor),
            );

            // Already open with a cost at least as good.
            if acc.open_set.contains_key(&neighbor)
                && acc
                    .g_score
                    .get(&neighbor)
                    .is_some_and(|g_score| H::greater_or_equal(&tentative_g_score, g_score))
            {
                continue;
            }

            let f_score = H::add(
                &tentative_g_score,
                &space.heuristic_distance(&neighbor, &plan.goal),
            );
            acc.parents.insert(neighbor.clone(), current.clone());
            acc.g_score.insert(neighbor.clone(), tentative_g_score);
            acc.open_set.put(neighbor, HandlerOrd::new(f_score));
        }
    }
}

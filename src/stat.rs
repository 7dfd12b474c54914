use tracing::info;

/// Counters of the most recent search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub states_visited: usize,
    pub max_open_set_size: usize,
    pub limit_reached: bool,
}

impl Stats {
    pub(crate) fn record_poll(&mut self, open_set_size: usize) {
        self.states_visited += 1;
        self.max_open_set_size = self.max_open_set_size.max(open_set_size);
    }

    pub fn print(&self) {
        info!(
            "States visited: {:?} Max open set size: {:?} Expansion limit reached: {:?}",
            self.states_visited, self.max_open_set_size, self.limit_reached
        );
    }
}

mod frontier;
mod number;
mod state;

pub use frontier::ValueSortedMap;
pub use number::{FloatHandler, HandlerOrd, IntegerHandler, NumberHandler};
pub use state::{CollectiveState, Path, Position};

pub mod cell;

pub use cell::{CellState, GuardedCell};

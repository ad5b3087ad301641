mod presenter;
mod simulation;

pub use presenter::Presenter;
pub use simulation::{Simulation, SimStats, TickState};

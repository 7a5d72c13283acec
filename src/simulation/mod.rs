pub mod input;
pub mod runner;
pub mod tick;

pub use input::{accepts_turn, steer_actors};
pub use runner::Simulation;
pub use tick::{run_simulation_tick, TickReport};

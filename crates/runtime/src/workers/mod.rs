//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the session and executes commands; the timer
//! queue it drives holds delayed continuations until they are due.

mod simulation;
mod timers;

pub use simulation::{Command, SimulationWorker};
pub(crate) use timers::TimerQueue;

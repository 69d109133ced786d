//! Core data types for Safe simulation.

mod safe;
mod simulation;

pub use safe::*;
pub use simulation::*;

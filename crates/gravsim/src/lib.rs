//! Interactive 2D N-body gravity simulation core.
//!
//! Particles attract (or repel) each other with direct pairwise gravity,
//! bounce elastically or merge when their discs overlap, and leave a bounded
//! trail of recent positions for a renderer to fade out.
//!
//! The [`engine::Simulation`] type ties the pieces together; the modules
//! below can also be used on their own.

pub mod body;
pub mod collisions;
pub mod config;
pub mod energy;
pub mod engine;
pub mod error;
pub mod forces;
pub mod input;
pub mod integrator;
pub mod render;
pub mod state;
pub mod trail;

pub use config::{Controls, SimulationConfig};
pub use engine::{Simulation, StepReport};
pub use error::{GravSimError, Result};
pub use input::InputEvent;

#[cfg(test)]
mod engine_test;

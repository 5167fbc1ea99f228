//! Force models for the particle system
//!
//! This module provides the `ForceModel` trait and the direct pairwise
//! gravity used by the simulator.

use crate::body::Particle;
use nalgebra::Vector2;

pub mod gravity;

#[cfg(test)]
mod gravity_test;

pub use gravity::DirectGravity;

/// Default gravitational constant in world units
///
/// Tuned for pixel coordinates and unit timesteps, not SI.
pub const G: f64 = 20.0;

/// A source of force on the particles of a system
///
/// # Examples
///
/// ```
/// use gravsim::forces::{DirectGravity, ForceModel};
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new(100);
/// system.add_particle(10.0, 5.0, Point2::new(0.0, 0.0), Vector2::zeros()).unwrap();
/// system.add_particle(10.0, 5.0, Point2::new(10.0, 0.0), Vector2::zeros()).unwrap();
///
/// let gravity = DirectGravity::new(20.0);
/// let accel = gravity.acceleration(0, &system.particles);
/// assert_eq!(accel, Vector2::new(2.0, 0.0));
/// ```
pub trait ForceModel {
    /// Net force on the particle at `idx` from every other particle
    fn force_on(&self, idx: usize, particles: &[Particle]) -> Vector2<f64>;

    /// Net acceleration on the particle at `idx`: `force / mass`
    fn acceleration(&self, idx: usize, particles: &[Particle]) -> Vector2<f64> {
        self.force_on(idx, particles) / particles[idx].mass()
    }

    /// Accelerations of all particles, computed from one position snapshot
    fn accelerations(&self, particles: &[Particle]) -> Vec<Vector2<f64>> {
        (0..particles.len())
            .map(|i| self.acceleration(i, particles))
            .collect()
    }

    /// Potential energy of the configuration (optional)
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _particles: &[Particle]) -> f64 {
        0.0
    }
}

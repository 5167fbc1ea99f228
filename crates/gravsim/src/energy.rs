//! Energy diagnostic
//!
//! A read-only report of kinetic and gravitational potential energy. It is
//! meant for the HUD and for tests and never feeds back into the simulation.

use serde::Serialize;

use crate::body::Particle;
use crate::forces::{DirectGravity, ForceModel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReport {
    /// `Σ ½ m |v|²`
    pub kinetic: f64,
    /// `-Σ_{i<j} G m_i m_j / d_ij`, coincident pairs skipped
    pub potential: f64,
}

impl EnergyReport {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Compute kinetic and potential energy of a set of particles
///
/// `g` is taken by magnitude: the potential is always the attractive form,
/// whatever gravity sign the integration currently uses.
///
/// # Examples
///
/// ```
/// use gravsim::energy::total_energy;
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new(100);
/// system.add_particle(2.0, 5.0, Point2::new(0.0, 0.0), Vector2::new(3.0, 4.0)).unwrap();
/// system.add_particle(5.0, 5.0, Point2::new(10.0, 0.0), Vector2::zeros()).unwrap();
///
/// let energy = total_energy(&system.particles, 20.0);
/// assert_eq!(energy.kinetic, 25.0);
/// assert_eq!(energy.potential, -20.0);
/// assert_eq!(energy.total(), 5.0);
/// ```
pub fn total_energy(particles: &[Particle], g: f64) -> EnergyReport {
    let kinetic = particles.iter().map(|p| p.kinetic_energy()).sum();
    let potential = DirectGravity::new(g.abs()).potential_energy(particles);

    EnergyReport { kinetic, potential }
}

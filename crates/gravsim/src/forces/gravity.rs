//! Direct pairwise gravity (O(N²))

use crate::body::Particle;
use crate::forces::ForceModel;
use nalgebra::Vector2;

/// Direct O(N²) gravitational force computation
///
/// Sums `G * m_p * m_q / |r|² * r̂` over every other particle. A negative `g`
/// turns attraction into repulsion for all pairs at once. Coincident
/// particles (`|r| == 0`) exert no force on each other.
///
/// Fine for the tens of particles an interactive session holds; there is no
/// spatial acceleration structure.
///
/// # Examples
///
/// ```
/// use gravsim::forces::{DirectGravity, ForceModel};
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new(100);
/// system.add_particle(4.0, 5.0, Point2::new(0.0, 0.0), Vector2::zeros()).unwrap();
/// system.add_particle(4.0, 5.0, Point2::new(0.0, 20.0), Vector2::zeros()).unwrap();
///
/// // Repulsion pushes the first particle away from the second (negative y)
/// let repel = DirectGravity::new(-20.0);
/// assert!(repel.force_on(0, &system.particles).y < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Signed gravitational constant (positive attracts, negative repels)
    pub g: f64,
}

impl DirectGravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Force exerted on `p` by `q`; zero when they coincide
    pub fn pair_force(&self, p: &Particle, q: &Particle) -> Vector2<f64> {
        let r = q.position - p.position;
        let r_mag = r.magnitude();
        if r_mag == 0.0 {
            return Vector2::zeros();
        }
        let force_mag = self.g * p.mass() * q.mass() / (r_mag * r_mag);
        r * (force_mag / r_mag)
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new(super::G)
    }
}

impl ForceModel for DirectGravity {
    fn force_on(&self, idx: usize, particles: &[Particle]) -> Vector2<f64> {
        let p = &particles[idx];
        particles
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(_, q)| self.pair_force(p, q))
            .fold(Vector2::zeros(), |acc, f| acc + f)
    }

    fn potential_energy(&self, particles: &[Particle]) -> f64 {
        // Each pair counted once
        particles
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                particles[i + 1..].iter().filter_map(move |b| {
                    let r = a.distance_to(b);
                    (r != 0.0).then(|| -self.g * a.mass() * b.mass() / r)
                })
            })
            .sum()
    }
}

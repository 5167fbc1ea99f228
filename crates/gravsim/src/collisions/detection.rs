//! Collision detection
//!
//! Two particles collide when their discs overlap:
//! `distance(a, b) < radius_a + radius_b`.

use crate::body::Particle;

/// A detected overlap between the particles at indices `a < b`
///
/// Indices refer to the particle vector at detection time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Lower index of the pair
    pub a: usize,
    /// Higher index of the pair
    pub b: usize,
    /// Current centre-to-centre distance
    pub separation: f64,
    /// Sum of radii that the separation fell below
    pub contact_distance: f64,
}

/// Collision detector trait
pub trait CollisionDetector {
    /// Detect all overlapping pairs
    ///
    /// Events must be ordered by `(a, b)` so resolution is deterministic.
    fn detect(&self, particles: &[Particle]) -> Vec<CollisionEvent>;
}

/// Check whether a pair overlaps
pub fn check_pair(a_idx: usize, a: &Particle, b_idx: usize, b: &Particle) -> Option<CollisionEvent> {
    let separation = a.distance_to(b);
    let contact_distance = a.radius() + b.radius();

    (separation < contact_distance).then_some(CollisionEvent {
        a: a_idx,
        b: b_idx,
        separation,
        contact_distance,
    })
}

/// Direct O(N²) collision detector
///
/// Visits every unordered pair `(i, j)` with `i < j` exactly once.
///
/// # Examples
///
/// ```
/// use gravsim::collisions::{CollisionDetector, DirectDetector};
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new(100);
/// system.add_particle(4.0, 5.0, Point2::new(0.0, 0.0), Vector2::zeros()).unwrap();
/// system.add_particle(4.0, 5.0, Point2::new(9.0, 0.0), Vector2::zeros()).unwrap();
/// system.add_particle(4.0, 5.0, Point2::new(100.0, 0.0), Vector2::zeros()).unwrap();
///
/// let events = DirectDetector.detect(&system.particles);
/// assert_eq!(events.len(), 1);
/// assert_eq!((events[0].a, events[0].b), (0, 1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn detect(&self, particles: &[Particle]) -> Vec<CollisionEvent> {
        let n = particles.len();

        (0..n)
            .flat_map(|i| {
                ((i + 1)..n).filter_map(move |j| check_pair(i, &particles[i], j, &particles[j]))
            })
            .collect()
    }
}

//! Collision resolution
//!
//! Two policies:
//! - elastic: normal-only impulse exchange, no particle is removed
//! - merge: the lower-index particle absorbs the higher-index one, conserving
//!   mass and momentum
//!
//! Neither policy moves particles, so the overlaps found by the detector at
//! the start of the pass stay valid while it is resolved.

use std::collections::HashSet;

use crate::body::{Particle, ParticleId};
use crate::collisions::{CollisionDetector, CollisionEvent};
use crate::state::SystemState;

/// Which collision policy to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionMode {
    Elastic,
    Merge,
}

impl CollisionMode {
    pub fn from_merge_flag(merge: bool) -> Self {
        if merge { Self::Merge } else { Self::Elastic }
    }
}

/// A merge that happened during a resolution pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    /// Particle that absorbed the other and stays in the system
    pub survivor: ParticleId,
    /// Particle removed from the system
    pub absorbed: ParticleId,
    /// Survivor mass after the merge
    pub mass: f64,
}

/// Summary of one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Overlapping pairs found by the detector
    pub detected: usize,
    /// Elastic impulses actually applied
    pub bounces: usize,
    pub merges: Vec<MergeEvent>,
}

/// Apply an elastic, frictionless impulse between two particles
///
/// The exchange acts only along the contact normal `r̂ = (b - a) / |b - a|`.
/// Nothing happens when the particles coincide or already separate along
/// the normal. Returns whether an impulse was applied.
///
/// # Examples
///
/// ```
/// use gravsim::collisions::resolve_elastic;
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new(100);
/// system.add_particle(1.0, 5.0, Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
/// system.add_particle(1.0, 5.0, Point2::new(8.0, 0.0), Vector2::new(-1.0, 0.0)).unwrap();
///
/// let (a, b) = system.particles.split_at_mut(1);
/// assert!(resolve_elastic(&mut a[0], &mut b[0]));
///
/// // Equal masses swap their normal velocities
/// assert_eq!(system.particles[0].velocity, Vector2::new(-1.0, 0.0));
/// assert_eq!(system.particles[1].velocity, Vector2::new(1.0, 0.0));
/// ```
pub fn resolve_elastic(a: &mut Particle, b: &mut Particle) -> bool {
    let r = b.position - a.position;
    let v = b.velocity - a.velocity;
    let dist = r.magnitude();
    if dist == 0.0 {
        return false;
    }

    let r_hat = r / dist;
    let closing_speed = v.dot(&r_hat);
    if closing_speed > 0.0 {
        return false;
    }

    let (m_a, m_b) = (a.mass(), b.mass());
    let impulse = 2.0 * closing_speed / (m_a + m_b);
    a.velocity += r_hat * (impulse * m_b);
    b.velocity -= r_hat * (impulse * m_a);
    true
}

/// Mutable access to two distinct particles, `i < j`
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Resolve a list of collision events in order
///
/// In merge mode every index that took part in a merge this pass (absorbed
/// into or removed) is excluded from the remaining events, so a particle
/// merges at most once per pass and a grown particle is not re-checked until
/// the next pass. Removed particles are compacted out at the end, keeping
/// the order of the survivors.
///
/// # Arguments
///
/// * `state` - System state to modify
/// * `events` - Overlapping pairs ordered by `(a, b)`
/// * `mode` - Collision policy
/// * `merge_radius_floor` - Radius floor applied to a particle after it absorbs another
pub fn resolve_collisions(
    state: &mut SystemState,
    events: &[CollisionEvent],
    mode: CollisionMode,
    merge_radius_floor: f64,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome {
        detected: events.len(),
        ..CollisionOutcome::default()
    };

    match mode {
        CollisionMode::Elastic => {
            for event in events {
                let (a, b) = pair_mut(&mut state.particles, event.a, event.b);
                if resolve_elastic(a, b) {
                    outcome.bounces += 1;
                }
            }
        }
        CollisionMode::Merge => {
            let mut merged: HashSet<usize> = HashSet::new();
            let mut removed = vec![false; state.particles.len()];

            for event in events {
                if merged.contains(&event.a) || merged.contains(&event.b) {
                    continue;
                }

                let (survivor, absorbed) = pair_mut(&mut state.particles, event.a, event.b);
                survivor.absorb(absorbed, merge_radius_floor);
                log::debug!(
                    "particle {} absorbed particle {} (mass now {:.2})",
                    survivor.id.0,
                    absorbed.id.0,
                    survivor.mass()
                );
                outcome.merges.push(MergeEvent {
                    survivor: survivor.id,
                    absorbed: absorbed.id,
                    mass: survivor.mass(),
                });

                removed[event.b] = true;
                merged.insert(event.a);
                merged.insert(event.b);
            }

            if !outcome.merges.is_empty() {
                state.compact(&removed);
            }
        }
    }

    outcome
}

/// Detect and resolve all collisions of one step
///
/// # Examples
///
/// ```
/// use gravsim::collisions::{handle_collisions, CollisionMode, DirectDetector};
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new(100);
/// system.add_particle(2.0, 5.0, Point2::new(0.0, 0.0), Vector2::zeros()).unwrap();
/// system.add_particle(8.0, 5.0, Point2::new(6.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
///
/// let outcome = handle_collisions(&mut system, &DirectDetector, CollisionMode::Merge, 3.0);
///
/// assert_eq!(outcome.merges.len(), 1);
/// assert_eq!(system.particle_count(), 1);
/// assert_eq!(system.particles[0].mass(), 10.0);
/// assert!((system.particles[0].velocity.x - 0.8).abs() < 1e-12);
/// ```
pub fn handle_collisions(
    state: &mut SystemState,
    detector: &dyn CollisionDetector,
    mode: CollisionMode,
    merge_radius_floor: f64,
) -> CollisionOutcome {
    let events = detector.detect(&state.particles);
    resolve_collisions(state, &events, mode, merge_radius_floor)
}

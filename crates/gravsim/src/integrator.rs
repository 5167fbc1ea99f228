//! Time integration for the particle system
//!
//! A step is split into a velocity *kick* and a position *drift* so the
//! collision pass can run between them: velocities are final for the step
//! before positions move.

use crate::forces::ForceModel;
use crate::state::SystemState;

/// A time integrator for the particle system
pub trait Integrator {
    /// Update every velocity from the forces at the current positions
    fn kick(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel);

    /// Update every position from the current velocities and extend the trails
    fn drift(&self, state: &mut SystemState, dt: f64);

    /// Kick then drift, without any collision handling in between
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep
    /// * `force` - Force model to compute accelerations
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        self.kick(state, dt, force);
        self.drift(state, dt);
        state.time += dt;
        state.step_count += 1;
    }

    /// Advance the system by `n_steps` timesteps and return the final time
    fn integrate(
        &self,
        state: &mut SystemState,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(state, dt, force);
        }
        state.time
    }
}

/// Semi-implicit (symplectic) Euler integrator
///
/// 1. Kick: v(t + dt) = v(t) + a(x(t)) * dt
/// 2. Drift: x(t + dt) = x(t) + v(t + dt) * dt
///
/// All accelerations come from one snapshot of positions, so the result does
/// not depend on particle order. With `dt = 1` this is one update per frame.
///
/// # Examples
///
/// ```
/// use gravsim::forces::DirectGravity;
/// use gravsim::integrator::{Integrator, SemiImplicitEuler};
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new(100);
/// system.add_particle(10.0, 5.0, Point2::new(0.0, 0.0), Vector2::zeros()).unwrap();
/// system.add_particle(10.0, 5.0, Point2::new(10.0, 0.0), Vector2::zeros()).unwrap();
///
/// SemiImplicitEuler.step(&mut system, 1.0, &DirectGravity::new(20.0));
///
/// // Velocity was updated first, then used for the position update
/// assert_eq!(system.particles[0].velocity, Vector2::new(2.0, 0.0));
/// assert_eq!(system.particles[0].position, Point2::new(2.0, 0.0));
/// assert_eq!(system.particles[1].position, Point2::new(8.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn kick(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        // Read-only phase: no velocity changes until every acceleration is known
        let accelerations = force.accelerations(&state.particles);

        state
            .particles
            .iter_mut()
            .zip(accelerations.iter())
            .for_each(|(particle, accel)| {
                particle.velocity += accel * dt;
            });
    }

    fn drift(&self, state: &mut SystemState, dt: f64) {
        state
            .particles
            .iter_mut()
            .for_each(|particle| particle.advance(dt));
    }
}

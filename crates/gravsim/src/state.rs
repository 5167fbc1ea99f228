use nalgebra::{Point2, Vector2};

use crate::body::{Particle, ParticleId};
use crate::error::Result;
use crate::trail::Trail;

/// All active particles plus elapsed simulation time
///
/// Particles live in a `Vec` in insertion order. Indices are only stable
/// within a single step; use `ParticleId` to refer to a particle across steps.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemState {
    /// Elapsed simulation time (sum of `dt` over executed steps)
    pub time: f64,
    /// Number of executed (non-paused) steps
    pub step_count: u64,
    /// Active particles
    pub particles: Vec<Particle>,
    trail_capacity: usize,
    next_id: u32,
}

impl SystemState {
    /// Creates an empty system whose particles keep `trail_capacity` trail points
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::state::SystemState;
    ///
    /// let system = SystemState::new(100);
    /// assert_eq!(system.particle_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new(trail_capacity: usize) -> Self {
        Self {
            time: 0.0,
            step_count: 0,
            particles: Vec::new(),
            trail_capacity,
            next_id: 0,
        }
    }

    /// Adds a particle and returns its ID
    ///
    /// # Arguments
    ///
    /// * `mass` - Must be finite and > 0
    /// * `radius_floor` - Lower bound for the mass-derived radius
    /// * `position` - World coordinates
    /// * `velocity` - World units per unit time
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::state::SystemState;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut system = SystemState::new(100);
    /// let id = system
    ///     .add_particle(8.0, 5.0, Point2::new(10.0, 0.0), Vector2::zeros())
    ///     .unwrap();
    ///
    /// assert_eq!(system.particle_count(), 1);
    /// assert_eq!(system.get_particle(id).unwrap().radius(), 8.0);
    /// assert!(system.add_particle(-1.0, 5.0, Point2::origin(), Vector2::zeros()).is_err());
    /// ```
    pub fn add_particle(
        &mut self,
        mass: f64,
        radius_floor: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> Result<ParticleId> {
        let id = ParticleId(self.next_id);
        let particle = Particle::new(
            id,
            position,
            velocity,
            mass,
            radius_floor,
            Trail::with_capacity(self.trail_capacity),
        )?;
        self.next_id += 1;
        self.particles.push(particle);
        Ok(id)
    }

    /// Removes a particle, keeping the relative order of the rest
    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        self.particles
            .iter()
            .position(|p| p.id == id)
            .map(|idx| self.particles.remove(idx))
    }

    /// Drops every particle whose index is flagged, preserving order
    pub(crate) fn compact(&mut self, removed: &[bool]) {
        let mut flags = removed.iter();
        self.particles
            .retain(|_| !flags.next().copied().unwrap_or(false));
    }

    pub fn get_particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    /// Sum of all particle masses
    ///
    /// Conserved by both collision policies.
    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass()).sum()
    }

    /// Total linear momentum
    ///
    /// Conserved by merges and by elastic bounces; gravity conserves it only
    /// up to the skipped coincident pairs.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.particles
            .iter()
            .map(|p| p.momentum())
            .fold(Vector2::zeros(), |acc, m| acc + m)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }
}

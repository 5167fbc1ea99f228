use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{GravSimError, Result};
use crate::trail::Trail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

/// Minimum collision/visual radius applied when mass changes
///
/// A fresh particle gets `max(creation_floor, floor(mass))`; a particle that
/// has just absorbed another gets `max(merge_floor, floor(mass))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusPolicy {
    pub creation_floor: f64,
    pub merge_floor: f64,
}

impl RadiusPolicy {
    /// One floor for both creation and merges
    pub fn uniform(floor: f64) -> Self {
        Self {
            creation_floor: floor,
            merge_floor: floor,
        }
    }

    pub fn creation_radius(&self, mass: f64) -> f64 {
        radius_for_mass(mass, self.creation_floor)
    }

    pub fn merge_radius(&self, mass: f64) -> f64 {
        radius_for_mass(mass, self.merge_floor)
    }
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self {
            creation_floor: 5.0,
            merge_floor: 3.0,
        }
    }
}

/// `max(floor, ⌊mass⌋)`
pub fn radius_for_mass(mass: f64, floor: f64) -> f64 {
    floor.max(mass.floor())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    mass: f64,
    radius: f64,
    pub trail: Trail,
}

impl Particle {
    /// Creates a particle, rejecting non-positive mass and non-finite state
    ///
    /// The radius is derived from the mass with `radius_floor` as lower bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::{Particle, ParticleId};
    /// use gravsim::trail::Trail;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let p = Particle::new(
    ///     ParticleId(0),
    ///     Point2::new(100.0, 200.0),
    ///     Vector2::new(0.5, 0.0),
    ///     7.8,
    ///     5.0,
    ///     Trail::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(p.radius(), 7.0);
    ///
    /// assert!(Particle::new(ParticleId(1), Point2::origin(), Vector2::zeros(), 0.0, 5.0, Trail::default()).is_err());
    /// ```
    pub fn new(
        id: ParticleId,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        radius_floor: f64,
        trail: Trail,
    ) -> Result<Self> {
        validate_mass(mass)?;
        if !position.coords.iter().all(|c| c.is_finite()) {
            return Err(GravSimError::NonFinite("position"));
        }
        if !velocity.iter().all(|c| c.is_finite()) {
            return Err(GravSimError::NonFinite("velocity"));
        }
        Ok(Self {
            id,
            position,
            velocity,
            mass,
            radius: radius_for_mass(mass, radius_floor),
            trail,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Absorbs `other`, conserving mass and linear momentum
    ///
    /// Position is kept; only mass, velocity and radius change.
    pub fn absorb(&mut self, other: &Particle, radius_floor: f64) {
        let total_mass = self.mass + other.mass;
        self.velocity = (self.momentum() + other.momentum()) / total_mass;
        self.mass = total_mass;
        self.radius = radius_for_mass(total_mass, radius_floor);
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        (other.position - self.position).magnitude()
    }

    /// True when the two discs overlap: `distance < r_a + r_b`
    pub fn overlaps(&self, other: &Particle) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// Moves by `velocity * dt` and records the new position in the trail
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        self.trail.push(self.position);
    }
}

fn validate_mass(mass: f64) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(GravSimError::InvalidMass(mass))
    }
}

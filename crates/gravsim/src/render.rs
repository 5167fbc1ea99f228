//! Read-only views for a renderer and a HUD
//!
//! Nothing here draws. These types carry exactly what a front end needs each
//! frame: where particles are, how big and what colour they are, their trail
//! segments with fading alpha, and the status lines of the HUD.

use nalgebra::{Point2, Vector2};
use serde::Serialize;

use crate::body::{Particle, ParticleId};
use crate::config::{Controls, GravitySign};
use crate::energy::EnergyReport;
use crate::trail::TrailSegment;

/// RGB colour for a particle moving at `speed`
///
/// Red grows with speed and saturates at 255; green and blue are fixed.
///
/// # Examples
///
/// ```
/// use gravsim::render::speed_color;
///
/// assert_eq!(speed_color(0.0), [0, 100, 255]);
/// assert_eq!(speed_color(2.0), [100, 100, 255]);
/// assert_eq!(speed_color(40.0), [255, 100, 255]);
/// ```
pub fn speed_color(speed: f64) -> [u8; 3] {
    let red = (speed * 50.0).clamp(0.0, 255.0) as u8;
    [red, 100, 255]
}

/// Everything a renderer needs to draw one particle
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleView {
    pub id: ParticleId,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub radius: f64,
    pub mass: f64,
    pub color: [u8; 3],
    /// Oldest first, alpha ramping up toward the newest segment
    pub trail: Vec<TrailSegment>,
}

impl From<&Particle> for ParticleView {
    fn from(particle: &Particle) -> Self {
        Self {
            id: particle.id,
            position: particle.position,
            velocity: particle.velocity,
            radius: particle.radius(),
            mass: particle.mass(),
            color: speed_color(particle.speed()),
            trail: particle.trail.segments().collect(),
        }
    }
}

/// Status shown in the corner of the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudInfo {
    pub gravity: f64,
    pub particle_count: usize,
    pub paused: bool,
    pub merge_mode: bool,
    pub gravity_sign: GravitySign,
    pub energy: EnergyReport,
}

impl HudInfo {
    pub fn new(controls: &Controls, particle_count: usize, energy: EnergyReport) -> Self {
        Self {
            gravity: controls.gravity,
            particle_count,
            paused: controls.paused,
            merge_mode: controls.merge_mode,
            gravity_sign: controls.gravity_sign,
            energy,
        }
    }

    /// HUD text, one entry per line
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::Controls;
    /// use gravsim::energy::EnergyReport;
    /// use gravsim::render::HudInfo;
    ///
    /// let hud = HudInfo::new(&Controls::default(), 10, EnergyReport::default());
    /// assert_eq!(
    ///     hud.lines(),
    ///     vec!["G: 20.00", "Particles: 10", "Running", "Merge Mode: OFF", "Gravity Mode: Attract"]
    /// );
    /// ```
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("G: {:.2}", self.gravity),
            format!("Particles: {}", self.particle_count),
            if self.paused { "Paused" } else { "Running" }.to_string(),
            format!("Merge Mode: {}", if self.merge_mode { "ON" } else { "OFF" }),
            format!(
                "Gravity Mode: {}",
                match self.gravity_sign {
                    GravitySign::Attract => "Attract",
                    GravitySign::Repel => "Repel",
                }
            ),
        ]
    }

    /// One-line energy summary for console logging
    pub fn energy_line(&self) -> String {
        format!(
            "KE: {:.2} | PE: {:.2} | Total: {:.2}",
            self.energy.kinetic,
            self.energy.potential,
            self.energy.total()
        )
    }
}

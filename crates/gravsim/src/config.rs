//! Simulation configuration
//!
//! Two layers:
//! - [`SimulationConfig`]: parameters fixed for the lifetime of a simulation
//!   (timestep, launch scaling, trail length, world size, initial batch)
//! - [`Controls`]: live tunables changed by user input (gravity strength and
//!   sign, pause, merge mode), passed explicitly into every step
//!
//! Both deserialize with serde and fall back to defaults for missing fields,
//! so a front end only has to send what it wants to change:
//!
//! ```
//! use gravsim::config::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! assert_eq!(config.gravity, 20.0);
//! assert_eq!(config.dt, 1.0);
//! assert_eq!(config.trail_capacity, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::body::RadiusPolicy;
use crate::error::{GravSimError, Result};
use crate::forces::G;
use crate::trail::DEFAULT_TRAIL_CAPACITY;

/// Largest accepted `trail_capacity`
pub const MAX_TRAIL_CAPACITY: usize = 10_000;

/// Direction of gravity for all pairs at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GravitySign {
    Attract,
    Repel,
}

impl GravitySign {
    /// `+1.0` for attraction, `-1.0` for repulsion
    pub fn factor(self) -> f64 {
        match self {
            Self::Attract => 1.0,
            Self::Repel => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Attract => Self::Repel,
            Self::Repel => Self::Attract,
        }
    }
}

/// Which gravitational constant the energy diagnostic uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnergyGravity {
    /// A fixed reference constant, independent of the live control
    Reference(f64),
    /// The live gravity magnitude from [`Controls`]
    Live,
}

impl Default for EnergyGravity {
    fn default() -> Self {
        Self::Reference(G)
    }
}

/// Initial random batch of particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnConfig {
    pub count: usize,
    /// Distance kept from the world edges
    pub margin: f64,
    /// Velocity components are drawn from `[-max_speed, max_speed]`
    pub max_speed: f64,
    pub mass_min: f64,
    pub mass_max: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 10,
            margin: 100.0,
            max_speed: 0.5,
            mass_min: 2.0,
            mass_max: 10.0,
        }
    }
}

/// Static simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Initial gravity magnitude
    pub gravity: f64,
    /// Integration timestep; 1.0 is one update per rendered frame
    pub dt: f64,
    /// Launch velocity per unit of drag distance
    pub launch_scale: f64,
    pub launch_mass_min: f64,
    pub launch_mass_max: f64,
    pub trail_capacity: usize,
    pub radius_policy: RadiusPolicy,
    pub energy_gravity: EnergyGravity,
    pub world_width: f64,
    pub world_height: f64,
    pub spawn: SpawnConfig,
    /// RNG seed; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: G,
            dt: 1.0,
            launch_scale: 0.05,
            launch_mass_min: 2.0,
            launch_mass_max: 5.0,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            radius_policy: RadiusPolicy::default(),
            energy_gravity: EnergyGravity::default(),
            world_width: 800.0,
            world_height: 600.0,
            spawn: SpawnConfig::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the engine cannot run with
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::SimulationConfig;
    ///
    /// let bad = SimulationConfig { dt: 0.0, ..SimulationConfig::default() };
    /// assert!(bad.validate().is_err());
    /// assert!(SimulationConfig::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GravSimError::InvalidParameter(format!(
                    "{name} must be finite and > 0, got {value}"
                )))
            }
        }

        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(GravSimError::InvalidParameter(format!(
                "gravity must be finite and >= 0, got {}",
                self.gravity
            )));
        }
        positive("dt", self.dt)?;
        if self.trail_capacity > MAX_TRAIL_CAPACITY {
            return Err(GravSimError::InvalidParameter(format!(
                "trail_capacity must be <= {MAX_TRAIL_CAPACITY}, got {}",
                self.trail_capacity
            )));
        }
        if !self.launch_scale.is_finite() {
            return Err(GravSimError::InvalidParameter(
                "launch_scale must be finite".into(),
            ));
        }
        mass_range("launch mass", self.launch_mass_min, self.launch_mass_max)?;
        mass_range("spawn mass", self.spawn.mass_min, self.spawn.mass_max)?;
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        if !self.spawn.margin.is_finite() || self.spawn.margin < 0.0 {
            return Err(GravSimError::InvalidParameter(format!(
                "spawn margin must be finite and >= 0, got {}",
                self.spawn.margin
            )));
        }
        if 2.0 * self.spawn.margin >= self.world_width.min(self.world_height) {
            return Err(GravSimError::InvalidParameter(format!(
                "spawn margin {} leaves no room in a {}x{} world",
                self.spawn.margin, self.world_width, self.world_height
            )));
        }
        if !self.spawn.max_speed.is_finite() || self.spawn.max_speed < 0.0 {
            return Err(GravSimError::InvalidParameter(
                "spawn max_speed must be finite and >= 0".into(),
            ));
        }
        if let EnergyGravity::Reference(g) = self.energy_gravity {
            if !g.is_finite() {
                return Err(GravSimError::InvalidParameter(
                    "energy reference gravity must be finite".into(),
                ));
            }
        }
        Ok(())
    }
}

fn mass_range(name: &str, min: f64, max: f64) -> Result<()> {
    if min.is_finite() && max.is_finite() && min > 0.0 && min < max {
        Ok(())
    } else {
        Err(GravSimError::InvalidParameter(format!(
            "{name} range must satisfy 0 < min < max, got [{min}, {max})"
        )))
    }
}

/// Live tunables, mutated by user input between steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    /// Gravity magnitude
    pub gravity: f64,
    pub gravity_sign: GravitySign,
    pub paused: bool,
    pub merge_mode: bool,
}

impl Controls {
    pub fn new(gravity: f64) -> Self {
        Self {
            gravity,
            gravity_sign: GravitySign::Attract,
            paused: false,
            merge_mode: false,
        }
    }

    /// Gravity constant handed to the force model: magnitude times sign
    ///
    /// ```
    /// use gravsim::config::{Controls, GravitySign};
    ///
    /// let mut controls = Controls::new(20.0);
    /// assert_eq!(controls.signed_gravity(), 20.0);
    /// controls.gravity_sign = GravitySign::Repel;
    /// assert_eq!(controls.signed_gravity(), -20.0);
    /// ```
    pub fn signed_gravity(&self) -> f64 {
        self.gravity * self.gravity_sign.factor()
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(G)
    }
}

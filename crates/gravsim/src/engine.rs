//! Simulation driver.
//!
//! Owns the particle system, the live controls and the RNG, applies input
//! events and runs the per-step pipeline.
//!
//! # Update Sequence
//!
//! Each step proceeds in this order:
//! 1. Gravity kick: every velocity is updated from one position snapshot
//! 2. Collision pass: overlapping pairs bounce or merge
//! 3. Drift: positions advance with the final velocities, trails grow
//!
//! Because the collision pass sees the post-kick velocities, two discs that
//! already overlap bounce within the same step: two resting mass-10 particles
//! 10 apart with G = 20 leave the step moving outward at 2, not inward.
//! An interleaved per-pair scan would instead cancel the kick and leave them
//! at rest.
//!
//! A paused simulation skips the whole step but keeps accepting input.

use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::body::ParticleId;
use crate::collisions::{
    CollisionDetector, CollisionMode, CollisionOutcome, DirectDetector, handle_collisions,
};
use crate::config::{Controls, EnergyGravity, GravitySign, SimulationConfig};
use crate::energy::{EnergyReport, total_energy};
use crate::error::{GravSimError, Result};
use crate::forces::DirectGravity;
use crate::input::InputEvent;
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::render::{HudInfo, ParticleView};
use crate::state::SystemState;

/// What a single executed step did
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Simulation time after the step
    pub time: f64,
    pub collisions: CollisionOutcome,
    pub particle_count: usize,
}

/// What applying an input event changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Launched(ParticleId),
    ControlsChanged,
}

/// An interactive N-body simulation
///
/// # Examples
///
/// ```
/// use gravsim::config::SimulationConfig;
/// use gravsim::engine::Simulation;
/// use gravsim::input::InputEvent;
/// use nalgebra::Point2;
///
/// let config = SimulationConfig { seed: Some(7), ..SimulationConfig::default() };
/// let mut sim = Simulation::new(config).unwrap();
/// sim.populate_random().unwrap();
/// assert_eq!(sim.particle_count(), 10);
///
/// sim.handle(InputEvent::launch(Point2::new(50.0, 50.0), Point2::new(70.0, 50.0)))
///     .unwrap();
/// assert_eq!(sim.particle_count(), 11);
///
/// let report = sim.step().unwrap();
/// assert_eq!(report.time, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: SystemState,
    controls: Controls,
    config: SimulationConfig,
    integrator: SemiImplicitEuler,
    detector: DirectDetector,
    rng: ChaChaRng,
}

impl Simulation {
    /// Creates an empty simulation after validating `config`
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaChaRng::seed_from_u64(seed),
            None => ChaChaRng::from_os_rng(),
        };

        Ok(Self {
            state: SystemState::new(config.trail_capacity),
            controls: Controls::new(config.gravity),
            config,
            integrator: SemiImplicitEuler,
            detector: DirectDetector,
            rng,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn particle_count(&self) -> usize {
        self.state.particle_count()
    }

    /// Spawns the initial random batch described by `config.spawn`
    ///
    /// Positions are whole numbers inside the world minus the margin,
    /// velocity components are uniform in `[-max_speed, max_speed]` and masses
    /// uniform in `[mass_min, mass_max)`.
    pub fn populate_random(&mut self) -> Result<Vec<ParticleId>> {
        let spawn = self.config.spawn.clone();
        let x_range = spawn.margin..(self.config.world_width - spawn.margin);
        let y_range = spawn.margin..(self.config.world_height - spawn.margin);

        let ids = (0..spawn.count)
            .map(|_| {
                let x = self.rng.random_range(x_range.clone()).floor();
                let y = self.rng.random_range(y_range.clone()).floor();
                let vx = self.rng.random_range(-spawn.max_speed..=spawn.max_speed);
                let vy = self.rng.random_range(-spawn.max_speed..=spawn.max_speed);
                let mass = self.rng.random_range(spawn.mass_min..spawn.mass_max);

                self.state.add_particle(
                    mass,
                    self.config.radius_policy.creation_floor,
                    Point2::new(x, y),
                    Vector2::new(vx, vy),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("spawned {} particles", ids.len());
        Ok(ids)
    }

    /// Adds a particle with explicit state, using the creation radius floor
    pub fn add_particle(
        &mut self,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> Result<ParticleId> {
        self.state.add_particle(
            mass,
            self.config.radius_policy.creation_floor,
            position,
            velocity,
        )
    }

    /// Removes a particle by ID; returns false when no such particle exists
    pub fn remove_particle(&mut self, id: ParticleId) -> bool {
        let removed = self.state.remove_particle(id).is_some();
        if removed {
            log::debug!("removed particle {}", id.0);
        }
        removed
    }

    /// Applies one input event
    ///
    /// Only a launch with non-finite coordinates or a non-positive gravity
    /// scale factor can fail; the controls are left unchanged in that case.
    pub fn handle(&mut self, event: InputEvent) -> Result<InputOutcome> {
        match event {
            InputEvent::Launch { start, end } => {
                let start = Point2::new(start[0], start[1]);
                let end = Point2::new(end[0], end[1]);
                let velocity = (end - start) * self.config.launch_scale;
                let mass = self
                    .rng
                    .random_range(self.config.launch_mass_min..self.config.launch_mass_max);

                let id = self.add_particle(mass, start, velocity)?;
                log::debug!(
                    "launched particle {} at ({:.1}, {:.1}) with mass {:.2}",
                    id.0,
                    start.x,
                    start.y,
                    mass
                );
                return Ok(InputOutcome::Launched(id));
            }
            InputEvent::TogglePause => {
                self.controls.paused = !self.controls.paused;
                log::info!("{}", if self.controls.paused { "paused" } else { "resumed" });
            }
            InputEvent::ScaleGravity { factor } => {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(GravSimError::InvalidParameter(format!(
                        "gravity scale factor must be finite and > 0, got {factor}"
                    )));
                }
                self.controls.gravity *= factor;
                log::info!("gravity set to {:.2}", self.controls.gravity);
            }
            InputEvent::ToggleMergeMode => {
                self.controls.merge_mode = !self.controls.merge_mode;
                log::info!(
                    "merge mode {}",
                    if self.controls.merge_mode { "on" } else { "off" }
                );
            }
            InputEvent::ReverseGravity => {
                self.controls.gravity_sign = self.controls.gravity_sign.flipped();
                log::info!(
                    "{}",
                    match self.controls.gravity_sign {
                        GravitySign::Repel => "gravity reversed",
                        GravitySign::Attract => "gravity normal",
                    }
                );
            }
        }
        Ok(InputOutcome::ControlsChanged)
    }

    /// Runs one step with the current controls
    ///
    /// Returns `None` and leaves the state untouched while paused.
    pub fn step(&mut self) -> Option<StepReport> {
        if self.controls.paused {
            return None;
        }

        let report = advance(
            &mut self.state,
            &self.controls,
            self.config.dt,
            self.config.radius_policy.merge_floor,
            &self.integrator,
            &self.detector,
        );

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}", self.hud().energy_line());
        }
        Some(report)
    }

    /// Energy of the current configuration
    pub fn energy(&self) -> EnergyReport {
        let g = match self.config.energy_gravity {
            EnergyGravity::Reference(g) => g,
            EnergyGravity::Live => self.controls.gravity,
        };
        total_energy(&self.state.particles, g)
    }

    pub fn hud(&self) -> HudInfo {
        HudInfo::new(&self.controls, self.particle_count(), self.energy())
    }

    /// Per-particle render data in collection order
    pub fn views(&self) -> Vec<ParticleView> {
        self.state.particles.iter().map(ParticleView::from).collect()
    }
}

/// One full step of the pipeline: kick, collisions, drift
///
/// # Arguments
///
/// * `state` - System state to advance
/// * `controls` - Live gravity and collision settings
/// * `dt` - Timestep
/// * `merge_radius_floor` - Radius floor for particles that absorbed another
/// * `integrator` - Time integrator
/// * `detector` - Collision detector
pub fn advance(
    state: &mut SystemState,
    controls: &Controls,
    dt: f64,
    merge_radius_floor: f64,
    integrator: &dyn Integrator,
    detector: &dyn CollisionDetector,
) -> StepReport {
    let gravity = DirectGravity::new(controls.signed_gravity());

    integrator.kick(state, dt, &gravity);
    let collisions = handle_collisions(
        state,
        detector,
        CollisionMode::from_merge_flag(controls.merge_mode),
        merge_radius_floor,
    );
    integrator.drift(state, dt);

    state.time += dt;
    state.step_count += 1;

    StepReport {
        time: state.time,
        collisions,
        particle_count: state.particle_count(),
    }
}

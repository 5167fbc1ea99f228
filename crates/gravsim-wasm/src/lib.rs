//! WASM bindings for the gravsim N-body simulator.
//!
//! This crate exposes the simulation core to JavaScript so a browser canvas
//! can drive it: the page forwards mouse and keyboard input, calls
//! `simulation_step` once per animation frame and draws the returned
//! snapshots.
//!
//! # Architecture
//!
//! Simulations are stored in thread-local storage (WASM is single-threaded).
//! Functions return opaque IDs for referencing mutable state, and serializable
//! snapshots for reading state.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create(Date.now());
//! simulation_populate(simId);
//!
//! canvas.onmouseup = (e) => {
//!   simulation_launch(simId, dragStart.x, dragStart.y, e.offsetX, e.offsetY);
//! };
//!
//! function frame() {
//!   simulation_step(simId);
//!   draw(simulation_get_particles(simId), simulation_get_hud(simId));
//!   requestAnimationFrame(frame);
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use nalgebra::Point2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use gravsim::body::ParticleId;
use gravsim::config::{GravitySign, SimulationConfig};
use gravsim::engine::Simulation;
use gravsim::input::InputEvent;
use gravsim::render::{HudInfo, ParticleView};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn register(simulation: Simulation) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, simulation);
    });
    log::debug!("registered simulation {id}");

    id
}

/// Run `f` against the simulation registered under `sim_id`
fn with_simulation<R>(
    sim_id: u32,
    f: impl FnOnce(&mut Simulation) -> Result<R, JsError>,
) -> Result<R, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims
            .get_mut(&sim_id)
            .ok_or_else(|| JsError::new(&format!("Simulation {} not found", sim_id)))?;
        f(sim)
    })
}

fn apply(sim_id: u32, event: InputEvent) -> Result<(), JsError> {
    with_simulation(sim_id, |sim| {
        sim.handle(event)
            .map(|_| ())
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// One trail segment, oldest segments first
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailSegmentSnapshot {
    pub start: [f64; 2],
    pub end: [f64; 2],
    /// 0 (transparent) to 255 (opaque)
    pub alpha: u8,
}

/// Particle state snapshot for JavaScript
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleSnapshot {
    pub id: u32,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub radius: f64,
    pub mass: f64,
    /// RGB fill colour
    pub color: [u8; 3],
    pub trail: Vec<TrailSegmentSnapshot>,
}

impl From<ParticleView> for ParticleSnapshot {
    fn from(view: ParticleView) -> Self {
        Self {
            id: view.id.0,
            position: [view.position.x, view.position.y],
            velocity: [view.velocity.x, view.velocity.y],
            radius: view.radius,
            mass: view.mass,
            color: view.color,
            trail: view
                .trail
                .into_iter()
                .map(|s| TrailSegmentSnapshot {
                    start: [s.start.x, s.start.y],
                    end: [s.end.x, s.end.y],
                    alpha: s.alpha,
                })
                .collect(),
        }
    }
}

/// HUD snapshot: the structured values plus the ready-made text lines
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudSnapshot {
    #[serde(flatten)]
    pub info: HudInfo,
    pub reversed: bool,
    pub lines: Vec<String>,
    pub energy_line: String,
}

impl From<HudInfo> for HudSnapshot {
    fn from(info: HudInfo) -> Self {
        Self {
            reversed: info.gravity_sign == GravitySign::Repel,
            lines: info.lines(),
            energy_line: info.energy_line(),
            info,
        }
    }
}

/// Result of one `simulation_step` call
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSnapshot {
    /// False when the simulation is paused and nothing moved
    pub advanced: bool,
    pub time: f64,
    pub particle_count: usize,
    pub collisions: usize,
    pub merges: usize,
}

// =============================================================================
// Simulation lifecycle
// =============================================================================

/// Create a simulation with default parameters
///
/// The browser has no OS entropy source we can rely on here, so the caller
/// supplies the seed (e.g. `Date.now()`).
///
/// # Returns
/// Simulation ID for subsequent operations
#[wasm_bindgen]
pub fn simulation_create(seed: f64) -> Result<u32, JsError> {
    let config = SimulationConfig {
        seed: Some(seed as u64),
        ..SimulationConfig::default()
    };
    let simulation = Simulation::new(config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(register(simulation))
}

/// Create a simulation from a partial configuration object
///
/// Missing fields take their defaults. When the object has no `seed`, the
/// `seed` argument is used.
///
/// # Arguments
/// * `config` - JS object matching `SimulationConfig` (camelCase keys)
/// * `seed` - Fallback RNG seed
#[wasm_bindgen]
pub fn simulation_create_with_config(config: JsValue, seed: f64) -> Result<u32, JsError> {
    let mut config: SimulationConfig = from_js(config)?;
    config.seed.get_or_insert(seed as u64);

    let simulation = Simulation::new(config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(register(simulation))
}

/// Delete a simulation and free its memory
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        if sims.borrow_mut().remove(&sim_id).is_some() {
            log::debug!("deleted simulation {sim_id}");
        }
    });
}

/// Spawn the initial random batch of particles
///
/// # Returns
/// IDs of the new particles
#[wasm_bindgen]
pub fn simulation_populate(sim_id: u32) -> Result<Vec<u32>, JsError> {
    with_simulation(sim_id, |sim| {
        let ids = sim
            .populate_random()
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ids.into_iter().map(|id| id.0).collect())
    })
}

/// Remove a particle by ID
///
/// # Returns
/// True if the particle was found and removed
#[wasm_bindgen]
pub fn simulation_remove_particle(sim_id: u32, particle_id: u32) -> Result<bool, JsError> {
    with_simulation(sim_id, |sim| Ok(sim.remove_particle(ParticleId(particle_id))))
}

// =============================================================================
// Input
// =============================================================================

/// Launch a particle from a mouse drag
///
/// The particle appears at the press point and moves along the drag vector.
#[wasm_bindgen]
pub fn simulation_launch(
    sim_id: u32,
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
) -> Result<(), JsError> {
    apply(
        sim_id,
        InputEvent::launch(Point2::new(start_x, start_y), Point2::new(end_x, end_y)),
    )
}

#[wasm_bindgen]
pub fn simulation_toggle_pause(sim_id: u32) -> Result<(), JsError> {
    apply(sim_id, InputEvent::TogglePause)
}

/// Multiply gravity by `factor` (2.0 for up, 0.5 for down)
#[wasm_bindgen]
pub fn simulation_scale_gravity(sim_id: u32, factor: f64) -> Result<(), JsError> {
    apply(sim_id, InputEvent::ScaleGravity { factor })
}

#[wasm_bindgen]
pub fn simulation_toggle_merge_mode(sim_id: u32) -> Result<(), JsError> {
    apply(sim_id, InputEvent::ToggleMergeMode)
}

#[wasm_bindgen]
pub fn simulation_reverse_gravity(sim_id: u32) -> Result<(), JsError> {
    apply(sim_id, InputEvent::ReverseGravity)
}

// =============================================================================
// Stepping and snapshots
// =============================================================================

/// Advance by one step (no-op while paused)
///
/// # Returns
/// `StepSnapshot` as a JS object
#[wasm_bindgen]
pub fn simulation_step(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| {
        let snapshot = match sim.step() {
            Some(report) => StepSnapshot {
                advanced: true,
                time: report.time,
                particle_count: report.particle_count,
                collisions: report.collisions.detected,
                merges: report.collisions.merges.len(),
            },
            None => StepSnapshot {
                advanced: false,
                time: sim.state.time,
                particle_count: sim.particle_count(),
                collisions: 0,
                merges: 0,
            },
        };
        to_js(&snapshot)
    })
}

/// All particles in draw order
///
/// # Returns
/// Array of `ParticleSnapshot` objects
#[wasm_bindgen]
pub fn simulation_get_particles(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| {
        let particles: Vec<ParticleSnapshot> =
            sim.views().into_iter().map(ParticleSnapshot::from).collect();
        to_js(&particles)
    })
}

/// HUD values, text lines and the energy summary
#[wasm_bindgen]
pub fn simulation_get_hud(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| to_js(&HudSnapshot::from(sim.hud())))
}

#[wasm_bindgen]
pub fn simulation_particle_count(sim_id: u32) -> Result<usize, JsError> {
    with_simulation(sim_id, |sim| Ok(sim.particle_count()))
}

//! User input consumed by the simulation between steps

use nalgebra::Point2;
use serde::Deserialize;

/// A discrete input event
///
/// Events are applied by [`Simulation::handle`](crate::engine::Simulation::handle)
/// and are processed even while the simulation is paused.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    /// Drag-to-launch: a new particle at `start`, moving along `end - start`
    Launch { start: [f64; 2], end: [f64; 2] },
    TogglePause,
    /// Multiply the gravity magnitude by a positive factor
    ScaleGravity { factor: f64 },
    ToggleMergeMode,
    /// Flip between attraction and repulsion
    ReverseGravity,
}

impl InputEvent {
    pub fn launch(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self::Launch {
            start: [start.x, start.y],
            end: [end.x, end.y],
        }
    }

    /// Double the gravity magnitude
    pub fn gravity_up() -> Self {
        Self::ScaleGravity { factor: 2.0 }
    }

    /// Halve the gravity magnitude
    pub fn gravity_down() -> Self {
        Self::ScaleGravity { factor: 0.5 }
    }
}

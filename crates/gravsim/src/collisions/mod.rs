//! Collision detection and resolution
//!
//! This module finds overlapping particle pairs and resolves them either by
//! an elastic bounce or by a momentum-conserving merge.

pub mod detection;
pub mod resolution;


pub use detection::{CollisionDetector, CollisionEvent, DirectDetector, check_pair};
pub use resolution::{
    CollisionMode, CollisionOutcome, MergeEvent, handle_collisions, resolve_collisions,
    resolve_elastic,
};

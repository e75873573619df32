//! Footsteps domain: distance-driven cadence and per-surface sounds.

mod mapping;
mod tracker;


pub use mapping::{FootstepMapping, Locomotion, find_mapping};
pub use tracker::{FootstepCue, FootstepTracker};

//! Data definitions for the first person settings file.
//!
//! These structs mirror assets/data/first_person.ron. Every section has a
//! `Default` so a partial file only overrides what it names.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::crouch::CrouchAction;
use crate::footsteps::FootstepMapping;
use crate::shake::CameraShakes;

/// Serializable Vec3 for RON/JSON.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Vec3Def {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3Def> for Vec3 {
    fn from(v: Vec3Def) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vec3Def {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Author-time configuration for a first person character.
#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CharacterSettings {
    /// Keep whatever bindings the input store already holds.
    pub use_custom_key_mappings: bool,
    pub camera: CameraSettings,
    pub movement: MovementSettings,
    pub body: BodySettings,
    pub footsteps: FootstepSettings,
    pub camera_shakes: CameraShakes,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Yaw sensitivity. Higher values rotate faster.
    pub sensitivity_x: f32,
    /// Pitch sensitivity. Higher values rotate faster.
    pub sensitivity_y: f32,
    /// Minimum view pitch in degrees.
    pub min_pitch: f32,
    /// Maximum view pitch in degrees.
    pub max_pitch: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensitivity_x: 50.0,
            sensitivity_y: 50.0,
            min_pitch: -90.0,
            max_pitch: 90.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub crouch_speed: f32,
    pub run_speed: f32,
    /// Initial vertical velocity of a jump.
    pub jump_velocity: f32,
    /// Rate of the stand/crouch interpolation, per second.
    pub transition_speed: f32,
    /// Extra upward distance for the Hold-mode blocked test (0..=2).
    pub block_test_offset: f32,
    pub crouch_action: CrouchAction,
    /// Fraction of lateral control available while falling.
    pub air_control: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            crouch_speed: 1.5,
            run_speed: 5.0,
            jump_velocity: 3.0,
            transition_speed: 10.0,
            block_test_offset: 0.0,
            crouch_action: CrouchAction::Hold,
            air_control: 0.1,
        }
    }
}

/// Capsule and camera placement captured as the baseline at spawn.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BodySettings {
    pub capsule_radius: f32,
    /// Total capsule half-height, hemisphere included.
    pub capsule_half_height: f32,
    pub camera_offset: Vec3Def,
    /// Camera height above the capsule centre while crouched.
    pub crouched_camera_height: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            capsule_radius: 0.35,
            capsule_half_height: 0.9,
            camera_offset: Vec3Def {
                x: 0.0,
                y: 0.7,
                z: 0.0,
            },
            crouched_camera_height: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FootstepSettings {
    pub enabled: bool,
    /// Surface to sound table. The first mapping for a surface wins.
    pub mappings: Vec<FootstepMapping>,
    /// Stride used until the first footstep picks a mapping.
    pub initial_stride: f32,
    /// Volume multiplier for footsteps while not standing.
    pub crouched_volume: f32,
    /// Seed for sound selection. Random when absent.
    pub seed: Option<u64>,
}

impl Default for FootstepSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            mappings: Vec::new(),
            initial_stride: 1.6,
            crouched_volume: 0.35,
            seed: None,
        }
    }
}

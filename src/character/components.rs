//! Character domain: ECS components backing the character hosts.

use avian3d::prelude::Collider;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::character::ControlRotation;
use crate::shake::ActiveShakes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    #[default]
    Walking,
    Falling,
}

/// Character movement state: speeds, ground mode and this frame's input.
#[derive(Component, Debug, Clone)]
pub struct CharacterMotor {
    pub max_walk_speed: f32,
    pub jump_velocity: f32,
    pub air_control: f32,
    pub mode: MovementMode,
    /// Sum of movement input added this frame.
    pub pending_input: Vec3,
    pub jump_requested: bool,
    /// Set on the frame the character goes from falling to walking.
    pub just_landed: bool,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            max_walk_speed: 3.0,
            jump_velocity: 3.0,
            air_control: 0.1,
            mode: MovementMode::Falling,
            pending_input: Vec3::ZERO,
            jump_requested: false,
            just_landed: false,
        }
    }
}

/// Capsule dimensions; the collider is rebuilt when this changes.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CapsuleShape {
    pub radius: f32,
    /// Total half-height, hemisphere included.
    pub half_height: f32,
}

impl CapsuleShape {
    /// Length of the capsule's inner segment, as avian expects it.
    pub fn segment_length(&self) -> f32 {
        ((self.half_height - self.radius) * 2.0).max(0.0)
    }

    pub fn collider(&self) -> Collider {
        Collider::capsule(self.radius, self.segment_length())
    }
}

/// Camera placement relative to the capsule centre.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CameraRig {
    pub offset: Vec3,
}

/// Marks the camera that views through a character.
#[derive(Component, Debug)]
pub struct FirstPersonCamera {
    pub character: Entity,
}

/// The controller possessing a character: view rotation and camera shakes.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerController {
    pub control: ControlRotation,
    pub shakes: ActiveShakes,
}

/// Possess this character with the local player on spawn.
#[derive(Component, Debug, Default)]
pub struct AutoPossessPlayer;

/// Physical material identity of a collider, used for footstep lookup.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SurfaceMaterial(pub String);

impl SurfaceMaterial {
    pub fn new(surface: impl Into<String>) -> Self {
        Self(surface.into())
    }
}

/// RNG used to pick footstep sounds.
#[derive(Resource, Debug)]
pub struct FootstepRng(pub ChaCha8Rng);

impl FootstepRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random)))
    }
}

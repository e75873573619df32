//! Capabilities the character core needs from its host engine.
//!
//! The crouch state machine, footstep accounting and camera shake driver only
//! talk to the world through these traits. The Bevy plugin implements them
//! over ECS data; tests implement them over plain structs.

use bevy::math::Vec3;

use crate::shake::ShakeKind;

/// Character movement component capability.
pub trait MovementHost {
    fn location(&self) -> Vec3;
    fn velocity(&self) -> Vec3;
    fn max_walk_speed(&self) -> f32;
    fn set_max_walk_speed(&mut self, speed: f32);
    fn set_jump_velocity(&mut self, velocity: f32);
    fn set_air_control(&mut self, air_control: f32);
    fn is_moving_on_ground(&self) -> bool;
    fn is_falling(&self) -> bool;
    /// Whether a jump could start right now (grounded and eligible).
    fn can_jump(&self) -> bool;
    fn jump(&mut self);
    fn stop_jumping(&mut self);
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);
}

/// Capsule collision and scene query capability.
pub trait CollisionHost {
    /// Total half-height, hemisphere included.
    fn capsule_half_height(&self) -> f32;
    fn set_capsule_half_height(&mut self, half_height: f32);
    fn capsule_radius(&self) -> f32;
    fn sweep_sphere(&self, start: Vec3, end: Vec3, radius: f32) -> Option<SweepHit>;
    /// Probes for a blocking floor below `at`.
    fn find_floor(&self, at: Vec3) -> Option<FloorHit>;
}

/// Camera rig capability: the camera offset relative to the capsule.
pub trait CameraHost {
    fn camera_offset(&self) -> Vec3;
    fn set_camera_offset(&mut self, offset: Vec3);
}

/// Player controller camera shake capability.
pub trait ShakeHost {
    fn start_camera_shake(&mut self, kind: ShakeKind, scale: f32);
}

/// Positional sound playback capability.
pub trait SoundHost {
    fn play_sound_at(&mut self, sound: &str, location: Vec3, volume: f32);
}

/// Everything the per-frame character logic touches on its own body.
pub trait CharacterHost: MovementHost + CollisionHost + CameraHost {}

impl<T: MovementHost + CollisionHost + CameraHost> CharacterHost for T {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub location: Vec3,
    /// The hit body is driven by the physics simulation (a dynamic body).
    pub simulates_physics: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloorHit {
    pub location: Vec3,
    /// Physical material identity of the floor, if it has one.
    pub surface: Option<String>,
}

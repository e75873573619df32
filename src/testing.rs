//! In-memory hosts shared by the unit tests.

use std::cell::RefCell;

use bevy::math::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::footsteps::FootstepMapping;
use crate::host::{
    CameraHost, CollisionHost, FloorHit, MovementHost, ShakeHost, SoundHost, SweepHit,
};
use crate::settings::CharacterSettings;
use crate::shake::ShakeKind;

/// Something overhead at an absolute height.
#[derive(Debug, Clone, Copy)]
pub struct Ceiling {
    pub height: f32,
    pub simulates_physics: bool,
}

#[derive(Debug)]
pub struct FakeHost {
    pub location: Vec3,
    pub velocity: Vec3,
    pub max_walk_speed: f32,
    pub jump_velocity: f32,
    pub air_control: f32,
    pub on_ground: bool,
    pub can_jump: bool,
    pub jumps: u32,
    pub stop_jumps: u32,
    pub movement_inputs: Vec<(Vec3, f32)>,
    pub capsule_half_height: f32,
    pub capsule_radius: f32,
    pub ceiling: Option<Ceiling>,
    pub sweeps: RefCell<Vec<(Vec3, Vec3, f32)>>,
    pub has_floor: bool,
    pub floor_surface: Option<String>,
    pub camera_offset: Vec3,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            velocity: Vec3::ZERO,
            max_walk_speed: 3.0,
            jump_velocity: 3.0,
            air_control: 0.1,
            on_ground: true,
            can_jump: true,
            jumps: 0,
            stop_jumps: 0,
            movement_inputs: Vec::new(),
            capsule_half_height: 0.9,
            capsule_radius: 0.35,
            ceiling: None,
            sweeps: RefCell::new(Vec::new()),
            has_floor: true,
            floor_surface: Some("grass".to_string()),
            camera_offset: Vec3::new(0.0, 0.7, 0.0),
        }
    }
}

impl FakeHost {
    /// Moves along +X by `step` with a matching velocity.
    pub fn walk(&mut self, step: f32) {
        self.location.x += step;
        self.velocity = Vec3::X * step.abs().max(0.01);
    }

    pub fn stand_still(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    pub fn fall(&mut self) {
        self.on_ground = false;
        self.can_jump = false;
        self.velocity = Vec3::NEG_Y;
    }

    pub fn land(&mut self) {
        self.on_ground = true;
        self.can_jump = true;
        self.velocity = Vec3::ZERO;
    }
}

impl MovementHost for FakeHost {
    fn location(&self) -> Vec3 {
        self.location
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn max_walk_speed(&self) -> f32 {
        self.max_walk_speed
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed;
    }

    fn set_jump_velocity(&mut self, velocity: f32) {
        self.jump_velocity = velocity;
    }

    fn set_air_control(&mut self, air_control: f32) {
        self.air_control = air_control;
    }

    fn is_moving_on_ground(&self) -> bool {
        self.on_ground
    }

    fn is_falling(&self) -> bool {
        !self.on_ground
    }

    fn can_jump(&self) -> bool {
        self.can_jump
    }

    fn jump(&mut self) {
        self.jumps += 1;
    }

    fn stop_jumping(&mut self) {
        self.stop_jumps += 1;
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.movement_inputs.push((direction, scale));
    }
}

impl CollisionHost for FakeHost {
    fn capsule_half_height(&self) -> f32 {
        self.capsule_half_height
    }

    fn set_capsule_half_height(&mut self, half_height: f32) {
        self.capsule_half_height = half_height;
    }

    fn capsule_radius(&self) -> f32 {
        self.capsule_radius
    }

    fn sweep_sphere(&self, start: Vec3, end: Vec3, radius: f32) -> Option<SweepHit> {
        self.sweeps.borrow_mut().push((start, end, radius));

        let ceiling = self.ceiling?;
        let top = start.y.max(end.y) + radius;
        (ceiling.height >= start.y && ceiling.height <= top).then(|| SweepHit {
            location: Vec3::new(start.x, ceiling.height - radius, start.z),
            simulates_physics: ceiling.simulates_physics,
        })
    }

    fn find_floor(&self, at: Vec3) -> Option<FloorHit> {
        self.has_floor.then(|| FloorHit {
            location: at - Vec3::Y * self.capsule_half_height,
            surface: self.floor_surface.clone(),
        })
    }
}

impl CameraHost for FakeHost {
    fn camera_offset(&self) -> Vec3 {
        self.camera_offset
    }

    fn set_camera_offset(&mut self, offset: Vec3) {
        self.camera_offset = offset;
    }
}

#[derive(Debug, Default)]
pub struct RecordingShakes {
    pub started: Vec<(ShakeKind, f32)>,
}

impl ShakeHost for RecordingShakes {
    fn start_camera_shake(&mut self, kind: ShakeKind, scale: f32) {
        self.started.push((kind, scale));
    }
}

#[derive(Debug, Default)]
pub struct RecordingSounds {
    pub played: Vec<(String, Vec3, f32)>,
}

impl SoundHost for RecordingSounds {
    fn play_sound_at(&mut self, sound: &str, location: Vec3, volume: f32) {
        self.played.push((sound.to_string(), location, volume));
    }
}

pub fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

pub fn grass_mapping() -> FootstepMapping {
    FootstepMapping {
        surface: "grass".to_string(),
        sounds: vec!["grass_a.ogg".to_string(), "grass_b.ogg".to_string()],
        stride_walk: 1.6,
        stride_run: 2.2,
        stride_crouch: 1.2,
    }
}

/// Default settings plus a grass footstep mapping.
pub fn grass_settings() -> CharacterSettings {
    let mut settings = CharacterSettings::default();
    settings.footsteps.mappings = vec![grass_mapping()];
    settings
}

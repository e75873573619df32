//! Character domain: host capabilities implemented over ECS data.

use avian3d::prelude::*;
use bevy::audio::Volume;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::character::{CameraRig, CapsuleShape, CharacterMotor, MovementMode, SurfaceMaterial};
use crate::host::{CameraHost, CollisionHost, FloorHit, MovementHost, SoundHost, SweepHit};

/// Extra reach below the capsule bottom for the footstep floor probe.
pub const FLOOR_PROBE_MARGIN: f32 = 0.1;

/// Scene queries shared by every character body.
#[derive(SystemParam)]
pub struct SceneQueries<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    bodies: Query<'w, 's, &'static RigidBody>,
    surfaces: Query<'w, 's, &'static SurfaceMaterial>,
}

impl SceneQueries<'_, '_> {
    fn simulates_physics(&self, entity: Entity) -> bool {
        self.bodies.get(entity).is_ok_and(|body| body.is_dynamic())
    }

    fn surface(&self, entity: Entity) -> Option<String> {
        self.surfaces.get(entity).ok().map(|surface| surface.0.clone())
    }
}

/// One character's view of the world for a single system run.
pub struct CharacterBody<'a, 'w, 's> {
    pub entity: Entity,
    pub transform: Mut<'a, Transform>,
    pub velocity: &'a LinearVelocity,
    pub motor: Mut<'a, CharacterMotor>,
    pub capsule: Mut<'a, CapsuleShape>,
    pub rig: Mut<'a, CameraRig>,
    pub scene: &'a SceneQueries<'w, 's>,
}

impl CharacterBody<'_, '_, '_> {
    fn filter(&self) -> SpatialQueryFilter {
        SpatialQueryFilter::default().with_excluded_entities([self.entity])
    }
}

impl MovementHost for CharacterBody<'_, '_, '_> {
    fn location(&self) -> Vec3 {
        self.transform.translation
    }

    fn velocity(&self) -> Vec3 {
        self.velocity.0
    }

    fn max_walk_speed(&self) -> f32 {
        self.motor.max_walk_speed
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.motor.max_walk_speed = speed;
    }

    fn set_jump_velocity(&mut self, velocity: f32) {
        self.motor.jump_velocity = velocity;
    }

    fn set_air_control(&mut self, air_control: f32) {
        self.motor.air_control = air_control;
    }

    fn is_moving_on_ground(&self) -> bool {
        self.motor.mode == MovementMode::Walking
    }

    fn is_falling(&self) -> bool {
        self.motor.mode == MovementMode::Falling
    }

    fn can_jump(&self) -> bool {
        self.motor.mode == MovementMode::Walking
    }

    fn jump(&mut self) {
        self.motor.jump_requested = true;
    }

    fn stop_jumping(&mut self) {
        self.motor.jump_requested = false;
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        if scale != 0.0 {
            self.motor.pending_input += direction * scale;
        }
    }
}

impl CollisionHost for CharacterBody<'_, '_, '_> {
    fn capsule_half_height(&self) -> f32 {
        self.capsule.half_height
    }

    /// Resizes the capsule. On the ground the body moves by the change so
    /// the capsule bottom stays on the floor.
    fn set_capsule_half_height(&mut self, half_height: f32) {
        let change = half_height - self.capsule.half_height;
        if change == 0.0 {
            return;
        }

        self.capsule.half_height = half_height;
        if self.motor.mode == MovementMode::Walking {
            self.transform.translation.y += change;
        }
    }

    fn capsule_radius(&self) -> f32 {
        self.capsule.radius
    }

    fn sweep_sphere(&self, start: Vec3, end: Vec3, radius: f32) -> Option<SweepHit> {
        let (direction, distance) = Dir3::new_and_length(end - start).ok()?;

        let hit = self.scene.spatial.cast_shape(
            &Collider::sphere(radius),
            start,
            Quat::IDENTITY,
            direction,
            &ShapeCastConfig::from_max_distance(distance),
            &self.filter(),
        )?;

        Some(SweepHit {
            location: start + direction * hit.distance,
            simulates_physics: self.scene.simulates_physics(hit.entity),
        })
    }

    fn find_floor(&self, at: Vec3) -> Option<FloorHit> {
        let reach = self.capsule.half_height + FLOOR_PROBE_MARGIN;
        let hit = self
            .scene
            .spatial
            .cast_ray(at, Dir3::NEG_Y, reach, true, &self.filter())?;

        Some(FloorHit {
            location: at + Vec3::NEG_Y * hit.distance,
            surface: self.scene.surface(hit.entity),
        })
    }
}

impl CameraHost for CharacterBody<'_, '_, '_> {
    fn camera_offset(&self) -> Vec3 {
        self.rig.offset
    }

    fn set_camera_offset(&mut self, offset: Vec3) {
        self.rig.offset = offset;
    }
}

/// Plays footstep sounds as spatial one-shot audio entities.
#[derive(SystemParam)]
pub struct FootstepAudio<'w, 's> {
    commands: Commands<'w, 's>,
    asset_server: Res<'w, AssetServer>,
}

impl SoundHost for FootstepAudio<'_, '_> {
    fn play_sound_at(&mut self, sound: &str, location: Vec3, volume: f32) {
        let handle: Handle<AudioSource> = self.asset_server.load(sound.to_string());
        self.commands.spawn((
            AudioPlayer::new(handle),
            PlaybackSettings::DESPAWN
                .with_volume(Volume::Linear(volume))
                .with_spatial(true),
            Transform::from_translation(location),
        ));
    }
}

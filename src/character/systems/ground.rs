//! Character domain: ground detection and the landing hook.

use std::sync::Arc;

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::character::systems::{CharacterData, as_shake_host, footstep_event, split_controller};
use crate::character::{
    CapsuleShape, CharacterBody, CharacterLanded, CharacterMotor, Feedback, FootstepAudio,
    FootstepEvent, FootstepRng, MovementMode, SceneQueries,
};

/// Gap below the capsule that still counts as standing on the ground.
pub const GROUND_TOLERANCE: f32 = 0.05;

/// Upward speed above which the character is leaving the ground.
pub const LIFT_OFF_SPEED: f32 = 0.5;

/// Probe sphere radius as a fraction of the capsule radius.
const PROBE_RADIUS_FACTOR: f32 = 0.9;

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(
        Entity,
        &Transform,
        &CapsuleShape,
        &LinearVelocity,
        &mut CharacterMotor,
    )>,
) {
    for (entity, transform, capsule, velocity, mut motor) in &mut query {
        let was_walking = motor.mode == MovementMode::Walking;

        let probe_radius = capsule.radius * PROBE_RADIUS_FACTOR;
        let probe_distance = (capsule.half_height - probe_radius).max(0.0) + GROUND_TOLERANCE;
        let filter = SpatialQueryFilter::default().with_excluded_entities([entity]);

        let hit = spatial_query.cast_shape(
            &Collider::sphere(probe_radius),
            transform.translation,
            Quat::IDENTITY,
            Dir3::NEG_Y,
            &ShapeCastConfig::from_max_distance(probe_distance),
            &filter,
        );

        let on_ground = hit.is_some() && velocity.y <= LIFT_OFF_SPEED;
        let mode = if on_ground {
            MovementMode::Walking
        } else {
            MovementMode::Falling
        };
        if motor.mode != mode {
            motor.mode = mode;
        }

        if on_ground && !was_walking {
            motor.just_landed = true;
            debug!("Landed: entity={}", entity);
        } else if !on_ground && was_walking {
            debug!("Left ground: entity={}, vy={}", entity, velocity.y);
        }
    }
}

/// Runs the landing hook for characters that touched down this frame.
pub(crate) fn dispatch_landing(
    scene: SceneQueries,
    mut audio: FootstepAudio,
    mut rng: ResMut<FootstepRng>,
    mut characters: Query<CharacterData>,
    mut landings: MessageWriter<CharacterLanded>,
    mut footsteps: MessageWriter<FootstepEvent>,
) {
    for (entity, mut character, mut motor, capsule, rig, transform, velocity, mut controller) in
        &mut characters
    {
        if !motor.just_landed {
            continue;
        }
        motor.just_landed = false;

        let settings = Arc::clone(character.settings());
        let mut body = CharacterBody {
            entity,
            transform,
            velocity,
            motor,
            capsule,
            rig,
            scene: &scene,
        };
        let (_, mut shakes) = split_controller(controller.as_deref_mut(), &settings.camera_shakes);
        let mut feedback = Feedback {
            shakes: as_shake_host(&mut shakes),
            sounds: &mut audio,
            rng: &mut rng.0,
        };

        landings.write(CharacterLanded { entity });
        if let Some(cue) = character.landed(&mut body, &mut feedback) {
            footsteps.write(footstep_event(entity, cue));
        }
    }
}

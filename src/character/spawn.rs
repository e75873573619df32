//! Character domain: spawning a character with its camera.

use std::sync::Arc;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::character::{
    AutoPossessPlayer, CameraRig, CapsuleShape, CharacterMotor, FirstPersonCamera,
    FirstPersonCharacter,
};
use crate::settings::CharacterSettings;

/// Gap between the listener's ears, in meters.
const EAR_GAP: f32 = 0.2;

/// Components of an auto-possessed character body standing with its
/// capsule centre at `at`. Settings that fail validation are sanitized.
pub fn first_person_character_bundle(settings: Arc<CharacterSettings>, at: Vec3) -> impl Bundle {
    let character = FirstPersonCharacter::new(settings);
    let body = &character.settings().body;
    let capsule = CapsuleShape {
        radius: body.capsule_radius,
        half_height: body.capsule_half_height,
    };
    let rig = CameraRig {
        offset: body.camera_offset.into(),
    };

    (
        Name::new("FirstPersonCharacter"),
        character,
        CharacterMotor::default(),
        capsule,
        rig,
        AutoPossessPlayer,
        RigidBody::Dynamic,
        capsule.collider(),
        LockedAxes::ROTATION_LOCKED,
        Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
        Transform::from_translation(at),
        Visibility::default(),
    )
}

/// Spawns a character with a first person camera child. Returns the
/// character entity.
pub fn spawn_first_person_character(
    commands: &mut Commands,
    settings: Arc<CharacterSettings>,
    at: Vec3,
) -> Entity {
    let character = commands.spawn(first_person_character_bundle(settings, at)).id();

    // Placed at the rig offset by the view system.
    commands.spawn((
        Name::new("FirstPersonCamera"),
        Camera3d::default(),
        Transform::default(),
        SpatialListener::new(EAR_GAP),
        FirstPersonCamera { character },
        ChildOf(character),
    ));

    character
}

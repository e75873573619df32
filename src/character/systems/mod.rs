//! Character domain: system modules driving the character from ECS data.

pub(crate) mod ground;
pub(crate) mod input;
pub(crate) mod lifecycle;
pub(crate) mod locomotion;
pub(crate) mod presentation;
pub(crate) mod tick;

pub(crate) use ground::{detect_ground, dispatch_landing};
pub(crate) use input::{dispatch_player_input, read_player_input};
pub(crate) use lifecycle::{begin_play_characters, possess_characters, seed_footstep_rng};
pub(crate) use locomotion::apply_motor;
pub(crate) use presentation::{advance_camera_shakes, apply_view, sync_capsule_collider};
pub(crate) use tick::tick_characters;

use avian3d::prelude::LinearVelocity;
use bevy::prelude::*;

use crate::character::{
    CameraRig, CapsuleShape, CharacterMotor, ControlRotation, FirstPersonCharacter,
    FootstepEvent, PlayerController,
};
use crate::footsteps::FootstepCue;
use crate::host::ShakeHost;
use crate::shake::{CameraShakes, ControllerShakes};

/// Everything a character system needs to build a [`CharacterBody`].
///
/// [`CharacterBody`]: crate::character::CharacterBody
pub(crate) type CharacterData = (
    Entity,
    &'static mut FirstPersonCharacter,
    &'static mut CharacterMotor,
    &'static mut CapsuleShape,
    &'static mut CameraRig,
    &'static mut Transform,
    &'static LinearVelocity,
    Option<&'static mut PlayerController>,
);

/// Splits a possessing controller into its view rotation and shake host.
pub(crate) fn split_controller<'a>(
    controller: Option<&'a mut PlayerController>,
    presets: &'a CameraShakes,
) -> (Option<&'a mut ControlRotation>, Option<ControllerShakes<'a>>) {
    match controller {
        Some(controller) => (
            Some(&mut controller.control),
            Some(ControllerShakes {
                active: &mut controller.shakes,
                presets,
            }),
        ),
        None => (None, None),
    }
}

pub(crate) fn as_shake_host<'a>(
    shakes: &'a mut Option<ControllerShakes<'_>>,
) -> Option<&'a mut dyn ShakeHost> {
    shakes.as_mut().map(|shakes| shakes as &mut dyn ShakeHost)
}

pub(crate) fn footstep_event(entity: Entity, cue: FootstepCue) -> FootstepEvent {
    FootstepEvent {
        entity,
        location: cue.location,
        surface: cue.surface,
        sound: cue.sound,
        volume: cue.volume,
    }
}

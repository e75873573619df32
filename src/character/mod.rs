//! Character domain: the first person character, its ECS glue and systems.

mod body;
mod components;
mod controller;
mod events;
mod look;
mod spawn;
pub(crate) mod systems;

#[cfg(test)]
mod tests;

pub use body::{CharacterBody, FLOOR_PROBE_MARGIN, FootstepAudio, SceneQueries};
pub use components::{
    AutoPossessPlayer, CameraRig, CapsuleShape, CharacterMotor, FirstPersonCamera, FootstepRng,
    MovementMode, PlayerController, SurfaceMaterial,
};
pub use controller::{CharacterRequest, Feedback, FirstPersonCharacter, TICK_PHASES, TickPhase};
pub use events::{CharacterLanded, FootstepEvent, InteractEvent};
pub use look::ControlRotation;
pub use spawn::{first_person_character_bundle, spawn_first_person_character};
pub use systems::input::{
    ActionEdge, ActionState, AxisInput, MOUSE_AXIS_SCALE, PlayerInput, action_states, axis_value,
};
pub use systems::locomotion::horizontal_velocity;

use bevy::prelude::*;

use crate::character::systems::{
    advance_camera_shakes, apply_motor, apply_view, begin_play_characters, detect_ground,
    dispatch_landing, dispatch_player_input, possess_characters, read_player_input,
    seed_footstep_rng, sync_capsule_collider, tick_characters,
};

/// Per-frame ordering of the character systems.
///
/// Tick runs before locomotion so camera shake selection sees the velocity
/// the previous physics step produced.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstPersonSet {
    Input,
    Tick,
    Locomotion,
    Detection,
    Presentation,
}

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_message::<FootstepEvent>()
            .add_message::<InteractEvent>()
            .add_message::<CharacterLanded>()
            .configure_sets(
                Update,
                (
                    FirstPersonSet::Input,
                    FirstPersonSet::Tick,
                    FirstPersonSet::Locomotion,
                    FirstPersonSet::Detection,
                    FirstPersonSet::Presentation,
                )
                    .chain(),
            )
            .add_systems(Startup, seed_footstep_rng)
            .add_systems(
                Update,
                (
                    possess_characters,
                    begin_play_characters,
                    read_player_input,
                    dispatch_player_input,
                )
                    .chain()
                    .in_set(FirstPersonSet::Input),
            )
            .add_systems(Update, tick_characters.in_set(FirstPersonSet::Tick))
            .add_systems(Update, apply_motor.in_set(FirstPersonSet::Locomotion))
            .add_systems(
                Update,
                (detect_ground, dispatch_landing)
                    .chain()
                    .in_set(FirstPersonSet::Detection),
            )
            .add_systems(
                Update,
                (sync_capsule_collider, advance_camera_shakes, apply_view)
                    .chain()
                    .in_set(FirstPersonSet::Presentation),
            );
    }
}

//! Character domain: begin play, possession and footstep RNG seeding.

use bevy::prelude::*;

use crate::bindings::{InputSettings, setup_input_bindings};
use crate::character::systems::CharacterData;
use crate::character::{
    AutoPossessPlayer, CharacterBody, FirstPersonCharacter, FootstepRng, PlayerController,
    SceneQueries,
};
use crate::settings::CharacterSettings;

pub(crate) fn seed_footstep_rng(
    mut commands: Commands,
    settings: Option<Res<CharacterSettings>>,
    existing: Option<Res<FootstepRng>>,
) {
    if existing.is_some() {
        return;
    }

    let seed = settings.and_then(|settings| settings.footsteps.seed);
    if let Some(seed) = seed {
        info!("Footstep RNG seeded with {}", seed);
    }
    commands.insert_resource(FootstepRng::from_seed(seed));
}

pub(crate) fn begin_play_characters(
    scene: SceneQueries,
    mut characters: Query<CharacterData, Added<FirstPersonCharacter>>,
) {
    for (entity, mut character, motor, capsule, rig, transform, velocity, _) in &mut characters {
        let mut body = CharacterBody {
            entity,
            transform,
            velocity,
            motor,
            capsule,
            rig,
            scene: &scene,
        };
        character.begin_play(&mut body);
        info!(
            "Character {} began play: walk_speed={}, crouch_action={:?}",
            entity,
            character.current_walk_speed(),
            character.settings().movement.crouch_action
        );
    }
}

/// Hands auto-possessed characters to the local player and installs the
/// key mappings their settings ask for.
pub(crate) fn possess_characters(
    mut commands: Commands,
    mut bindings: Option<ResMut<InputSettings>>,
    characters: Query<
        (Entity, &FirstPersonCharacter),
        (With<AutoPossessPlayer>, Without<PlayerController>),
    >,
) {
    for (entity, character) in &characters {
        commands.entity(entity).insert(PlayerController::default());

        match bindings.as_deref_mut() {
            Some(bindings) => setup_input_bindings(
                bindings,
                character.settings().use_custom_key_mappings,
            ),
            None => warn!("No input settings; character {} has no key mappings", entity),
        }
        info!("Player possessed character {}", entity);
    }
}

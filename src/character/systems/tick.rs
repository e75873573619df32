//! Character domain: the per-frame character tick.

use std::sync::Arc;

use bevy::prelude::*;

use crate::character::systems::{CharacterData, as_shake_host, split_controller};
use crate::character::{CharacterBody, SceneQueries};

pub(crate) fn tick_characters(
    time: Res<Time>,
    scene: SceneQueries,
    mut characters: Query<CharacterData>,
) {
    let dt = time.delta_secs();

    for (entity, mut character, motor, capsule, rig, transform, velocity, mut controller) in
        &mut characters
    {
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

        character.tick(dt, &mut body, as_shake_host(&mut shakes));
    }
}

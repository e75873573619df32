//! Debug gizmos for the character collision probes.
//!
//! F1 toggles drawing of the capsule, the stand-up sweep and the footstep
//! floor probe for every character.

use bevy::prelude::*;

use crate::character::{CapsuleShape, FLOOR_PROBE_MARGIN, FirstPersonCharacter, FirstPersonSet};
use crate::crouch::{CrouchPhase, block_sweep_distance};

#[derive(Resource, Debug, Default)]
pub struct DebugGizmos {
    pub visible: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugGizmos>().add_systems(
            Update,
            (
                toggle_debug_gizmos,
                draw_character_probes
                    .run_if(|state: Res<DebugGizmos>| state.visible)
                    .after(FirstPersonSet::Presentation),
            ),
        );
    }
}

fn toggle_debug_gizmos(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<DebugGizmos>) {
    if keyboard.just_pressed(KeyCode::F1) {
        state.visible = !state.visible;
        info!("Debug gizmos {}", if state.visible { "on" } else { "off" });
    }
}

fn draw_character_probes(
    mut gizmos: Gizmos,
    characters: Query<(&FirstPersonCharacter, &CapsuleShape, &GlobalTransform)>,
) {
    for (character, capsule, transform) in &characters {
        let centre = transform.translation();

        let capsule_color = match character.crouch_phase() {
            CrouchPhase::Standing => Color::srgb(0.2, 0.9, 0.3),
            CrouchPhase::InTransition => Color::srgb(0.9, 0.8, 0.2),
            CrouchPhase::Crouching => Color::srgb(0.2, 0.6, 0.9),
        };
        gizmos.primitive_3d(
            &Capsule3d::new(capsule.radius, capsule.segment_length()),
            Isometry3d::from_translation(centre),
            capsule_color,
        );

        let settings = character.settings();
        let sweep = block_sweep_distance(
            &settings.movement,
            character.baseline(),
            capsule.half_height,
            capsule.radius,
        );
        let sweep_end = centre + Vec3::Y * sweep;
        gizmos.line(centre, sweep_end, Color::srgb(0.9, 0.3, 0.2));
        gizmos.sphere(
            Isometry3d::from_translation(sweep_end),
            capsule.radius,
            Color::srgb(0.9, 0.3, 0.2),
        );

        let floor_reach = capsule.half_height + FLOOR_PROBE_MARGIN;
        gizmos.line(
            centre,
            centre + Vec3::NEG_Y * floor_reach,
            Color::srgb(0.8, 0.8, 0.8),
        );
    }
}

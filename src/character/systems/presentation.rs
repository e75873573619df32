//! Character domain: collider sync, shake playback and camera placement.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::character::{CameraRig, CapsuleShape, FirstPersonCamera, PlayerController};

pub(crate) fn sync_capsule_collider(
    mut query: Query<(&CapsuleShape, &mut Collider), Changed<CapsuleShape>>,
) {
    for (capsule, mut collider) in &mut query {
        *collider = capsule.collider();
    }
}

pub(crate) fn advance_camera_shakes(time: Res<Time>, mut query: Query<&mut PlayerController>) {
    let dt = time.delta_secs();

    for mut controller in &mut query {
        if !controller.shakes.instances().is_empty() {
            controller.shakes.advance(dt);
        }
    }
}

/// Places each first person camera at its character's rig offset and
/// orients it by the control rotation plus the summed shake offset.
pub(crate) fn apply_view(
    characters: Query<(&CameraRig, Option<&PlayerController>)>,
    mut cameras: Query<(&FirstPersonCamera, &mut Transform)>,
) {
    for (camera, mut transform) in &mut cameras {
        let Ok((rig, controller)) = characters.get(camera.character) else {
            continue;
        };

        let Some(controller) = controller else {
            transform.translation = rig.offset;
            continue;
        };

        let view = controller.control.yaw_quat() * controller.control.pitch_quat();
        let shake = controller.shakes.sample();

        transform.translation = rig.offset + view * shake.location;
        transform.rotation = view * shake.rotation_quat();
    }
}

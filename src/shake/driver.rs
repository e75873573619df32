//! Shake domain: which shakes to start each tick and on jump/landing.

use bevy::prelude::*;

use crate::host::{MovementHost, ShakeHost};
use crate::shake::ShakeKind;

pub const IDLE_SHAKE_SCALE: f32 = 1.0;
pub const WALK_SHAKE_SCALE: f32 = 2.0;
pub const RUN_SHAKE_SCALE: f32 = 1.0;
pub const JUMP_SHAKE_SCALE: f32 = 1.0;
pub const LANDING_SHAKE_SCALE: f32 = 3.0;

/// Per-tick shake selection.
///
/// Walk or idle is always started; run is started on top when the current
/// max walk speed has reached `run_speed`. Nothing is gated on what was
/// playing before.
pub fn update_camera_shake<H: MovementHost + ?Sized>(
    host: &H,
    run_speed: f32,
    shakes: Option<&mut (dyn ShakeHost + '_)>,
) {
    let Some(shakes) = shakes else {
        debug!("Camera shake skipped: character has no controller");
        return;
    };

    let moving = host.velocity().length() > 0.0;
    let can_jump = host.can_jump();

    if moving && can_jump {
        shakes.start_camera_shake(ShakeKind::Walk, WALK_SHAKE_SCALE);
    } else {
        shakes.start_camera_shake(ShakeKind::Idle, IDLE_SHAKE_SCALE);
    }

    if moving && host.max_walk_speed() >= run_speed && can_jump {
        shakes.start_camera_shake(ShakeKind::Run, RUN_SHAKE_SCALE);
    }
}

/// One-shot jump shake, at landing intensity when `landed` is set.
pub fn play_jump_shake(shakes: Option<&mut (dyn ShakeHost + '_)>, landed: bool) {
    let Some(shakes) = shakes else {
        debug!("Jump shake skipped: character has no controller");
        return;
    };

    let scale = if landed {
        LANDING_SHAKE_SCALE
    } else {
        JUMP_SHAKE_SCALE
    };
    shakes.start_camera_shake(ShakeKind::Jump, scale);
}

//! Character domain: turns motor input into rigid body velocity.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::character::{CharacterMotor, MovementMode};

/// Horizontal velocity for this frame's input.
///
/// Grounded characters move at full walk speed along the clamped input.
/// Falling characters steer toward it by the air control fraction.
pub fn horizontal_velocity(motor: &CharacterMotor, current: Vec3) -> Vec3 {
    let wish = Vec3::new(motor.pending_input.x, 0.0, motor.pending_input.z).clamp_length_max(1.0);
    let target = wish * motor.max_walk_speed;
    let current = Vec3::new(current.x, 0.0, current.z);

    match motor.mode {
        MovementMode::Walking => target,
        MovementMode::Falling if wish != Vec3::ZERO => {
            current.lerp(target, motor.air_control.clamp(0.0, 1.0))
        }
        MovementMode::Falling => current,
    }
}

pub(crate) fn apply_motor(mut query: Query<(&mut CharacterMotor, &mut LinearVelocity)>) {
    for (mut motor, mut velocity) in &mut query {
        let horizontal = horizontal_velocity(&motor, velocity.0);
        velocity.x = horizontal.x;
        velocity.z = horizontal.z;

        if motor.jump_requested && motor.mode == MovementMode::Walking {
            velocity.y = motor.jump_velocity;
            motor.mode = MovementMode::Falling;
            motor.jump_requested = false;
            debug!("Jump: vy={}", velocity.y);
        }

        motor.pending_input = Vec3::ZERO;
    }
}

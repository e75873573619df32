//! Range checks for character settings.

use std::collections::HashSet;

use bevy::prelude::*;

use super::data::CharacterSettings;

pub const MIN_SPEED: f32 = 0.01;
pub const MAX_SPEED: f32 = 100.0;
pub const MAX_TRANSITION_SPEED: f32 = 1000.0;
pub const MAX_BLOCK_TEST_OFFSET: f32 = 2.0;
pub const PITCH_LIMIT: f32 = 360.0;
pub const MIN_CAPSULE_RADIUS: f32 = 0.01;
pub const MIN_STRIDE: f32 = 0.01;

/// A settings value that is out of range or inconsistent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

macro_rules! check_range {
    ($errors:expr, $value:expr, $min:expr, $max:expr, $field:expr) => {
        if !($min..=$max).contains(&$value) {
            $errors.push(ValidationError {
                field: $field.to_string(),
                message: format!("{} is outside {}..={}", $value, $min, $max),
            });
        }
    };
}

/// Validate all settings. Returns an empty list when everything is usable.
pub fn validate_settings(settings: &CharacterSettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let movement = &settings.movement;

    check_range!(errors, movement.walk_speed, MIN_SPEED, MAX_SPEED, "movement.walk_speed");
    check_range!(errors, movement.crouch_speed, MIN_SPEED, MAX_SPEED, "movement.crouch_speed");
    check_range!(errors, movement.run_speed, MIN_SPEED, MAX_SPEED, "movement.run_speed");
    check_range!(errors, movement.jump_velocity, MIN_SPEED, MAX_SPEED, "movement.jump_velocity");
    check_range!(
        errors,
        movement.transition_speed,
        MIN_SPEED,
        MAX_TRANSITION_SPEED,
        "movement.transition_speed"
    );
    check_range!(
        errors,
        movement.block_test_offset,
        0.0,
        MAX_BLOCK_TEST_OFFSET,
        "movement.block_test_offset"
    );
    check_range!(errors, movement.air_control, 0.0, 1.0, "movement.air_control");

    let camera = &settings.camera;
    check_range!(errors, camera.sensitivity_x, 0.0, f32::MAX, "camera.sensitivity_x");
    check_range!(errors, camera.sensitivity_y, 0.0, f32::MAX, "camera.sensitivity_y");
    check_range!(errors, camera.min_pitch, -PITCH_LIMIT, PITCH_LIMIT, "camera.min_pitch");
    check_range!(errors, camera.max_pitch, -PITCH_LIMIT, PITCH_LIMIT, "camera.max_pitch");
    if camera.min_pitch > camera.max_pitch {
        errors.push(ValidationError {
            field: "camera.min_pitch".to_string(),
            message: format!(
                "min pitch {} is above max pitch {}",
                camera.min_pitch, camera.max_pitch
            ),
        });
    }

    let body = &settings.body;
    if !body.capsule_radius.is_finite() || body.capsule_radius <= 0.0 {
        errors.push(ValidationError {
            field: "body.capsule_radius".to_string(),
            message: "must be positive".to_string(),
        });
    }
    if body.capsule_half_height.is_nan() || body.capsule_half_height < body.capsule_radius {
        errors.push(ValidationError {
            field: "body.capsule_half_height".to_string(),
            message: format!(
                "{} is smaller than the capsule radius {}",
                body.capsule_half_height, body.capsule_radius
            ),
        });
    }

    let footsteps = &settings.footsteps;
    if !footsteps.initial_stride.is_finite() || footsteps.initial_stride <= 0.0 {
        errors.push(ValidationError {
            field: "footsteps.initial_stride".to_string(),
            message: "must be positive".to_string(),
        });
    }
    check_range!(
        errors,
        footsteps.crouched_volume,
        0.0,
        1.0,
        "footsteps.crouched_volume"
    );

    let mut seen = HashSet::new();
    for (i, mapping) in footsteps.mappings.iter().enumerate() {
        let field = format!("footsteps.mappings[{}]", i);
        if mapping.surface.is_empty() {
            errors.push(ValidationError {
                field: field.clone(),
                message: "surface is empty".to_string(),
            });
        } else if !seen.insert(mapping.surface.as_str()) {
            errors.push(ValidationError {
                field: field.clone(),
                message: format!(
                    "surface '{}' is already mapped; this entry is never used",
                    mapping.surface
                ),
            });
        }
        if mapping.sounds.is_empty() {
            errors.push(ValidationError {
                field: field.clone(),
                message: "has no sounds".to_string(),
            });
        }
        if mapping.stride_walk <= 0.0 || mapping.stride_run <= 0.0 || mapping.stride_crouch <= 0.0
        {
            errors.push(ValidationError {
                field,
                message: "strides must be positive".to_string(),
            });
        }
    }

    errors
}

/// Clamps `value` into `min..=max`; NaN and infinities become `fallback`.
fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Clamps numeric settings into their usable ranges.
///
/// Values that are not finite fall back to the defaults.
pub fn sanitize_settings(settings: &mut CharacterSettings) {
    let defaults = CharacterSettings::default();

    let movement = &mut settings.movement;
    let fallback = &defaults.movement;
    movement.walk_speed =
        clamp_finite(movement.walk_speed, MIN_SPEED, MAX_SPEED, fallback.walk_speed);
    movement.crouch_speed =
        clamp_finite(movement.crouch_speed, MIN_SPEED, MAX_SPEED, fallback.crouch_speed);
    movement.run_speed = clamp_finite(movement.run_speed, MIN_SPEED, MAX_SPEED, fallback.run_speed);
    movement.jump_velocity =
        clamp_finite(movement.jump_velocity, MIN_SPEED, MAX_SPEED, fallback.jump_velocity);
    movement.transition_speed = clamp_finite(
        movement.transition_speed,
        MIN_SPEED,
        MAX_TRANSITION_SPEED,
        fallback.transition_speed,
    );
    movement.block_test_offset = clamp_finite(
        movement.block_test_offset,
        0.0,
        MAX_BLOCK_TEST_OFFSET,
        fallback.block_test_offset,
    );
    movement.air_control = clamp_finite(movement.air_control, 0.0, 1.0, fallback.air_control);

    let camera = &mut settings.camera;
    let fallback = &defaults.camera;
    camera.sensitivity_x =
        clamp_finite(camera.sensitivity_x, 0.0, f32::MAX, fallback.sensitivity_x);
    camera.sensitivity_y =
        clamp_finite(camera.sensitivity_y, 0.0, f32::MAX, fallback.sensitivity_y);
    camera.min_pitch =
        clamp_finite(camera.min_pitch, -PITCH_LIMIT, PITCH_LIMIT, fallback.min_pitch);
    camera.max_pitch = clamp_finite(
        camera.max_pitch,
        camera.min_pitch,
        PITCH_LIMIT,
        fallback.max_pitch.max(camera.min_pitch),
    );

    let body = &mut settings.body;
    let fallback = &defaults.body;
    body.capsule_radius = clamp_finite(
        body.capsule_radius,
        MIN_CAPSULE_RADIUS,
        f32::MAX,
        fallback.capsule_radius,
    );
    body.capsule_half_height = clamp_finite(
        body.capsule_half_height,
        body.capsule_radius,
        f32::MAX,
        body.capsule_radius.max(fallback.capsule_half_height),
    );

    let footsteps = &mut settings.footsteps;
    let fallback = &defaults.footsteps;
    footsteps.initial_stride = clamp_finite(
        footsteps.initial_stride,
        MIN_STRIDE,
        f32::MAX,
        fallback.initial_stride,
    );
    footsteps.crouched_volume =
        clamp_finite(footsteps.crouched_volume, 0.0, 1.0, fallback.crouched_volume);
}

/// Logs every validation error and sanitizes the settings if there were any.
///
/// Returns how many errors were found.
pub fn enforce_valid_settings(settings: &mut CharacterSettings) -> usize {
    let errors = validate_settings(settings);
    for error in &errors {
        warn!("Invalid character setting {}", error);
    }
    if !errors.is_empty() {
        sanitize_settings(settings);
    }
    errors.len()
}

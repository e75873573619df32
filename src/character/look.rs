//! Character domain: controller view rotation.

use bevy::prelude::*;

/// View rotation owned by the possessing controller, in degrees.
///
/// Positive yaw input turns right and positive pitch input looks down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw - delta).rem_euclid(360.0);
    }

    /// Bounds given in the wrong order are swapped.
    pub fn add_pitch(&mut self, delta: f32, min_pitch: f32, max_pitch: f32) {
        let (low, high) = (min_pitch.min(max_pitch), min_pitch.max(max_pitch));
        self.pitch = (self.pitch - delta).clamp(low, high);
    }

    pub fn yaw_quat(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    pub fn pitch_quat(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Forward direction with pitch ignored.
    pub fn flat_forward(&self) -> Vec3 {
        self.yaw_quat() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.yaw_quat() * Vec3::X
    }
}

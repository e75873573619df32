//! Shake domain: shake kinds and their authored presets.

use serde::{Deserialize, Serialize};

use crate::settings::Vec3Def;

/// The four shake slots a character can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShakeKind {
    Idle,
    Walk,
    Run,
    Jump,
}

/// Oscillating camera shake description.
///
/// Rotational amplitudes are degrees of (pitch, yaw, roll); positional
/// amplitudes are world units along the camera's local axes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraShakePreset {
    /// Seconds an instance lasts after its latest (re)start.
    pub duration: f32,
    pub blend_in: f32,
    pub blend_out: f32,
    pub rotation_amplitude: Vec3Def,
    pub rotation_frequency: f32,
    pub location_amplitude: Vec3Def,
    pub location_frequency: f32,
}

impl Default for CameraShakePreset {
    fn default() -> Self {
        Self {
            duration: 0.5,
            blend_in: 0.1,
            blend_out: 0.2,
            rotation_amplitude: Vec3Def {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            rotation_frequency: 1.0,
            location_amplitude: Vec3Def {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            location_frequency: 1.0,
        }
    }
}

/// Preset per slot. An empty slot makes starting that kind a no-op.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraShakes {
    pub idle: Option<CameraShakePreset>,
    pub walk: Option<CameraShakePreset>,
    pub run: Option<CameraShakePreset>,
    pub jump: Option<CameraShakePreset>,
}

impl Default for CameraShakes {
    fn default() -> Self {
        Self {
            idle: Some(CameraShakePreset {
                duration: 1.0,
                blend_in: 0.5,
                blend_out: 0.5,
                rotation_amplitude: Vec3Def {
                    x: 0.15,
                    y: 0.05,
                    z: 0.0,
                },
                rotation_frequency: 0.3,
                ..Default::default()
            }),
            walk: Some(CameraShakePreset {
                duration: 0.5,
                rotation_amplitude: Vec3Def {
                    x: 0.2,
                    y: 0.1,
                    z: 0.1,
                },
                rotation_frequency: 1.8,
                location_amplitude: Vec3Def {
                    x: 0.0,
                    y: 0.01,
                    z: 0.0,
                },
                location_frequency: 3.6,
                ..Default::default()
            }),
            run: Some(CameraShakePreset {
                duration: 0.5,
                rotation_amplitude: Vec3Def {
                    x: 0.5,
                    y: 0.2,
                    z: 0.2,
                },
                rotation_frequency: 2.6,
                location_amplitude: Vec3Def {
                    x: 0.0,
                    y: 0.02,
                    z: 0.0,
                },
                location_frequency: 5.2,
                ..Default::default()
            }),
            jump: Some(CameraShakePreset {
                duration: 0.25,
                blend_in: 0.02,
                blend_out: 0.15,
                rotation_amplitude: Vec3Def {
                    x: 0.6,
                    y: 0.0,
                    z: 0.0,
                },
                rotation_frequency: 8.0,
                ..Default::default()
            }),
        }
    }
}

impl CameraShakes {
    pub fn preset(&self, kind: ShakeKind) -> Option<&CameraShakePreset> {
        match kind {
            ShakeKind::Idle => self.idle.as_ref(),
            ShakeKind::Walk => self.walk.as_ref(),
            ShakeKind::Run => self.run.as_ref(),
            ShakeKind::Jump => self.jump.as_ref(),
        }
    }
}

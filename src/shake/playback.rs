//! Shake domain: active shake instances and their combined offset.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::host::ShakeHost;
use crate::shake::{CameraShakePreset, CameraShakes, ShakeKind};

#[derive(Debug, Clone)]
pub struct ShakeInstance {
    pub kind: ShakeKind,
    pub preset: CameraShakePreset,
    pub scale: f32,
    /// Oscillator time since the instance first started.
    pub elapsed: f32,
    pub remaining: f32,
}

impl ShakeInstance {
    fn weight(&self) -> f32 {
        let blend_in = if self.preset.blend_in > 0.0 {
            (self.elapsed / self.preset.blend_in).min(1.0)
        } else {
            1.0
        };
        let blend_out = if self.preset.blend_out > 0.0 {
            (self.remaining / self.preset.blend_out).min(1.0)
        } else {
            1.0
        };
        blend_in * blend_out * self.scale
    }
}

/// Combined shake to apply on top of the camera's view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShakeOffset {
    /// Degrees of (pitch, yaw, roll).
    pub rotation: Vec3,
    pub location: Vec3,
}

impl ShakeOffset {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }
}

/// Shakes currently playing on a controller. One instance per kind.
#[derive(Debug, Clone, Default)]
pub struct ActiveShakes {
    instances: Vec<ShakeInstance>,
}

impl ActiveShakes {
    pub fn instances(&self) -> &[ShakeInstance] {
        &self.instances
    }

    pub fn is_playing(&self, kind: ShakeKind) -> bool {
        self.instances.iter().any(|instance| instance.kind == kind)
    }

    /// Starts `kind`, or refreshes it if it is already playing.
    ///
    /// A refresh restores the full duration and takes the new scale but keeps
    /// the oscillator running so continuous shakes stay smooth.
    pub fn start(&mut self, kind: ShakeKind, preset: &CameraShakePreset, scale: f32) {
        if let Some(instance) = self.instances.iter_mut().find(|i| i.kind == kind) {
            instance.scale = scale;
            instance.remaining = preset.duration;
            return;
        }

        self.instances.push(ShakeInstance {
            kind,
            preset: preset.clone(),
            scale,
            elapsed: 0.0,
            remaining: preset.duration,
        });
    }

    pub fn advance(&mut self, dt: f32) {
        for instance in &mut self.instances {
            instance.elapsed += dt;
            instance.remaining -= dt;
        }
        self.instances.retain(|instance| instance.remaining > 0.0);
    }

    pub fn sample(&self) -> ShakeOffset {
        let mut offset = ShakeOffset::default();

        for instance in &self.instances {
            let weight = instance.weight();
            let preset = &instance.preset;
            let rotation = Vec3::from(preset.rotation_amplitude);
            let location = Vec3::from(preset.location_amplitude);
            let rot_phase = TAU * preset.rotation_frequency * instance.elapsed;
            let loc_phase = TAU * preset.location_frequency * instance.elapsed;

            // Quarter-turn phase steps keep the axes from moving in lockstep.
            offset.rotation += weight * rotation * oscillate(rot_phase);
            offset.location += weight * location * oscillate(loc_phase);
        }

        offset
    }
}

fn oscillate(phase: f32) -> Vec3 {
    Vec3::new(
        phase.sin(),
        (phase + TAU * 0.25).sin(),
        (phase + TAU * 0.5).sin(),
    )
}

/// [`ShakeHost`] over a controller's active shakes and the character presets.
pub struct ControllerShakes<'a> {
    pub active: &'a mut ActiveShakes,
    pub presets: &'a CameraShakes,
}

impl ShakeHost for ControllerShakes<'_> {
    fn start_camera_shake(&mut self, kind: ShakeKind, scale: f32) {
        match self.presets.preset(kind) {
            Some(preset) => self.active.start(kind, preset, scale),
            None => debug!("No camera shake preset for {:?}", kind),
        }
    }
}

//! Crouch domain: stance transitions and the stand-up blocked test.

use bevy::prelude::*;

use crate::crouch::{CrouchAction, CrouchPhase};
use crate::host::{CameraHost, CharacterHost, CollisionHost, MovementHost};
use crate::settings::{BodySettings, MovementSettings};

/// A transition commits once the capsule half-height is this close to target.
pub const TRANSITION_TOLERANCE: f32 = 0.02;

/// Camera and capsule placement captured once at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceBaseline {
    pub camera_offset: Vec3,
    pub capsule_half_height: f32,
}

impl StanceBaseline {
    pub fn capture<H: CollisionHost + CameraHost>(host: &H) -> Self {
        Self {
            camera_offset: host.camera_offset(),
            capsule_half_height: host.capsule_half_height(),
        }
    }
}

/// Values a transition interpolates toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceTarget {
    pub camera_offset: Vec3,
    pub capsule_half_height: f32,
    pub walk_speed: f32,
}

impl StanceTarget {
    pub fn crouched(
        baseline: &StanceBaseline,
        body: &BodySettings,
        movement: &MovementSettings,
    ) -> Self {
        Self {
            camera_offset: Vec3 {
                y: body.crouched_camera_height,
                ..baseline.camera_offset
            },
            capsule_half_height: baseline.capsule_half_height / 2.0,
            walk_speed: movement.crouch_speed,
        }
    }

    pub fn standing(baseline: &StanceBaseline, walk_speed: f32) -> Self {
        Self {
            camera_offset: baseline.camera_offset,
            capsule_half_height: baseline.capsule_half_height,
            walk_speed,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrouchState {
    phase: CrouchPhase,
    wants_to_crouch: bool,
}

impl CrouchState {
    pub fn phase(&self) -> CrouchPhase {
        self.phase
    }

    pub fn wants_to_crouch(&self) -> bool {
        self.wants_to_crouch
    }

    pub fn is_standing(&self) -> bool {
        self.phase == CrouchPhase::Standing
    }

    /// Crouch key pressed.
    pub fn press<H: MovementHost + CollisionHost>(
        &mut self,
        movement: &MovementSettings,
        baseline: &StanceBaseline,
        host: &H,
    ) {
        match movement.crouch_action {
            CrouchAction::Hold => {
                self.wants_to_crouch = true;
                self.phase = CrouchPhase::InTransition;
            }
            CrouchAction::Toggle => {
                if !self.wants_to_crouch {
                    self.wants_to_crouch = true;
                    self.phase = CrouchPhase::InTransition;
                } else if !is_blocked(movement, baseline, host) {
                    self.wants_to_crouch = false;
                    self.phase = CrouchPhase::InTransition;
                } else {
                    debug!("Crouch toggle ignored: blocked above");
                }
            }
        }
    }

    /// Crouch key released. Only Hold mode reacts.
    pub fn release(&mut self, movement: &MovementSettings) {
        if movement.crouch_action == CrouchAction::Hold {
            self.wants_to_crouch = false;
            self.phase = CrouchPhase::InTransition;
        }
    }

    /// Advances an in-progress transition by one frame.
    ///
    /// `standing_speed` is the walk speed to restore when the character is
    /// back on its feet. Standing up stalls while [`is_blocked`] reports an
    /// obstruction.
    pub fn update<H: CharacterHost>(
        &mut self,
        dt: f32,
        movement: &MovementSettings,
        body: &BodySettings,
        baseline: &StanceBaseline,
        standing_speed: f32,
        host: &mut H,
    ) {
        if self.phase != CrouchPhase::InTransition {
            return;
        }

        let alpha = (movement.transition_speed * dt).clamp(0.0, 1.0);

        if self.wants_to_crouch {
            let target = StanceTarget::crouched(baseline, body, movement);
            self.step_toward(target, alpha, CrouchPhase::Crouching, host);
        } else if !is_blocked(movement, baseline, host) {
            let target = StanceTarget::standing(baseline, standing_speed);
            self.step_toward(target, alpha, CrouchPhase::Standing, host);
        }
    }

    fn step_toward<H: CharacterHost>(
        &mut self,
        target: StanceTarget,
        alpha: f32,
        terminal: CrouchPhase,
        host: &mut H,
    ) {
        let half_height = host
            .capsule_half_height()
            .lerp(target.capsule_half_height, alpha);

        if (half_height - target.capsule_half_height).abs() <= TRANSITION_TOLERANCE {
            host.set_camera_offset(target.camera_offset);
            host.set_capsule_half_height(target.capsule_half_height);
            host.set_max_walk_speed(target.walk_speed);
            self.phase = terminal;
            debug!("Crouch transition committed: {:?}", terminal);
        } else {
            let offset = host.camera_offset().lerp(target.camera_offset, alpha);
            let speed = host.max_walk_speed().lerp(target.walk_speed, alpha);
            host.set_camera_offset(offset);
            host.set_capsule_half_height(half_height);
            host.set_max_walk_speed(speed);
        }
    }
}

/// Upward sphere sweep sized to the capsule radius.
///
/// Hold mode sweeps the current half-height (without hemisphere) plus the
/// configured offset; Toggle mode sweeps the standing half-height. Hits on
/// physics-simulated bodies never block.
pub fn is_blocked<H: MovementHost + CollisionHost>(
    movement: &MovementSettings,
    baseline: &StanceBaseline,
    host: &H,
) -> bool {
    let radius = host.capsule_radius();
    let distance = block_sweep_distance(movement, baseline, host.capsule_half_height(), radius);

    let start = host.location();
    let end = start + Vec3::Y * distance;

    match host.sweep_sphere(start, end, radius) {
        Some(hit) => !hit.simulates_physics,
        None => false,
    }
}

/// Length of the stand-up sweep for a capsule of the given size.
pub fn block_sweep_distance(
    movement: &MovementSettings,
    baseline: &StanceBaseline,
    half_height: f32,
    radius: f32,
) -> f32 {
    match movement.crouch_action {
        CrouchAction::Hold => (half_height - radius).max(0.0) + movement.block_test_offset,
        CrouchAction::Toggle => baseline.capsule_half_height,
    }
}

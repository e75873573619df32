//! Character domain: the first person character and its engine hooks.
//!
//! [`FirstPersonCharacter`] owns all per-instance mutable state (crouch
//! phase, travel accumulator, stride, walk speed) and reacts to the hooks a
//! host engine drives: begin play, per-frame tick, axis and action input,
//! jump and landing.

use std::sync::Arc;

use bevy::prelude::*;
use rand::Rng;

use crate::character::ControlRotation;
use crate::crouch::{CrouchPhase, CrouchState, StanceBaseline};
use crate::footsteps::{FootstepCue, FootstepTracker, Locomotion};
use crate::host::{CharacterHost, ShakeHost, SoundHost};
use crate::settings::{CharacterSettings, enforce_valid_settings, validate_settings};
use crate::shake::{play_jump_shake, update_camera_shake};

/// Work done by [`FirstPersonCharacter::tick`], in the order it runs.
///
/// Camera shake runs first so it sees the velocity and walk speed the
/// previous frame produced, not the values a pending crouch transition is
/// about to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    CameraShake,
    CrouchTransition,
    WalkSpeed,
}

pub const TICK_PHASES: [TickPhase; 3] = [
    TickPhase::CameraShake,
    TickPhase::CrouchTransition,
    TickPhase::WalkSpeed,
];

/// Requests the character hands back to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterRequest {
    Quit,
    Interact,
}

/// Outputs shared by the footstep and shake paths.
pub struct Feedback<'a, R: Rng + ?Sized> {
    /// `None` while the character is not possessed.
    pub shakes: Option<&'a mut dyn ShakeHost>,
    pub sounds: &'a mut dyn SoundHost,
    pub rng: &'a mut R,
}

#[derive(Component, Debug, Clone)]
pub struct FirstPersonCharacter {
    settings: Arc<CharacterSettings>,
    crouch: CrouchState,
    footsteps: FootstepTracker,
    baseline: StanceBaseline,
    wants_to_run: bool,
    current_walk_speed: f32,
}

impl FirstPersonCharacter {
    /// Settings that fail validation are replaced by a sanitized copy.
    pub fn new(settings: Arc<CharacterSettings>) -> Self {
        let settings = if validate_settings(&settings).is_empty() {
            settings
        } else {
            let mut sanitized = CharacterSettings::clone(&settings);
            enforce_valid_settings(&mut sanitized);
            Arc::new(sanitized)
        };

        let baseline = StanceBaseline {
            camera_offset: settings.body.camera_offset.into(),
            capsule_half_height: settings.body.capsule_half_height,
        };
        Self {
            footsteps: FootstepTracker::new(Vec3::ZERO, settings.footsteps.initial_stride),
            crouch: CrouchState::default(),
            baseline,
            wants_to_run: false,
            current_walk_speed: settings.movement.walk_speed,
            settings,
        }
    }

    pub fn settings(&self) -> &Arc<CharacterSettings> {
        &self.settings
    }

    pub fn crouch_phase(&self) -> CrouchPhase {
        self.crouch.phase()
    }

    pub fn crouch(&self) -> &CrouchState {
        &self.crouch
    }

    pub fn footsteps(&self) -> &FootstepTracker {
        &self.footsteps
    }

    pub fn baseline(&self) -> &StanceBaseline {
        &self.baseline
    }

    pub fn wants_to_run(&self) -> bool {
        self.wants_to_run
    }

    pub fn current_walk_speed(&self) -> f32 {
        self.current_walk_speed
    }

    pub fn locomotion(&self) -> Locomotion {
        if !self.crouch.is_standing() {
            Locomotion::Crouched
        } else if self.wants_to_run {
            Locomotion::Running
        } else {
            Locomotion::Walking
        }
    }

    /// Applies movement settings and captures the stance baseline.
    pub fn begin_play<H: CharacterHost>(&mut self, host: &mut H) {
        let movement = &self.settings.movement;
        self.current_walk_speed = movement.walk_speed;
        host.set_max_walk_speed(self.current_walk_speed);
        host.set_jump_velocity(movement.jump_velocity);
        host.set_air_control(movement.air_control);

        self.baseline = StanceBaseline::capture(host);
        self.footsteps.reset(host.location());
    }

    /// Runs [`TICK_PHASES`] in order.
    pub fn tick<H: CharacterHost>(
        &mut self,
        dt: f32,
        host: &mut H,
        mut shakes: Option<&mut dyn ShakeHost>,
    ) {
        for phase in TICK_PHASES {
            match phase {
                TickPhase::CameraShake => update_camera_shake(
                    host,
                    self.settings.movement.run_speed,
                    shakes.as_deref_mut(),
                ),
                TickPhase::CrouchTransition => self.update_crouch(dt, host),
                TickPhase::WalkSpeed => self.update_walking_speed(host),
            }
        }
    }

    fn update_crouch<H: CharacterHost>(&mut self, dt: f32, host: &mut H) {
        self.crouch.update(
            dt,
            &self.settings.movement,
            &self.settings.body,
            &self.baseline,
            self.current_walk_speed,
            host,
        );
    }

    fn update_walking_speed<H: CharacterHost>(&mut self, host: &mut H) {
        if !self.crouch.is_standing() {
            return;
        }

        let movement = &self.settings.movement;
        self.current_walk_speed = if self.wants_to_run {
            movement.run_speed
        } else {
            movement.walk_speed
        };
        host.set_max_walk_speed(self.current_walk_speed);
    }

    /// Forward axis callback, dispatched every frame.
    ///
    /// Besides moving, this samples travel distance and fires a footstep once
    /// the stride is exceeded on the ground.
    pub fn move_forward<H, R>(
        &mut self,
        value: f32,
        control: Option<&ControlRotation>,
        host: &mut H,
        feedback: &mut Feedback<'_, R>,
    ) -> Option<FootstepCue>
    where
        H: CharacterHost,
        R: Rng + ?Sized,
    {
        let control = control?;
        host.add_movement_input(control.flat_forward(), value);

        if !self.settings.footsteps.enabled {
            return None;
        }

        if !self.footsteps.accumulate(host) {
            return None;
        }

        let cue = self.play_footstep(host, feedback);
        self.footsteps.consume();
        cue
    }

    /// Right axis callback, dispatched every frame.
    pub fn move_right<H: CharacterHost>(
        &mut self,
        value: f32,
        control: Option<&ControlRotation>,
        host: &mut H,
    ) {
        if let Some(control) = control {
            host.add_movement_input(control.right(), value);
        }
    }

    pub fn add_yaw_input(&self, value: f32, dt: f32, control: &mut ControlRotation) {
        control.add_yaw(value * self.settings.camera.sensitivity_x * dt);
    }

    pub fn add_pitch_input(&self, value: f32, dt: f32, control: &mut ControlRotation) {
        let camera = &self.settings.camera;
        control.add_pitch(
            value * camera.sensitivity_y * dt,
            camera.min_pitch,
            camera.max_pitch,
        );
    }

    /// Jump pressed. Only a standing character jumps.
    pub fn jump<H: CharacterHost>(
        &mut self,
        host: &mut H,
        shakes: Option<&mut dyn ShakeHost>,
    ) {
        if !self.crouch.is_standing() {
            return;
        }

        host.jump();
        play_jump_shake(shakes, false);
    }

    pub fn stop_jumping<H: CharacterHost>(&mut self, host: &mut H) {
        host.stop_jumping();
    }

    /// Landing hook. Plays the landing shake and a footstep while standing.
    pub fn landed<H, R>(
        &mut self,
        host: &mut H,
        feedback: &mut Feedback<'_, R>,
    ) -> Option<FootstepCue>
    where
        H: CharacterHost,
        R: Rng + ?Sized,
    {
        self.footsteps.reset(host.location());

        if !self.crouch.is_standing() {
            return None;
        }

        play_jump_shake(feedback.shakes.as_deref_mut(), true);

        if self.settings.footsteps.enabled {
            self.play_footstep(host, feedback)
        } else {
            None
        }
    }

    pub fn start_crouch<H: CharacterHost>(&mut self, host: &H) {
        self.crouch.press(&self.settings.movement, &self.baseline, host);
    }

    pub fn stop_crouching(&mut self) {
        self.crouch.release(&self.settings.movement);
    }

    pub fn run(&mut self) {
        self.wants_to_run = true;
    }

    pub fn stop_running(&mut self) {
        self.wants_to_run = false;
    }

    /// Base characters have nothing to interact with.
    pub fn interact(&self) -> CharacterRequest {
        warn!("Interact has no functionality; handle InteractEvent to implement it");
        CharacterRequest::Interact
    }

    pub fn quit(&self) -> CharacterRequest {
        info!("Quit requested");
        CharacterRequest::Quit
    }

    fn play_footstep<H, R>(
        &mut self,
        host: &H,
        feedback: &mut Feedback<'_, R>,
    ) -> Option<FootstepCue>
    where
        H: CharacterHost,
        R: Rng + ?Sized,
    {
        let locomotion = self.locomotion();
        self.footsteps.play(
            &self.settings.footsteps,
            locomotion,
            host,
            &mut *feedback.sounds,
            &mut *feedback.rng,
        )
    }
}

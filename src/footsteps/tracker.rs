//! Footsteps domain: travel accounting and footstep playback.

use bevy::prelude::*;
use rand::Rng;

use crate::footsteps::{Locomotion, find_mapping};
use crate::host::{CollisionHost, MovementHost, SoundHost};
use crate::settings::FootstepSettings;

/// A footstep that produced a sound.
#[derive(Debug, Clone, PartialEq)]
pub struct FootstepCue {
    pub location: Vec3,
    pub surface: String,
    pub sound: String,
    pub volume: f32,
}

/// Distance accumulator driving footstep cadence.
#[derive(Debug, Clone)]
pub struct FootstepTracker {
    last_location: Vec3,
    travel_distance: f32,
    current_stride: f32,
    last_footstep_location: Vec3,
    current_mapping: Option<usize>,
    unmapped_footsteps: u32,
}

impl FootstepTracker {
    pub fn new(origin: Vec3, initial_stride: f32) -> Self {
        Self {
            last_location: origin,
            travel_distance: 0.0,
            current_stride: initial_stride,
            last_footstep_location: origin,
            current_mapping: None,
            unmapped_footsteps: 0,
        }
    }

    pub fn travel_distance(&self) -> f32 {
        self.travel_distance
    }

    pub fn current_stride(&self) -> f32 {
        self.current_stride
    }

    pub fn last_footstep_location(&self) -> Vec3 {
        self.last_footstep_location
    }

    /// Index of the mapping used by the last successful lookup.
    pub fn current_mapping(&self) -> Option<usize> {
        self.current_mapping
    }

    /// Footsteps skipped because their surface had no mapping. Each one
    /// logged a single warning.
    pub fn unmapped_footsteps(&self) -> u32 {
        self.unmapped_footsteps
    }

    /// Restarts sampling from `origin` with nothing accumulated.
    pub fn reset(&mut self, origin: Vec3) {
        self.last_location = origin;
        self.travel_distance = 0.0;
    }

    /// Samples the host location and reports whether a footstep is due.
    ///
    /// Distance only accumulates while moving on the ground. Falling resets
    /// the accumulator every sample.
    pub fn accumulate<H: MovementHost + ?Sized>(&mut self, host: &H) -> bool {
        let location = host.location();

        if host.velocity().length() > 0.0 && host.is_moving_on_ground() {
            self.travel_distance += location.distance(self.last_location);
            self.last_location = location;
        } else if host.is_falling() {
            self.reset(location);
        }

        host.is_moving_on_ground() && self.travel_distance > self.current_stride
    }

    /// Clears the accumulated distance after a triggered footstep.
    pub fn consume(&mut self) {
        self.travel_distance = 0.0;
    }

    /// Probes the floor and plays the mapped sound for its surface.
    ///
    /// A matching mapping also updates the stride used for the next step.
    pub fn play<H, R>(
        &mut self,
        settings: &FootstepSettings,
        locomotion: Locomotion,
        host: &H,
        sounds: &mut dyn SoundHost,
        rng: &mut R,
    ) -> Option<FootstepCue>
    where
        H: MovementHost + CollisionHost + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(floor) = host.find_floor(host.location()) else {
            debug!("Footstep skipped: no floor below character");
            return None;
        };
        self.last_footstep_location = floor.location;

        let found = floor
            .surface
            .as_deref()
            .and_then(|surface| find_mapping(&settings.mappings, surface));

        let Some((index, mapping)) = found else {
            self.unmapped_footsteps += 1;
            warn!(
                "No footstep mapping for surface {:?}",
                floor.surface.as_deref().unwrap_or("<none>")
            );
            return None;
        };

        self.current_mapping = Some(index);
        self.current_stride = mapping.stride(locomotion);

        if mapping.sounds.is_empty() {
            warn!("Footstep mapping for {:?} has no sounds", mapping.surface);
            return None;
        }

        let sound = &mapping.sounds[rng.random_range(0..mapping.sounds.len())];
        let volume = match locomotion {
            Locomotion::Crouched => settings.crouched_volume,
            _ => 1.0,
        };
        sounds.play_sound_at(sound, floor.location, volume);

        Some(FootstepCue {
            location: floor.location,
            surface: mapping.surface.clone(),
            sound: sound.clone(),
            volume,
        })
    }
}

//! Footsteps domain: surface to sound mappings.

use serde::{Deserialize, Serialize};

/// How the character is currently moving, for stride selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    Walking,
    Running,
    /// Crouched or transitioning between stances.
    Crouched,
}

/// Footstep data for one physical material.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FootstepMapping {
    /// Physical material identity this mapping applies to.
    pub surface: String,
    /// Sound asset paths; one is picked at random per step.
    pub sounds: Vec<String>,
    pub stride_walk: f32,
    pub stride_run: f32,
    pub stride_crouch: f32,
}

impl Default for FootstepMapping {
    fn default() -> Self {
        Self {
            surface: String::new(),
            sounds: Vec::new(),
            stride_walk: 1.6,
            stride_run: 2.2,
            stride_crouch: 1.2,
        }
    }
}

impl FootstepMapping {
    pub fn stride(&self, locomotion: Locomotion) -> f32 {
        match locomotion {
            Locomotion::Walking => self.stride_walk,
            Locomotion::Running => self.stride_run,
            Locomotion::Crouched => self.stride_crouch,
        }
    }
}

/// First mapping registered for `surface`, with its index in the table.
pub fn find_mapping<'a>(
    mappings: &'a [FootstepMapping],
    surface: &str,
) -> Option<(usize, &'a FootstepMapping)> {
    mappings
        .iter()
        .enumerate()
        .find(|(_, mapping)| mapping.surface == surface)
}

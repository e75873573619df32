//! Settings domain: author-time character configuration.
//!
//! Settings are read once at startup from assets/data/first_person.ron (or a
//! `.json` file with the same layout). A missing or broken file falls back to
//! defaults; out-of-range values are reported and clamped.

mod data;
mod loader;
mod validation;


pub use data::{
    BodySettings, CameraSettings, CharacterSettings, FootstepSettings, MovementSettings, Vec3Def,
};
pub use loader::{SettingsLoadError, load_settings, parse_settings};
pub use validation::{
    ValidationError, enforce_valid_settings, sanitize_settings, validate_settings,
};

use bevy::prelude::*;
use std::path::Path;

pub const DEFAULT_SETTINGS_PATH: &str = "assets/data/first_person.ron";

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_character_settings);
    }
}

/// Inserts [`CharacterSettings`] unless the app provided its own. Either
/// way the settings in use are validated and clamped.
fn load_character_settings(
    mut commands: Commands,
    existing: Option<ResMut<CharacterSettings>>,
) {
    if let Some(mut existing) = existing {
        if !validate_settings(&existing).is_empty() {
            enforce_valid_settings(&mut existing);
        }
        return;
    }

    let mut settings = match load_settings(Path::new(DEFAULT_SETTINGS_PATH)) {
        Ok(settings) => {
            info!("Loaded character settings from {}", DEFAULT_SETTINGS_PATH);
            settings
        }
        Err(e) => {
            warn!("{}; using default character settings", e);
            CharacterSettings::default()
        }
    };
    enforce_valid_settings(&mut settings);

    commands.insert_resource(settings);
}

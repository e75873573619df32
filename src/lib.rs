//! First person character controller for Bevy with avian3d physics.
//!
//! Crouch with a blocked stand-up check, surface-driven footsteps, camera
//! shake selection and default key bindings, wired up by [`FirstPersonPlugin`].

pub mod bindings;
pub mod character;
pub mod crouch;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod footsteps;
pub mod host;
pub mod settings;
pub mod shake;

#[cfg(test)]
mod testing;

use bevy::prelude::*;

/// Settings, key bindings and the character systems.
///
/// Physics is not included; add `avian3d::PhysicsPlugins` alongside.
pub struct FirstPersonPlugin;

impl Plugin for FirstPersonPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            settings::SettingsPlugin,
            bindings::BindingsPlugin,
            character::CharacterPlugin,
        ));

        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}

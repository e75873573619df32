//! Bindings domain: default key mappings and the input settings store.

mod bootstrap;
mod mapping;
mod store;


pub use bootstrap::{
    BootstrapPlan, KeyBindingRepository, apply_bootstrap, default_action_mappings,
    default_axis_mappings, plan_bootstrap, setup_input_bindings,
};
pub use mapping::{
    ACTION_CROUCH, ACTION_ESCAPE, ACTION_INTERACT, ACTION_JUMP, ACTION_RUN, AXIS_LOOK_UP,
    AXIS_MOVE_FORWARD, AXIS_MOVE_RIGHT, AXIS_TURN, ActionMapping, AxisMapping, InputKey,
};
pub use store::{BindingStoreError, DEFAULT_INPUT_CONFIG_PATH, InputSettings};

use bevy::prelude::*;

pub struct BindingsPlugin;

impl Plugin for BindingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_input_settings);
    }
}

/// Loads the persisted key mappings unless a store was inserted already.
fn load_input_settings(mut commands: Commands, existing: Option<Res<InputSettings>>) {
    if existing.is_some() {
        return;
    }

    let settings = match InputSettings::load(DEFAULT_INPUT_CONFIG_PATH) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}; starting with an empty input store", e);
            InputSettings::with_config_path(DEFAULT_INPUT_CONFIG_PATH)
        }
    };
    commands.insert_resource(settings);
}

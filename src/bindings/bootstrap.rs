//! Bindings domain: one-time default binding setup.

use bevy::prelude::*;

use crate::bindings::{
    ACTION_CROUCH, ACTION_ESCAPE, ACTION_INTERACT, ACTION_JUMP, ACTION_RUN, AXIS_LOOK_UP,
    AXIS_MOVE_FORWARD, AXIS_MOVE_RIGHT, AXIS_TURN, ActionMapping, AxisMapping, BindingStoreError,
    InputKey,
};

/// Store of action and axis mappings shared by every character.
pub trait KeyBindingRepository {
    fn action_mappings(&self) -> Vec<ActionMapping>;
    fn axis_mappings(&self) -> Vec<AxisMapping>;
    fn add_action_mapping(&mut self, mapping: ActionMapping);
    fn remove_action_mapping(&mut self, mapping: &ActionMapping);
    fn add_axis_mapping(&mut self, mapping: AxisMapping);
    fn remove_axis_mapping(&mut self, mapping: &AxisMapping);
    fn save_key_mappings(&mut self) -> Result<(), BindingStoreError>;
    fn force_rebuild_keymaps(&mut self);
}

const DEFAULT_ACTIONS: [(&str, InputKey); 6] = [
    (ACTION_JUMP, InputKey::SpaceBar),
    (ACTION_INTERACT, InputKey::F),
    (ACTION_ESCAPE, InputKey::Escape),
    (ACTION_RUN, InputKey::LeftShift),
    (ACTION_CROUCH, InputKey::LeftControl),
    (ACTION_CROUCH, InputKey::C),
];

const DEFAULT_AXES: [(&str, InputKey); 6] = [
    (AXIS_TURN, InputKey::MouseX),
    (AXIS_LOOK_UP, InputKey::MouseY),
    (AXIS_MOVE_FORWARD, InputKey::W),
    (AXIS_MOVE_FORWARD, InputKey::S),
    (AXIS_MOVE_RIGHT, InputKey::A),
    (AXIS_MOVE_RIGHT, InputKey::D),
];

/// Default action set. With `unbound` every key is the placeholder.
pub fn default_action_mappings(unbound: bool) -> Vec<ActionMapping> {
    DEFAULT_ACTIONS
        .iter()
        .map(|&(action, key)| {
            ActionMapping::new(action, if unbound { InputKey::Unbound } else { key })
        })
        .collect()
}

/// Default axis set. Scale signs follow the default key even when unbound.
pub fn default_axis_mappings(unbound: bool) -> Vec<AxisMapping> {
    DEFAULT_AXES
        .iter()
        .map(|&(axis, key)| {
            let scale = if key.is_negative_by_default() { -1.0 } else { 1.0 };
            AxisMapping::new(axis, if unbound { InputKey::Unbound } else { key }, scale)
        })
        .collect()
}

/// Operations that replace the store contents with the defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BootstrapPlan {
    pub remove_actions: Vec<ActionMapping>,
    pub remove_axes: Vec<AxisMapping>,
    pub add_actions: Vec<ActionMapping>,
    pub add_axes: Vec<AxisMapping>,
}

/// Decides what the bootstrap does given the store contents.
///
/// An empty store always receives the defaults. A populated store is only
/// left alone when custom key mappings are enabled; otherwise it is reset to
/// the defaults. Custom mode installs placeholder keys for the user to fill
/// in.
pub fn plan_bootstrap(
    existing_actions: &[ActionMapping],
    existing_axes: &[AxisMapping],
    use_custom_key_mappings: bool,
) -> Option<BootstrapPlan> {
    let populated = !existing_actions.is_empty() || !existing_axes.is_empty();
    if populated && use_custom_key_mappings {
        return None;
    }

    Some(BootstrapPlan {
        remove_actions: existing_actions.to_vec(),
        remove_axes: existing_axes.to_vec(),
        add_actions: default_action_mappings(use_custom_key_mappings),
        add_axes: default_axis_mappings(use_custom_key_mappings),
    })
}

/// Executes a plan, then persists and rebuilds the keymaps.
pub fn apply_bootstrap<R: KeyBindingRepository + ?Sized>(
    repository: &mut R,
    plan: BootstrapPlan,
) -> Result<(), BindingStoreError> {
    for mapping in &plan.remove_actions {
        repository.remove_action_mapping(mapping);
    }
    for mapping in &plan.remove_axes {
        repository.remove_axis_mapping(mapping);
    }
    for mapping in plan.add_actions {
        repository.add_action_mapping(mapping);
    }
    for mapping in plan.add_axes {
        repository.add_axis_mapping(mapping);
    }

    let saved = repository.save_key_mappings();
    repository.force_rebuild_keymaps();
    saved
}

/// Runs the bootstrap against `repository`, logging what happened.
pub fn setup_input_bindings<R: KeyBindingRepository + ?Sized>(
    repository: &mut R,
    use_custom_key_mappings: bool,
) {
    let actions = repository.action_mappings();
    let axes = repository.axis_mappings();

    let Some(plan) = plan_bootstrap(&actions, &axes, use_custom_key_mappings) else {
        info!(
            "Keeping {} action and {} axis mappings (custom key mappings enabled)",
            actions.len(),
            axes.len()
        );
        return;
    };

    if !plan.remove_actions.is_empty() || !plan.remove_axes.is_empty() {
        warn!(
            "Replacing {} action and {} axis mappings with defaults; enable custom key mappings to keep them",
            plan.remove_actions.len(),
            plan.remove_axes.len()
        );
    }

    match apply_bootstrap(repository, plan) {
        Ok(()) => info!("Installed default input bindings"),
        Err(e) => warn!("Default input bindings installed but not saved: {}", e),
    }
}

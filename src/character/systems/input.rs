//! Character domain: input sampling and dispatch to the possessed character.

use std::sync::Arc;

use bevy::ecs::message::MessageWriter;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::bindings::{
    ACTION_CROUCH, ACTION_ESCAPE, ACTION_INTERACT, ACTION_JUMP, ACTION_RUN, AXIS_LOOK_UP,
    AXIS_MOVE_FORWARD, AXIS_MOVE_RIGHT, AXIS_TURN, InputKey, InputSettings,
};
use crate::character::systems::{CharacterData, as_shake_host, footstep_event, split_controller};
use crate::character::{
    AutoPossessPlayer, CharacterBody, CharacterRequest, Feedback, FootstepAudio, FootstepEvent,
    FootstepRng, InteractEvent, SceneQueries,
};

/// Converts mouse motion in pixels into raw axis units.
pub const MOUSE_AXIS_SCALE: f32 = 0.07;

const ACTIONS: [&str; 5] = [
    ACTION_JUMP,
    ACTION_RUN,
    ACTION_CROUCH,
    ACTION_INTERACT,
    ACTION_ESCAPE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEdge {
    pub action: &'static str,
    pub state: ActionState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisInput {
    pub move_forward: f32,
    pub move_right: f32,
    pub turn: f32,
    pub look_up: f32,
}

/// This frame's bound input, resolved through the key mappings.
#[derive(Resource, Debug, Default)]
pub struct PlayerInput {
    pub axes: AxisInput,
    pub actions: Vec<ActionEdge>,
}

/// Sums `scale` over every pressed key bound to an axis.
pub fn axis_value(
    keys: &[(InputKey, f32)],
    keyboard: &ButtonInput<KeyCode>,
    mouse_delta: Vec2,
) -> f32 {
    keys.iter()
        .map(|&(key, scale)| {
            let raw = match key {
                InputKey::MouseX => mouse_delta.x * MOUSE_AXIS_SCALE,
                InputKey::MouseY => -mouse_delta.y * MOUSE_AXIS_SCALE,
                key => match key.key_code() {
                    Some(code) if keyboard.pressed(code) => 1.0,
                    _ => 0.0,
                },
            };
            raw * scale
        })
        .sum()
}

/// Press and release edges of any key bound to an action this frame.
pub fn action_states(keys: &[InputKey], keyboard: &ButtonInput<KeyCode>) -> Vec<ActionState> {
    let codes: Vec<KeyCode> = keys.iter().filter_map(|key| key.key_code()).collect();

    let mut states = Vec::new();
    if keyboard.any_just_pressed(codes.iter().copied()) {
        states.push(ActionState::Pressed);
    }
    if keyboard.any_just_released(codes.iter().copied()) {
        states.push(ActionState::Released);
    }
    states
}

pub(crate) fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    bindings: Option<Res<InputSettings>>,
    mut input: ResMut<PlayerInput>,
) {
    input.axes = AxisInput::default();
    input.actions.clear();

    let Some(bindings) = bindings else {
        return;
    };

    let delta = mouse_motion.delta;
    input.axes = AxisInput {
        move_forward: axis_value(bindings.axis_keys(AXIS_MOVE_FORWARD), &keyboard, delta),
        move_right: axis_value(bindings.axis_keys(AXIS_MOVE_RIGHT), &keyboard, delta),
        turn: axis_value(bindings.axis_keys(AXIS_TURN), &keyboard, delta),
        look_up: axis_value(bindings.axis_keys(AXIS_LOOK_UP), &keyboard, delta),
    };

    for action in ACTIONS {
        for state in action_states(bindings.action_keys(action), &keyboard) {
            input.actions.push(ActionEdge { action, state });
        }
    }
}

/// Action callbacks on their edges, then every axis callback, every frame.
#[allow(clippy::too_many_arguments)]
pub(crate) fn dispatch_player_input(
    time: Res<Time>,
    input: Res<PlayerInput>,
    scene: SceneQueries,
    mut audio: FootstepAudio,
    mut rng: ResMut<FootstepRng>,
    mut characters: Query<CharacterData, With<AutoPossessPlayer>>,
    mut exit: MessageWriter<AppExit>,
    mut interactions: MessageWriter<InteractEvent>,
    mut footsteps: MessageWriter<FootstepEvent>,
) {
    let dt = time.delta_secs();

    for (entity, mut character, motor, capsule, rig, transform, velocity, mut controller) in
        &mut characters
    {
        let settings = Arc::clone(character.settings());
        let mut body = CharacterBody {
            entity,
            transform,
            velocity,
            motor,
            capsule,
            rig,
            scene: &scene,
        };
        let (mut control, mut shakes) =
            split_controller(controller.as_deref_mut(), &settings.camera_shakes);

        for edge in &input.actions {
            let request = match (edge.action, edge.state) {
                (ACTION_JUMP, ActionState::Pressed) => {
                    character.jump(&mut body, as_shake_host(&mut shakes));
                    None
                }
                (ACTION_JUMP, ActionState::Released) => {
                    character.stop_jumping(&mut body);
                    None
                }
                (ACTION_RUN, ActionState::Pressed) => {
                    character.run();
                    None
                }
                (ACTION_RUN, ActionState::Released) => {
                    character.stop_running();
                    None
                }
                (ACTION_CROUCH, ActionState::Pressed) => {
                    character.start_crouch(&body);
                    None
                }
                (ACTION_CROUCH, ActionState::Released) => {
                    character.stop_crouching();
                    None
                }
                (ACTION_INTERACT, ActionState::Pressed) => Some(character.interact()),
                (ACTION_ESCAPE, ActionState::Pressed) => Some(character.quit()),
                _ => None,
            };

            match request {
                Some(CharacterRequest::Interact) => {
                    interactions.write(InteractEvent { entity });
                }
                Some(CharacterRequest::Quit) => {
                    exit.write(AppExit::Success);
                }
                None => {}
            }
        }

        let axes = input.axes;
        let mut feedback = Feedback {
            shakes: as_shake_host(&mut shakes),
            sounds: &mut audio,
            rng: &mut rng.0,
        };
        if let Some(cue) =
            character.move_forward(axes.move_forward, control.as_deref(), &mut body, &mut feedback)
        {
            footsteps.write(footstep_event(entity, cue));
        }
        character.move_right(axes.move_right, control.as_deref(), &mut body);

        if let Some(control) = control.as_deref_mut() {
            character.add_yaw_input(axes.turn, dt, control);
            character.add_pitch_input(axes.look_up, dt, control);
        }
    }
}
